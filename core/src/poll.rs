//! Busy-poll loop with an explicit interval, deadline and cancellation.
//!
//! Every waiting command goes through [`Poller`]: check a condition, and if
//! it does not hold yet, sleep for the interval and check again.

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use tokio::time::{sleep, timeout, Instant};
use tracing::debug;

use crate::error::{Error, Result};

/// Default time between checks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Result of a finished poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polled<T> {
    pub value: T,
    /// Number of checks performed, including the successful one.
    pub attempts: u32,
    pub elapsed: Duration,
}

/// Fixed-interval poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poller {
    pub interval: Duration,
    /// Give up after this long. `None` polls until cancelled.
    pub timeout: Option<Duration>,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    /// Poll until `predicate` returns true.
    pub async fn until<P, Fut, C>(&self, mut predicate: P, cancel: C) -> Result<Polled<()>>
    where
        P: FnMut() -> Fut,
        Fut: Future<Output = bool>,
        C: Future<Output = ()>,
    {
        self.run(
            (),
            |()| {
                let check = predicate();
                async move {
                    if check.await {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                }
            },
            cancel,
        )
        .await
    }

    /// Poll a stateful step until it breaks.
    ///
    /// `step` receives the state returned by the previous check, so progress
    /// (for example, which ports already answered) carries across attempts.
    pub async fn run<S, T, F, Fut, C>(&self, initial: S, mut step: F, cancel: C) -> Result<Polled<T>>
    where
        F: FnMut(S) -> Fut,
        Fut: Future<Output = ControlFlow<T, S>>,
        C: Future<Output = ()>,
    {
        let started = Instant::now();
        let interval = self.interval;

        let poll = async move {
            let mut state = initial;
            let mut attempts: u32 = 0;
            loop {
                attempts += 1;
                match step(state).await {
                    ControlFlow::Break(value) => return (value, attempts),
                    ControlFlow::Continue(next) => state = next,
                }
                debug!(attempts, "Condition not met, sleeping {:?}", interval);
                sleep(interval).await;
            }
        };

        let bounded = async {
            match self.timeout {
                Some(limit) => timeout(limit, poll).await.map_err(|_| Error::Timeout(limit)),
                None => Ok(poll.await),
            }
        };

        tokio::select! {
            result = bounded => {
                let (value, attempts) = result?;
                Ok(Polled {
                    value,
                    attempts,
                    elapsed: started.elapsed(),
                })
            }
            _ = cancel => Err(Error::Cancelled),
        }
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

/// A cancel future that never fires.
pub async fn never() {
    std::future::pending::<()>().await
}
