//! Waiting on processes and ports this program does not own.

use std::future::Future;
use std::io::Write;
use std::ops::ControlFlow;

use tracing::{debug, info};

use crate::domain::PortProbe;
use crate::error::{Error, Result};
use crate::poll::{Polled, Poller};
use crate::ports::{PortProber, ProcessTable};

/// Waits for unrelated processes to exit.
pub struct ProcessWaitService<T: ProcessTable> {
    table: T,
    poller: Poller,
}

impl<T: ProcessTable> ProcessWaitService<T> {
    pub fn new(table: T, poller: Poller) -> Self {
        Self { table, poller }
    }

    /// Block until none of `pids` is in the process table.
    ///
    /// If the first PID is already gone, a warning goes to `warnings` before
    /// polling starts; the wait itself still covers every PID.
    pub async fn wait<W, C>(&self, pids: &[u32], warnings: &mut W, cancel: C) -> Result<Polled<()>>
    where
        W: Write,
        C: Future<Output = ()>,
    {
        let Some(&first) = pids.first() else {
            return Err(Error::MissingArgument("PID"));
        };

        if !self.table.exists(first) {
            debug!(pid = first, "First process does not exist");
            writeln!(warnings, "warning: process {} does not exist", first)?;
        }

        let table = &self.table;
        let polled = self
            .poller
            .run(
                pids.to_vec(),
                move |mut remaining: Vec<u32>| async move {
                    remaining.retain(|&pid| table.exists(pid));
                    if remaining.is_empty() {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(remaining)
                    }
                },
                cancel,
            )
            .await?;

        info!(pids = ?pids, attempts = polled.attempts, "All processes exited");
        Ok(polled)
    }
}

/// Waits for ports to accept connections.
pub struct PortWaitService<P: PortProber> {
    prober: P,
    poller: Poller,
    host: String,
}

impl<P: PortProber> PortWaitService<P> {
    pub fn new(prober: P, poller: Poller, host: impl Into<String>) -> Self {
        Self {
            prober,
            poller,
            host: host.into(),
        }
    }

    /// Block until every port has accepted a connection at least once.
    ///
    /// Each attempt probes only the ports that have not answered yet.
    pub async fn wait<C>(&self, ports: &[u16], cancel: C) -> Result<Polled<()>>
    where
        C: Future<Output = ()>,
    {
        if ports.is_empty() {
            return Err(Error::MissingArgument("PORT"));
        }

        let probes: Vec<PortProbe> = ports
            .iter()
            .map(|&port| PortProbe::new(self.host.clone(), port))
            .collect();

        let prober = &self.prober;
        let polled = self
            .poller
            .run(
                probes,
                move |pending: Vec<PortProbe>| async move {
                    let mut still_closed = Vec::with_capacity(pending.len());
                    for probe in pending {
                        if prober.is_open(&probe).await {
                            info!(address = %probe, "Port is accepting connections");
                        } else {
                            still_closed.push(probe);
                        }
                    }

                    if still_closed.is_empty() {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(still_closed)
                    }
                },
                cancel,
            )
            .await?;

        Ok(polled)
    }
}
