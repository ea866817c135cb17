//! Mock port implementations shared by the service tests.

use std::sync::Mutex;

use crate::domain::{CommandSpec, MailMessage, PortProbe};
use crate::error::{Error, Result};
use crate::ports::{CapturedOutput, CommandRunner, Mailer, PortProber, ProcessTable};

type Reply = Box<dyn Fn(&CommandSpec) -> CapturedOutput + Send + Sync>;

/// Records every command and answers from a script.
pub(crate) struct RecordingRunner {
    calls: Mutex<Vec<CommandSpec>>,
    reply: Reply,
}

impl RecordingRunner {
    /// Every command succeeds with no output.
    pub(crate) fn ok() -> Self {
        Self::with(|_| CapturedOutput::default())
    }

    pub(crate) fn with<F>(reply: F) -> Self
    where
        F: Fn(&CommandSpec) -> CapturedOutput + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Box::new(reply),
        }
    }

    /// Fail with `status` whenever the first argument is `arg`.
    pub(crate) fn failing_on(arg: &'static str, status: i32) -> Self {
        Self::with(move |cmd| CapturedOutput {
            status: if cmd.args.first().map(String::as_str) == Some(arg) {
                status
            } else {
                0
            },
            output: Vec::new(),
        })
    }

    pub(crate) fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, cmd: &CommandSpec) -> CapturedOutput {
        self.calls.lock().unwrap().push(cmd.clone());
        (self.reply)(cmd)
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, cmd: &CommandSpec) -> Result<i32> {
        Ok(self.record(cmd).status)
    }

    async fn capture(&self, cmd: &CommandSpec) -> Result<CapturedOutput> {
        Ok(self.record(cmd))
    }
}

/// Process table where each PID disappears after a fixed number of lookups.
pub(crate) struct ScriptedTable {
    /// (pid, lookups that still find it)
    lifetimes: Mutex<Vec<(u32, u32)>>,
    lookups: Mutex<Vec<u32>>,
}

impl ScriptedTable {
    pub(crate) fn new(lifetimes: &[(u32, u32)]) -> Self {
        Self {
            lifetimes: Mutex::new(lifetimes.to_vec()),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn lookups(&self) -> Vec<u32> {
        self.lookups.lock().unwrap().clone()
    }
}

impl ProcessTable for ScriptedTable {
    fn exists(&self, pid: u32) -> bool {
        self.lookups.lock().unwrap().push(pid);
        let mut lifetimes = self.lifetimes.lock().unwrap();
        match lifetimes.iter_mut().find(|(p, _)| *p == pid) {
            Some((_, 0)) | None => false,
            Some((_, left)) => {
                *left -= 1;
                true
            }
        }
    }
}

/// Prober where each port opens after a fixed number of refused attempts.
pub(crate) struct ScriptedProber {
    /// (port, refusals left)
    refusals: Mutex<Vec<(u16, u32)>>,
    probes: Mutex<Vec<PortProbe>>,
}

impl ScriptedProber {
    pub(crate) fn new(refusals: &[(u16, u32)]) -> Self {
        Self {
            refusals: Mutex::new(refusals.to_vec()),
            probes: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn probes(&self) -> Vec<PortProbe> {
        self.probes.lock().unwrap().clone()
    }
}

impl PortProber for ScriptedProber {
    async fn is_open(&self, probe: &PortProbe) -> bool {
        self.probes.lock().unwrap().push(probe.clone());
        let mut refusals = self.refusals.lock().unwrap();
        match refusals.iter_mut().find(|(port, _)| *port == probe.port) {
            Some((_, 0)) => true,
            Some((_, left)) => {
                *left -= 1;
                false
            }
            None => false,
        }
    }
}

/// Mailer that keeps messages instead of sending them.
pub(crate) struct CapturingMailer {
    sent: Mutex<Vec<MailMessage>>,
    fail: bool,
}

impl CapturingMailer {
    pub(crate) fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Mailer for CapturingMailer {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        if self.fail {
            return Err(Error::MailTransport("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
