//! Error types for the shellaid-core library.
//!
//! Exit statuses of wrapped tools are plain `i32` values and never pass
//! through this type. Only local failures (bad input, spawn failures,
//! timeouts) are errors.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for shellaid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code for a poll that ran out of time (same as coreutils `timeout`).
pub const EXIT_TIMEOUT: i32 = 124;

/// Exit code when the program to run does not exist (as in POSIX shells).
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit code for an operation interrupted by the user.
pub const EXIT_CANCELLED: i32 = 130;

/// Errors that can occur while preparing or running a wrapped command.
#[derive(Error, Debug)]
pub enum Error {
    /// A required positional argument was not supplied.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// The path handed to `extract` is not an existing regular file.
    #[error("'{}' is not a valid file", .0.display())]
    NotAFile(PathBuf),

    /// No archive suffix matched the file name.
    #[error("'{}' cannot be extracted: unsupported format", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The `jrun` input does not end in `.java`.
    #[error("'{}' is not a java source file", .0.display())]
    NotJavaSource(PathBuf),

    /// A path cannot be passed to a tool without changing it.
    #[error("'{}' is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),

    /// A command string could not be split into tokens.
    #[error("cannot parse command '{input}': {reason}")]
    CommandParse { input: String, reason: String },

    /// Failed to spawn or wait on a child process.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// No mail recipient was configured.
    #[error("EMAIL is not set")]
    NoRecipient,

    /// The mail recipient contains control characters.
    #[error("invalid mail recipient {0:?}")]
    InvalidRecipient(String),

    /// The mail transport rejected or failed to send a message.
    #[error("mail transport failed: {0}")]
    MailTransport(String),

    /// The named screen session does not exist.
    #[error("no screen session named {0}")]
    NoSuchSession(String),

    /// A poll loop exceeded its deadline.
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// A poll loop was interrupted.
    #[error("interrupted")]
    Cancelled,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code to report for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnsupportedFormat(_) | Error::NotJavaSource(_) => 2,
            Error::Timeout(_) => EXIT_TIMEOUT,
            Error::Cancelled => EXIT_CANCELLED,
            Error::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                EXIT_NOT_FOUND
            }
            _ => 1,
        }
    }

    pub(crate) fn spawn(program: &str, source: std::io::Error) -> Self {
        Error::Spawn {
            program: program.to_string(),
            source,
        }
    }
}
