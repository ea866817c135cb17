//! Archive extraction by file suffix.

use std::path::Path;

use tracing::{debug, info};

use crate::domain::{ArchiveFormat, CommandSpec};
use crate::error::{Error, Result};
use crate::ports::CommandRunner;

/// Unpacks archives with the matching system tool.
pub struct ExtractService<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> ExtractService<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Validate `path` and pick the extraction command.
    ///
    /// The file check comes first: a missing `foo.unknown` is "not a valid
    /// file", not "unsupported format".
    pub fn plan(path: &Path) -> Result<(ArchiveFormat, CommandSpec)> {
        if !path.is_file() {
            return Err(Error::NotAFile(path.to_path_buf()));
        }

        let format =
            ArchiveFormat::detect(path).ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))?;
        Ok((format, format.command(path)?))
    }

    /// Extract `path` into the current directory.
    pub async fn extract(&self, path: &Path) -> Result<i32> {
        let (format, cmd) = Self::plan(path)?;
        debug!(path = %path.display(), %format, "Detected archive format");

        let status = self.runner.run(&cmd).await?;
        info!(path = %path.display(), status, "Extraction finished");
        Ok(status)
    }
}
