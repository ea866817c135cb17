//! Compile a single Java source file and run its class.

use std::path::Path;

use crate::domain::{path_arg, CommandSpec};
use crate::error::{Error, Result};
use crate::ports::CommandRunner;

use super::run_sequence;

/// Runs `javac` and then `java` on one source file.
pub struct JavaService<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> JavaService<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Compile and run commands for `source`.
    pub fn steps(source: &Path, args: &[String]) -> Result<Vec<CommandSpec>> {
        let is_java = source.extension().is_some_and(|ext| ext == "java");
        let Some(stem) = source.file_stem().filter(|_| is_java) else {
            return Err(Error::NotJavaSource(source.to_path_buf()));
        };
        let class = path_arg(Path::new(stem))?;

        let class_dir = match source.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => path_arg(dir)?,
            _ => ".".to_string(),
        };

        Ok(vec![
            CommandSpec::new("javac").arg(path_arg(source)?),
            CommandSpec::new("java")
                .args(["-cp".to_string(), class_dir, class])
                .args(args.iter().cloned()),
        ])
    }

    /// Compile, then run if compilation succeeded.
    pub async fn run(&self, source: &Path, args: &[String]) -> Result<i32> {
        let steps = Self::steps(source, args)?;
        run_sequence(&self.runner, &steps).await
    }
}
