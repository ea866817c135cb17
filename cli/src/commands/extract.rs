//! extract command - unpack an archive by suffix.

use std::path::PathBuf;

use anyhow::Result;
use shellaid_core::application::ExtractService;
use shellaid_core::{ArchiveFormat, Error};

pub async fn run(config_path: Option<PathBuf>, file: Option<PathBuf>) -> Result<i32> {
    let file = file.ok_or(Error::MissingArgument("FILE"))?;
    let settings = super::settings(config_path).await?;
    let service = ExtractService::new(super::runner(&settings));
    Ok(service.extract(&file).await?)
}

pub fn list_formats() -> Result<i32> {
    println!("{:<10} COMMAND", "SUFFIX");
    println!("{}", "-".repeat(30));
    for format in ArchiveFormat::ALL {
        let (program, args) = format.tool();
        let mut command = vec![program];
        command.extend_from_slice(args);
        command.push("FILE");
        println!("{:<10} {}", format.suffix(), command.join(" "));
    }
    Ok(0)
}
