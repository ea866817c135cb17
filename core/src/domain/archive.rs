//! Archive format domain model.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{path_arg, CommandSpec};
use crate::error::Result;

/// Archive formats `extract` knows how to unpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArchiveFormat {
    TarBz2,
    TarGz,
    TarXz,
    Bz2,
    Rar,
    Gz,
    Tar,
    Tbz2,
    Tgz,
    Xz,
    Zip,
    Z,
    SevenZip,
}

impl ArchiveFormat {
    /// Formats in match order. Compound suffixes come before their parts,
    /// so `foo.tar.gz` is a `TarGz` and not a `Gz`.
    pub const ALL: [ArchiveFormat; 13] = [
        ArchiveFormat::TarBz2,
        ArchiveFormat::TarGz,
        ArchiveFormat::TarXz,
        ArchiveFormat::Bz2,
        ArchiveFormat::Rar,
        ArchiveFormat::Gz,
        ArchiveFormat::Tar,
        ArchiveFormat::Tbz2,
        ArchiveFormat::Tgz,
        ArchiveFormat::Xz,
        ArchiveFormat::Zip,
        ArchiveFormat::Z,
        ArchiveFormat::SevenZip,
    ];

    /// File name suffix, including the leading dot. Matching is case-sensitive.
    pub fn suffix(&self) -> &'static str {
        match self {
            ArchiveFormat::TarBz2 => ".tar.bz2",
            ArchiveFormat::TarGz => ".tar.gz",
            ArchiveFormat::TarXz => ".tar.xz",
            ArchiveFormat::Bz2 => ".bz2",
            ArchiveFormat::Rar => ".rar",
            ArchiveFormat::Gz => ".gz",
            ArchiveFormat::Tar => ".tar",
            ArchiveFormat::Tbz2 => ".tbz2",
            ArchiveFormat::Tgz => ".tgz",
            ArchiveFormat::Xz => ".xz",
            ArchiveFormat::Zip => ".zip",
            ArchiveFormat::Z => ".Z",
            ArchiveFormat::SevenZip => ".7z",
        }
    }

    /// Program and leading arguments; the archive path is appended last.
    pub fn tool(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            ArchiveFormat::TarBz2 | ArchiveFormat::Tbz2 => ("tar", &["xjf"]),
            ArchiveFormat::TarGz | ArchiveFormat::Tgz => ("tar", &["xzf"]),
            ArchiveFormat::TarXz => ("tar", &["xJf"]),
            ArchiveFormat::Tar => ("tar", &["xf"]),
            ArchiveFormat::Bz2 => ("bunzip2", &[]),
            ArchiveFormat::Rar => ("unrar", &["x"]),
            ArchiveFormat::Gz => ("gunzip", &[]),
            ArchiveFormat::Xz => ("unxz", &[]),
            ArchiveFormat::Zip => ("unzip", &[]),
            ArchiveFormat::Z => ("uncompress", &[]),
            ArchiveFormat::SevenZip => ("7z", &["x"]),
        }
    }

    /// Detect the format from a path's file name, first match wins.
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy();
        Self::ALL
            .iter()
            .copied()
            .find(|format| name.ends_with(format.suffix()))
    }

    /// The command that unpacks `path` in the current directory.
    pub fn command(&self, path: &Path) -> Result<CommandSpec> {
        let (program, args) = self.tool();
        Ok(CommandSpec::new(program)
            .args(args.iter().copied())
            .arg(path_arg(path)?))
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}
