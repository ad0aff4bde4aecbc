//! CLI errors.
//!
//! The analysis crates never fail; everything that can go wrong here is
//! about the command line or the file system.

use std::io;
use std::path::{Path, PathBuf};

/// An error that stops a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot find '{}'", .0.display())]
    NotFound(PathBuf),
    #[error("permission denied reading '{}'", .0.display())]
    PermissionDenied(PathBuf),
    #[error("'{}' contains invalid UTF-8 data", .0.display())]
    InvalidUtf8(PathBuf),
    #[error("error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Classify an I/O failure on `path`.
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        let path = path.to_path_buf();
        match error.kind() {
            io::ErrorKind::NotFound => CliError::NotFound(path),
            io::ErrorKind::PermissionDenied => CliError::PermissionDenied(path),
            io::ErrorKind::InvalidData => CliError::InvalidUtf8(path),
            _ => CliError::Io {
                path,
                source: error,
            },
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }

    /// Usage errors print the usage text after the message.
    pub fn is_usage(&self) -> bool {
        matches!(self, CliError::Usage(_))
    }
}
