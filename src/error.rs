//! Global error handling for flatdump
//!
//! This module provides the crate-wide error type and the structured
//! [`Failure`] record that recoverable errors are turned into.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Global error type for flatdump operations
#[derive(Error, Debug)]
pub enum FlatDumpError {
    /// A file could not be opened or decoded as UTF-8
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A destination file could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A destination directory could not be created
    #[error("Failed to create directory {}: {source}", .path.display())]
    DirCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input path does not exist or has the wrong type
    #[error("Path not found: {0}")]
    NotFound(String),

    /// Directory walking errors
    #[error("Walk error: {0}")]
    Walk(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<walkdir::Error> for FlatDumpError {
    fn from(err: walkdir::Error) -> Self {
        FlatDumpError::Walk(err.to_string())
    }
}

/// Specialized Result type for flatdump operations
pub type Result<T> = std::result::Result<T, FlatDumpError>;

/// Creates a FlatDumpError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::FlatDumpError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Category of a recorded failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Source file could not be read
    Read,
    /// Output could not be written
    Write,
    /// Input path missing
    NotFound,
    /// Directory could not be listed during a walk
    Scan,
    /// Two groups mapped to the same output file
    Collision,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Read => "read",
            FailureKind::Write => "write",
            FailureKind::NotFound => "not-found",
            FailureKind::Scan => "scan",
            FailureKind::Collision => "collision",
        };
        f.write_str(name)
    }
}

/// A recoverable error, recorded instead of aborting the batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// What went wrong
    pub kind: FailureKind,
    /// The offending path
    pub path: PathBuf,
    /// Human readable cause
    pub message: String,
}

impl Failure {
    /// Create a failure record
    pub fn new(kind: FailureKind, path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Record a walk error, falling back to `fallback` when it has no path
    pub fn from_walk(err: &walkdir::Error, fallback: &Path) -> Self {
        let path = err.path().unwrap_or(fallback);
        Self::new(FailureKind::Scan, path, err.to_string())
    }

    /// Record `err`, attributing it to `fallback` when it names no path itself
    pub fn from_error(err: &FlatDumpError, fallback: &Path) -> Self {
        let (kind, path) = match err {
            FlatDumpError::Read { path, .. } => (FailureKind::Read, path.clone()),
            FlatDumpError::Write { path, .. } | FlatDumpError::DirCreation { path, .. } => {
                (FailureKind::Write, path.clone())
            }
            FlatDumpError::NotFound(path) => (FailureKind::NotFound, PathBuf::from(path)),
            _ => (FailureKind::Scan, fallback.to_path_buf()),
        };
        Failure {
            kind,
            path,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.path.display(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_from_read_error() {
        let err = FlatDumpError::Read {
            path: PathBuf::from("src/Foo.java"),
            source: io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        };
        let failure = Failure::from_error(&err, Path::new("src"));

        assert_eq!(failure.kind, FailureKind::Read);
        assert_eq!(failure.path, PathBuf::from("src/Foo.java"));
        assert!(failure.message.contains("valid UTF-8"));
    }

    #[test]
    fn test_pathless_error_uses_fallback() {
        let err = error!(Walk, "IO error for operation on /src/app: Permission denied");
        let failure = Failure::from_error(&err, Path::new("/src/app"));

        assert_eq!(failure.kind, FailureKind::Scan);
        assert_eq!(failure.path, PathBuf::from("/src/app"));
        assert!(failure.message.contains("Permission denied"));
    }

    #[test]
    fn test_error_macro_formats_message() {
        let err = error!(NotFound, "missing {}", "dir");
        assert_eq!(err.to_string(), "Path not found: missing dir");
    }

    #[test]
    fn test_failure_display() {
        let failure = Failure::new(FailureKind::Collision, "out/util.txt", "already written");
        assert_eq!(failure.to_string(), "[collision] out/util.txt: already written");
    }
}
