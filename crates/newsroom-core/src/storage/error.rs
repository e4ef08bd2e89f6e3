//! Storage errors
//!
//! Every failure names the file involved. I/O errors are sorted into the
//! few cases an editor can act on (permissions, a full disk) and the rest.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// What the store was doing when an I/O error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Operation::Read => "read",
            Operation::Write => "write",
        })
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Cannot create the data directory {path:?}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No permission to {op} {path:?}")]
    PermissionDenied {
        op: Operation,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Out of space saving {path:?}")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write {path:?}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Keys become file names
    #[error("'{0}' is not a storage key (letters, digits, '_' and '-' only)")]
    InvalidKey(String),

    /// The temp file was written but could not replace the old one
    #[error("Could not move {from:?} over {to:?}: {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Storage is unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Classify an I/O error raised while doing `op` on `path`
    pub fn io(op: Operation, error: io::Error, path: PathBuf) -> Self {
        if error.kind() == io::ErrorKind::PermissionDenied {
            return StorageError::PermissionDenied {
                op,
                path,
                source: error,
            };
        }
        match op {
            Operation::Write if out_of_space(&error) => StorageError::DiskFull {
                path,
                source: error,
            },
            Operation::Write => StorageError::WriteError {
                path,
                source: error,
            },
            Operation::Read => StorageError::ReadError {
                path,
                source: error,
            },
        }
    }

    /// Hint for the editor, when there is something they can do
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("free some disk space; unsaved changes stay in memory until exit"),
            StorageError::PermissionDenied { .. } | StorageError::CreateDirectory { .. } => {
                Some("set data_dir to a writable directory (newsroom config set data_dir <path>)")
            }
            _ => None,
        }
    }
}

fn out_of_space(error: &io::Error) -> bool {
    // ENOSPC / EDQUOT
    if matches!(error.raw_os_error(), Some(28) | Some(122)) {
        return true;
    }
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left") || msg.contains("quota exceeded")
}

pub type StorageResult<T> = Result<T, StorageError>;
