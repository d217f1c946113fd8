//! Error types for aggregation requests, per-file scans and store maintenance.

use std::io;
use std::path::PathBuf;

/// Why a single file could not contribute to an aggregation.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("cannot open: {0}")]
    Open(#[source] io::Error),

    #[error("read failed after {bytes} bytes: {source}")]
    Read {
        bytes: u64,
        #[source]
        source: io::Error,
    },

    #[error("scan abandoned: request cancelled")]
    Cancelled,
}

impl FileError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FileError::Cancelled)
    }
}

/// Request-level failure of a word-count or top-words query.
///
/// Per-file problems are not errors at this level (they travel in the result's
/// failure list) unless strict mode turns them into [`AggregateError::FileIo`].
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("cannot list directory {}: {source}", dir.display())]
    Directory {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("strict mode: {failed} file(s) failed to scan, first was {name}: {cause}")]
    FileIo {
        name: String,
        failed: usize,
        #[source]
        cause: FileError,
    },

    #[error("aggregation cancelled before every file was scanned")]
    Cancelled,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure of a store maintenance operation (add/update/remove/list).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("file already exists in the store: {0}")]
    AlreadyExists(String),

    #[error("not a valid store file name: {0:?}")]
    InvalidName(String),

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
