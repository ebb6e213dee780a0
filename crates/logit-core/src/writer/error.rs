//! Writer error types

use std::path::Path;

use thiserror::Error;

/// Errors raised by a `RecordWriter`
#[derive(Error, Debug)]
pub enum WriterError {
    /// Opening or writing the log file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The rotator refused the log file
    #[error("Rotation setup failed for {path}: {source}")]
    Rotation {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The writer was closed
    #[error("Writer closed: {path}")]
    Closed { path: String },
}

impl WriterError {
    /// Create a closed-writer error
    pub fn closed(path: &Path) -> Self {
        Self::Closed {
            path: path.display().to_string(),
        }
    }

    /// Create a rotation error
    pub fn rotation(path: &Path, source: std::io::Error) -> Self {
        Self::Rotation {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type WriterResult<T> = Result<T, WriterError>;
