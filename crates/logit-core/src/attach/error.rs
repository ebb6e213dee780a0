//! Attachment error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::writer::WriterError;

/// Errors returned when attaching or fetching a per-type writer
#[derive(Error, Debug)]
pub enum AttachError {
    /// Options could not be resolved
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The writer could not be opened
    #[error(transparent)]
    Writer(#[from] WriterError),

    /// No log was attached to this type
    #[error("No log attached to {host}")]
    NotAttached { host: &'static str },
}

pub type AttachResult<T> = Result<T, AttachError>;
