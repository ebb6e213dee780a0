//! Logit Core
//!
//! Per-type file loggers. A host type is attached to a named log once; the
//! first time its accessor is called the log path is resolved, options are
//! merged from their layers, and a `RecordWriter` is opened and shared by
//! every later call.
//!
//! ## Path resolution
//!
//! - `"/var/log/publisher"` is used as given: `/var/log/publisher.log`
//! - `"publisher"` under a host framework (`APP_ROOT`/`APP_ENV`) becomes
//!   `<root>/log/publisher_<env>.log`
//! - `"publisher"` otherwise becomes `publisher.log` in the working directory
//!
//! ## Record format
//!
//! ```text
//! 01-02-2024 03:04:05 INFO   [Publisher]: doing something
//! ```
//!
//! ```rust,ignore
//! use logit_core::{logs_to, Severity};
//! use logit_core::types::OptionsLayer;
//!
//! struct Publisher;
//! logs_to!(Publisher, "publisher", logger, OptionsLayer::new().program_name("Publisher"));
//!
//! Publisher.logger()?.log(Severity::Info, "doing something")?;
//! ```

pub mod types;
pub mod config;
pub mod logging;
pub mod resolver;
pub mod writer;
pub mod attach;

// Re-export commonly used types
pub use types::{
    Severity, WriteMode, FlushMode, ShiftAge, RotationHint,
    OptionsLayer, WriterOptions,
};

pub use config::{
    OptionsSource, ConfigError, ConfigResult,
    MemoryOptionsSource, FileOptionsSource, EnvOptionsSource,
};

pub use logging::{Logger, LoggerExt, SharedLogger, NoOpLogger, ConsoleLogger, MemoryLogger};

pub use resolver::{OptionsResolver, FrameworkContext, PathResolver};

pub use writer::{
    RecordWriter, RecordWriterBuilder, WriterError, WriterResult,
    RecordFormatter, DefaultFormatter, Clock, SystemClock, FixedClock, Rotator,
};

pub use attach::{AttachmentRegistry, Registration, AttachError, AttachResult};
