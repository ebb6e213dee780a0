//! The per-type record writer
//!
//! A `RecordWriter` owns one open log file, formats each record with a
//! `RecordFormatter` and stamps it using a `Clock`.

mod error;
mod format;
mod clock;
mod rotation;
mod record_writer;

pub use error::{WriterError, WriterResult};
pub use format::{RecordFormatter, DefaultFormatter, TIMESTAMP_FORMAT};
pub use clock::{Clock, SystemClock, FixedClock};
pub use rotation::Rotator;
pub use record_writer::{RecordWriter, RecordWriterBuilder};
