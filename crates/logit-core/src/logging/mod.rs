//! Logging abstractions
//!
//! `Logger` is the small interface record writers implement and the channel
//! they use to report their own best-effort failures.

mod traits;
mod noop;
mod console;
mod memory;

pub use traits::{Logger, LoggerExt, BoxedLogger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use memory::MemoryLogger;
