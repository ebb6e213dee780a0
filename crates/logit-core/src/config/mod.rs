//! Options sources
//!
//! Writer options are merged from several layers:
//! - `MemoryOptionsSource`: In-memory for programmatic defaults and tests
//! - `FileOptionsSource`: YAML/JSON file (user/workspace level)
//! - `EnvOptionsSource`: `LOGIT_*` environment variables

mod traits;
mod memory;
mod file;
mod env;

pub use traits::{OptionsSource, ConfigError, ConfigResult};
pub use memory::MemoryOptionsSource;
pub use file::{FileOptionsSource, ConfigLevel};
pub use env::{
    EnvOptionsSource,
    LEVEL_VAR, FLUSH_MODE_VAR, WRITE_MODE_VAR, STDOUT_VAR, PROGNAME_VAR,
};
