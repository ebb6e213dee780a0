//! Resolution of writer options and log file paths

mod options_resolver;
mod framework;
mod path_resolver;

pub use options_resolver::OptionsResolver;
pub use framework::{FrameworkContext, ROOT_VAR, ENV_VAR, DEFAULT_ENVIRONMENT};
pub use path_resolver::PathResolver;
