//! Environment variable options source

use std::collections::HashMap;

use super::traits::{ConfigError, ConfigResult, OptionsSource};
use crate::types::OptionsLayer;

/// Minimum severity (`debug`, `info`, ...)
pub const LEVEL_VAR: &str = "LOGIT_LEVEL";
/// `default` or `immediate`
pub const FLUSH_MODE_VAR: &str = "LOGIT_FLUSH_MODE";
/// `append` or `truncate`
pub const WRITE_MODE_VAR: &str = "LOGIT_WRITE_MODE";
/// Mirror records to stdout (`1`/`true`/`0`/`false`)
pub const STDOUT_VAR: &str = "LOGIT_STDOUT";
/// Program name included in every line
pub const PROGNAME_VAR: &str = "LOGIT_PROGNAME";

/// Reads options from `LOGIT_*` environment variables
///
/// Unset variables leave the field unset. A variable that is set but cannot
/// be parsed is a configuration error.
#[derive(Debug, Default)]
pub struct EnvOptionsSource {
    /// Fixed variables for tests; `None` reads the process environment
    vars: Option<HashMap<String, String>>,
}

impl EnvOptionsSource {
    /// Read from the process environment
    pub fn new() -> Self {
        Self { vars: None }
    }

    /// Read from a fixed set of variables
    pub fn with_vars(vars: HashMap<String, String>) -> Self {
        Self { vars: Some(vars) }
    }

    fn var(&self, key: &str) -> Option<String> {
        let value = match &self.vars {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

fn parse_bool(field: &'static str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_value(field, value)),
    }
}

impl OptionsSource for EnvOptionsSource {
    fn name(&self) -> &str {
        "env"
    }

    fn layer(&self) -> ConfigResult<OptionsLayer> {
        Ok(OptionsLayer {
            level: self.var(LEVEL_VAR).map(|v| v.parse()).transpose()?,
            flush_mode: self.var(FLUSH_MODE_VAR).map(|v| v.parse()).transpose()?,
            write_mode: self.var(WRITE_MODE_VAR).map(|v| v.parse()).transpose()?,
            mirror_to_console: self
                .var(STDOUT_VAR)
                .map(|v| parse_bool("mirror_to_console", &v))
                .transpose()?,
            program_name: self.var(PROGNAME_VAR),
            ..OptionsLayer::default()
        })
    }
}
