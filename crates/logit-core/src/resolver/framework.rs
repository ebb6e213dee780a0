//! Host framework detection
//!
//! A host web framework dictates where named logs live. Detection happens
//! once, at startup, and the result is handed to the `PathResolver`.

/// Root directory variable of the host framework
pub const ROOT_VAR: &str = "APP_ROOT";
/// Environment name variable of the host framework
pub const ENV_VAR: &str = "APP_ENV";
/// Environment name used when `APP_ENV` is unset
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Whether a host framework is present, and its layout if so
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FrameworkContext {
    #[default]
    Absent,
    Present {
        /// Application root directory
        root: String,
        /// Environment name (development, production, ...)
        environment: String,
    },
}

impl FrameworkContext {
    pub fn present(root: impl Into<String>, environment: impl Into<String>) -> Self {
        Self::Present {
            root: root.into(),
            environment: environment.into(),
        }
    }

    /// Detect the framework from the process environment
    ///
    /// Absence is a normal outcome, never an error.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(ROOT_VAR).ok(),
            std::env::var(ENV_VAR).ok(),
        )
    }

    fn from_vars(root: Option<String>, environment: Option<String>) -> Self {
        let root = match root.map(|r| r.trim().to_string()) {
            Some(r) if !r.is_empty() => r,
            _ => return Self::Absent,
        };
        let environment = environment
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        Self::Present { root, environment }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present { .. })
    }
}
