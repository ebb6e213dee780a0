//! Writer configuration types
//!
//! Options are assembled from layers. Each `OptionsLayer` only carries the
//! fields it sets; merging applies later layers over earlier ones and the
//! result is validated into an immutable `WriterOptions`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::severity::Severity;
use crate::config::{ConfigError, ConfigResult};

/// Accessor name used when none is configured
pub const DEFAULT_ACCESSOR: &str = "logger";

/// How the log file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Keep existing content and append records
    #[default]
    #[serde(alias = "a")]
    Append,
    /// Discard existing content on open
    #[serde(alias = "w")]
    Truncate,
}

impl FromStr for WriteMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "append" | "a" => Ok(WriteMode::Append),
            "truncate" | "w" => Ok(WriteMode::Truncate),
            _ => Err(ConfigError::invalid_value("write_mode", s)),
        }
    }
}

/// When buffered bytes are pushed to the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlushMode {
    /// Rely on buffering; bytes reach the OS on `flush()`, buffer overflow or drop
    #[default]
    Default,
    /// Flush after every record before `write()` returns
    Immediate,
}

impl FromStr for FlushMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(FlushMode::Default),
            "immediate" => Ok(FlushMode::Immediate),
            _ => Err(ConfigError::invalid_value("flush_mode", s)),
        }
    }
}

/// Age component of a rotation hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ShiftAgeRepr", into = "ShiftAgeRepr")]
pub enum ShiftAge {
    /// Number of old files to keep
    Count(u32),
    Daily,
    Weekly,
    Monthly,
}

impl ShiftAge {
    pub fn is_periodic(&self) -> bool {
        !matches!(self, ShiftAge::Count(_))
    }
}

impl fmt::Display for ShiftAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftAge::Count(n) => write!(f, "{}", n),
            ShiftAge::Daily => write!(f, "daily"),
            ShiftAge::Weekly => write!(f, "weekly"),
            ShiftAge::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for ShiftAge {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        match value.as_str() {
            "daily" => Ok(ShiftAge::Daily),
            "weekly" => Ok(ShiftAge::Weekly),
            "monthly" => Ok(ShiftAge::Monthly),
            _ => value
                .parse::<u32>()
                .map(ShiftAge::Count)
                .map_err(|_| ConfigError::invalid_value("shift_age", s)),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ShiftAgeRepr {
    Count(u32),
    Period(String),
}

impl TryFrom<ShiftAgeRepr> for ShiftAge {
    type Error = ConfigError;

    fn try_from(repr: ShiftAgeRepr) -> Result<Self, Self::Error> {
        match repr {
            ShiftAgeRepr::Count(n) => Ok(ShiftAge::Count(n)),
            ShiftAgeRepr::Period(s) => s.parse(),
        }
    }
}

impl From<ShiftAge> for ShiftAgeRepr {
    fn from(age: ShiftAge) -> Self {
        match age {
            ShiftAge::Count(n) => ShiftAgeRepr::Count(n),
            other => ShiftAgeRepr::Period(other.to_string()),
        }
    }
}

/// Rotation settings handed to an external rotator
///
/// The writer never rotates files itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RotationHint {
    /// Number of files to keep, or rotation period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_age: Option<ShiftAge>,
    /// Maximum file size in bytes; only meaningful for count-based ages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_size: Option<u64>,
}

impl RotationHint {
    pub fn new(shift_age: ShiftAge) -> Self {
        Self {
            shift_age: Some(shift_age),
            shift_size: None,
        }
    }

    pub fn with_shift_size(mut self, bytes: u64) -> Self {
        self.shift_size = Some(bytes);
        self
    }

    fn validate(&self) -> ConfigResult<()> {
        if let (Some(age), Some(_)) = (self.shift_age, self.shift_size) {
            if age.is_periodic() {
                return Err(ConfigError::invalid_combination(format!(
                    "shift_size only applies to count-based rotation, not '{}'",
                    age
                )));
            }
        }
        Ok(())
    }
}

/// A partial set of options
///
/// Every field is optional; unset fields fall through to earlier layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_mode: Option<WriteMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flush_mode: Option<FlushMode>,
    #[serde(default, alias = "stdout", skip_serializing_if = "Option::is_none")]
    pub mirror_to_console: Option<bool>,
    #[serde(default, alias = "progname", skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,
    #[serde(default, alias = "rotation", skip_serializing_if = "Option::is_none")]
    pub rotation_hint: Option<RotationHint>,
    #[serde(default, alias = "log_method", skip_serializing_if = "Option::is_none")]
    pub accessor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Severity>,
}

impl OptionsLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = Some(mode);
        self
    }

    pub fn flush_mode(mut self, mode: FlushMode) -> Self {
        self.flush_mode = Some(mode);
        self
    }

    pub fn mirror_to_console(mut self, enabled: bool) -> Self {
        self.mirror_to_console = Some(enabled);
        self
    }

    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }

    pub fn rotation_hint(mut self, hint: RotationHint) -> Self {
        self.rotation_hint = Some(hint);
        self
    }

    pub fn accessor_name(mut self, name: impl Into<String>) -> Self {
        self.accessor_name = Some(name.into());
        self
    }

    pub fn level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }

    /// Check whether no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply `over` on top of this layer; fields set in `over` win
    pub fn merge(self, over: OptionsLayer) -> OptionsLayer {
        OptionsLayer {
            write_mode: over.write_mode.or(self.write_mode),
            flush_mode: over.flush_mode.or(self.flush_mode),
            mirror_to_console: over.mirror_to_console.or(self.mirror_to_console),
            program_name: over.program_name.or(self.program_name),
            rotation_hint: over.rotation_hint.or(self.rotation_hint),
            accessor_name: over.accessor_name.or(self.accessor_name),
            level: over.level.or(self.level),
        }
    }
}

/// Fully resolved writer configuration
///
/// Built once when a writer is attached and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriterOptions {
    pub write_mode: WriteMode,
    pub flush_mode: FlushMode,
    pub mirror_to_console: bool,
    pub program_name: Option<String>,
    pub rotation_hint: Option<RotationHint>,
    pub accessor_name: String,
    /// Minimum severity that reaches the file
    pub level: Severity,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            write_mode: WriteMode::Append,
            flush_mode: FlushMode::Default,
            mirror_to_console: false,
            program_name: None,
            rotation_hint: None,
            accessor_name: DEFAULT_ACCESSOR.to_string(),
            level: Severity::Debug,
        }
    }
}

impl WriterOptions {
    /// Apply a layer over the defaults and validate the result
    pub fn from_layer(layer: OptionsLayer) -> ConfigResult<Self> {
        let defaults = Self::default();
        let options = Self {
            write_mode: layer.write_mode.unwrap_or(defaults.write_mode),
            flush_mode: layer.flush_mode.unwrap_or(defaults.flush_mode),
            mirror_to_console: layer.mirror_to_console.unwrap_or(defaults.mirror_to_console),
            program_name: layer.program_name.filter(|p| !p.is_empty()),
            rotation_hint: layer.rotation_hint,
            accessor_name: layer.accessor_name.unwrap_or(defaults.accessor_name),
            level: layer.level.unwrap_or(defaults.level),
        };
        options.validate()?;
        Ok(options)
    }

    /// Merge layers in order over the defaults
    pub fn resolve<I>(layers: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = OptionsLayer>,
    {
        let merged = layers
            .into_iter()
            .fold(OptionsLayer::default(), OptionsLayer::merge);
        Self::from_layer(merged)
    }

    fn validate(&self) -> ConfigResult<()> {
        if !is_identifier(&self.accessor_name) {
            return Err(ConfigError::invalid_value("accessor_name", &self.accessor_name));
        }
        if let Some(hint) = &self.rotation_hint {
            hint.validate()?;
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
