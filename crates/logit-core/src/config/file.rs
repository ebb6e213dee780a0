//! File-based options source (YAML or JSON)
//!
//! Supports user-level (~/.config/logit/config.yaml) and workspace-level
//! (.config/logit/config.yaml) files.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::traits::{ConfigError, ConfigResult, OptionsSource};
use crate::types::OptionsLayer;

/// Config level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    /// User-level config (~/.config/logit/config.yaml)
    User,
    /// Workspace-level config (.config/logit/config.yaml in workspace root)
    Workspace,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::User => "user",
            ConfigLevel::Workspace => "workspace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

/// File-based options source
///
/// The format follows the extension: `.json` is parsed as JSON, anything
/// else as YAML. A missing file contributes an empty layer.
///
/// # Example
///
/// ```no_run
/// use logit_core::config::FileOptionsSource;
///
/// let user = FileOptionsSource::user();
/// let workspace = FileOptionsSource::workspace("/path/to/workspace");
/// ```
pub struct FileOptionsSource {
    path: PathBuf,
    level: ConfigLevel,
    cache: RwLock<Option<OptionsLayer>>,
}

impl FileOptionsSource {
    /// Create a source for a specific path
    pub fn new(path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        Self {
            path: path.into(),
            level,
            cache: RwLock::new(None),
        }
    }

    /// Create a user-level source (~/.config/logit/config.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("logit").join("config.yaml"), ConfigLevel::User)
    }

    /// Create a workspace-level source (.config/logit/config.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root.as_ref().join(".config").join("logit").join("config.yaml");
        Self::new(path, ConfigLevel::Workspace)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> ConfigResult<OptionsLayer> {
        if !self.path.exists() {
            return Ok(OptionsLayer::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(OptionsLayer::default());
        }

        let display = self.path.display().to_string();
        match FileFormat::of(&self.path) {
            FileFormat::Json => serde_json::from_str(&content).map_err(|e| ConfigError::parse(display, e)),
            FileFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| ConfigError::parse(display, e)),
        }
    }

    /// Write a layer to the file, creating parent directories as needed
    pub fn save(&self, layer: &OptionsLayer) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = match FileFormat::of(&self.path) {
            FileFormat::Json => serde_json::to_string_pretty(layer)?,
            FileFormat::Yaml => serde_yaml::to_string(layer)
                .map_err(|e| ConfigError::Other(format!("Failed to serialize YAML: {}", e)))?,
        };
        fs::write(&self.path, content)?;

        let mut cache = self.cache.write();
        *cache = Some(layer.clone());
        Ok(())
    }

    /// Reload from disk, dropping the cached layer
    pub fn reload(&self) -> ConfigResult<OptionsLayer> {
        let layer = self.load()?;
        let mut cache = self.cache.write();
        *cache = Some(layer.clone());
        Ok(layer)
    }

    /// Export the current layer as JSON
    pub fn export_json(&self) -> ConfigResult<String> {
        let layer = self.layer()?;
        Ok(serde_json::to_string_pretty(&layer)?)
    }
}

impl std::fmt::Debug for FileOptionsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileOptionsSource")
            .field("path", &self.path)
            .field("level", &self.level)
            .field("exists", &self.exists())
            .finish()
    }
}

impl OptionsSource for FileOptionsSource {
    fn name(&self) -> &str {
        self.level.as_str()
    }

    fn layer(&self) -> ConfigResult<OptionsLayer> {
        let cache = self.cache.read();
        if let Some(layer) = cache.as_ref() {
            return Ok(layer.clone());
        }
        drop(cache);

        self.reload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FlushMode, Severity, WriteMode};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let source = FileOptionsSource::new(dir.path().join("config.yaml"), ConfigLevel::User);
        assert!(!source.exists());
        assert!(source.layer().unwrap().is_empty());
    }

    #[test]
    fn test_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "write_mode: w\nlevel: info\n").unwrap();

        let source = FileOptionsSource::new(&path, ConfigLevel::User);
        let layer = source.layer().unwrap();
        assert_eq!(layer.write_mode, Some(WriteMode::Truncate));
        assert_eq!(layer.level, Some(Severity::Info));
    }

    #[test]
    fn test_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"flush_mode": "immediate", "progname": "svc"}"#).unwrap();

        let layer = FileOptionsSource::new(&path, ConfigLevel::Workspace).layer().unwrap();
        assert_eq!(layer.flush_mode, Some(FlushMode::Immediate));
        assert_eq!(layer.program_name.as_deref(), Some("svc"));
    }

    #[test]
    fn test_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "flush_mode: eventually\n").unwrap();

        let result = FileOptionsSource::new(&path, ConfigLevel::User).layer();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let source = FileOptionsSource::workspace(dir.path());
        let layer = OptionsLayer::new().mirror_to_console(true).accessor_name("audit");

        source.save(&layer).unwrap();
        assert!(source.exists());
        assert_eq!(source.reload().unwrap(), layer);

        let json = source.export_json().unwrap();
        assert!(json.contains("\"accessor_name\": \"audit\""));
    }
}
