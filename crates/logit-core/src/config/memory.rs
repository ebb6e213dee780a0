//! In-memory options source

use parking_lot::RwLock;

use super::traits::{ConfigResult, OptionsSource};
use crate::types::OptionsLayer;

/// In-memory options source
///
/// Handy for programmatic defaults shared by several attachments, and in tests.
#[derive(Debug, Default)]
pub struct MemoryOptionsSource {
    layer: RwLock<OptionsLayer>,
}

impl MemoryOptionsSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source holding `layer`
    pub fn with_layer(layer: OptionsLayer) -> Self {
        Self {
            layer: RwLock::new(layer),
        }
    }

    /// Replace the stored layer
    pub fn set_layer(&self, layer: OptionsLayer) {
        let mut guard = self.layer.write();
        *guard = layer;
    }

    /// Clear all stored options
    pub fn clear(&self) {
        self.set_layer(OptionsLayer::default());
    }
}

impl OptionsSource for MemoryOptionsSource {
    fn name(&self) -> &str {
        "memory"
    }

    fn layer(&self) -> ConfigResult<OptionsLayer> {
        let guard = self.layer.read();
        Ok(guard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlushMode;

    #[test]
    fn test_memory_source() {
        let source = MemoryOptionsSource::new();
        assert!(source.layer().unwrap().is_empty());

        source.set_layer(OptionsLayer::new().flush_mode(FlushMode::Immediate));
        assert_eq!(source.layer().unwrap().flush_mode, Some(FlushMode::Immediate));

        source.clear();
        assert!(source.layer().unwrap().is_empty());
    }
}
