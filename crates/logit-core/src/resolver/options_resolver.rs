//! Layered option resolution
//!
//! Source priority (later sources override earlier):
//! 1. Built-in defaults
//! 2. Registered sources, in registration order
//! 3. The explicit layer passed by the caller
//!
//! Resolution runs once per attachment; the resulting `WriterOptions` never
//! changes afterwards.

use std::sync::Arc;

use crate::config::{ConfigResult, EnvOptionsSource, FileOptionsSource, OptionsSource};
use crate::types::{OptionsLayer, WriterOptions};

/// Merges option layers from an ordered list of sources
#[derive(Clone, Default)]
pub struct OptionsResolver {
    sources: Vec<Arc<dyn OptionsSource>>,
}

impl OptionsResolver {
    /// Create a resolver with no sources (defaults + explicit layer only)
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard stack: user config file, then `LOGIT_*` environment variables
    pub fn with_default_sources() -> Self {
        Self::new()
            .with_source(Arc::new(FileOptionsSource::user()))
            .with_source(Arc::new(EnvOptionsSource::new()))
    }

    /// Add a source; it overrides every source added before it
    pub fn with_source(mut self, source: Arc<dyn OptionsSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Names of the registered sources, lowest priority first
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    /// Merge all source layers without validating
    pub fn merged_layer(&self, explicit: OptionsLayer) -> ConfigResult<OptionsLayer> {
        let mut merged = OptionsLayer::default();
        for source in &self.sources {
            merged = merged.merge(source.layer()?);
        }
        Ok(merged.merge(explicit))
    }

    /// Resolve the final options for one writer
    pub fn resolve(&self, explicit: OptionsLayer) -> ConfigResult<WriterOptions> {
        WriterOptions::from_layer(self.merged_layer(explicit)?)
    }
}

impl std::fmt::Debug for OptionsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionsResolver")
            .field("sources", &self.source_names())
            .finish()
    }
}
