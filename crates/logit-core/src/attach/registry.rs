//! Per-type writer registry
//!
//! Each host type gets at most one registration, keyed by `TypeId`. Options
//! and the log path are resolved when the type is attached; the writer itself
//! is opened the first time it is requested and shared from then on.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;

use super::error::{AttachError, AttachResult};
use crate::logging::SharedLogger;
use crate::resolver::{FrameworkContext, OptionsResolver, PathResolver};
use crate::types::{OptionsLayer, WriterOptions};
use crate::writer::{RecordWriter, Rotator};

/// One attached host type
#[derive(Debug)]
pub struct Registration {
    host: &'static str,
    name: String,
    path: String,
    options: WriterOptions,
    writer: OnceCell<Arc<RecordWriter>>,
}

impl Registration {
    /// Type name of the host
    pub fn host(&self) -> &'static str {
        self.host
    }

    /// Logical log name given at attachment
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved log file path
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    pub fn accessor_name(&self) -> &str {
        &self.options.accessor_name
    }

    /// Whether the writer has been opened yet
    pub fn is_open(&self) -> bool {
        self.writer.get().is_some()
    }
}

/// Registry of per-type writers
///
/// # Example
///
/// ```no_run
/// use logit_core::attach::AttachmentRegistry;
/// use logit_core::resolver::FrameworkContext;
/// use logit_core::types::OptionsLayer;
///
/// struct Publisher;
///
/// let registry = AttachmentRegistry::new(FrameworkContext::from_env());
/// registry.attach::<Publisher>("publisher", OptionsLayer::new().program_name("Publisher"))?;
///
/// let logger = registry.writer::<Publisher>()?;
/// logger.log(logit_core::Severity::Info, "doing something")?;
/// # Ok::<(), logit_core::attach::AttachError>(())
/// ```
pub struct AttachmentRegistry {
    paths: PathResolver,
    options: OptionsResolver,
    rotator: Option<Arc<dyn Rotator>>,
    diagnostics: Option<SharedLogger>,
    entries: RwLock<HashMap<TypeId, Arc<Registration>>>,
}

impl AttachmentRegistry {
    /// Create a registry with no option sources besides the explicit layer
    pub fn new(framework: FrameworkContext) -> Self {
        Self {
            paths: PathResolver::new(framework),
            options: OptionsResolver::new(),
            rotator: None,
            diagnostics: None,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Use `resolver` to merge options for every attachment
    pub fn with_options_resolver(mut self, resolver: OptionsResolver) -> Self {
        self.options = resolver;
        self
    }

    /// Hand rotation hints to `rotator` when writers open
    pub fn with_rotator(mut self, rotator: Arc<dyn Rotator>) -> Self {
        self.rotator = Some(rotator);
        self
    }

    /// Diagnostics logger given to every writer
    pub fn with_diagnostics(mut self, logger: SharedLogger) -> Self {
        self.diagnostics = Some(logger);
        self
    }

    pub fn path_resolver(&self) -> &PathResolver {
        &self.paths
    }

    /// Attach a named log to `T`
    ///
    /// Options and path are resolved here, so configuration errors surface
    /// at attachment. Attaching a type twice keeps the first registration.
    pub fn attach<T: 'static>(&self, name: &str, layer: OptionsLayer) -> AttachResult<Arc<Registration>> {
        if let Some(existing) = self.registration::<T>() {
            return Ok(existing);
        }

        let options = self.options.resolve(layer)?;
        let registration = Arc::new(Registration {
            host: type_name::<T>(),
            name: name.trim().to_string(),
            path: self.paths.resolve(name),
            options,
            writer: OnceCell::new(),
        });

        let mut entries = self.entries.write();
        Ok(entries
            .entry(TypeId::of::<T>())
            .or_insert(registration)
            .clone())
    }

    /// The writer for `T`, opening it on first use
    ///
    /// Concurrent first calls open the file once. If opening fails the error
    /// is returned and the next call tries again.
    pub fn writer<T: 'static>(&self) -> AttachResult<Arc<RecordWriter>> {
        let registration = self
            .registration::<T>()
            .ok_or(AttachError::NotAttached { host: type_name::<T>() })?;
        self.open(&registration)
    }

    /// Attach on first call, then return the shared writer
    pub fn get_or_attach<T: 'static>(&self, name: &str, layer: OptionsLayer) -> AttachResult<Arc<RecordWriter>> {
        let registration = match self.registration::<T>() {
            Some(registration) => registration,
            None => self.attach::<T>(name, layer)?,
        };
        self.open(&registration)
    }

    pub fn registration<T: 'static>(&self) -> Option<Arc<Registration>> {
        self.entries.read().get(&TypeId::of::<T>()).cloned()
    }

    pub fn is_attached<T: 'static>(&self) -> bool {
        self.entries.read().contains_key(&TypeId::of::<T>())
    }

    /// Accessor name configured for `T`
    pub fn accessor_name<T: 'static>(&self) -> Option<String> {
        self.registration::<T>().map(|r| r.accessor_name().to_string())
    }

    /// Resolved log path for `T`
    pub fn path<T: 'static>(&self) -> Option<String> {
        self.registration::<T>().map(|r| r.path().to_string())
    }

    /// Number of attached types
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn open(&self, registration: &Registration) -> AttachResult<Arc<RecordWriter>> {
        let writer = registration.writer.get_or_try_init(|| {
            let mut builder = RecordWriter::builder(&registration.path, registration.options.clone());
            if let Some(rotator) = &self.rotator {
                builder = builder.rotator(Arc::clone(rotator));
            }
            if let Some(diagnostics) = &self.diagnostics {
                builder = builder.diagnostics(Arc::clone(diagnostics));
            }
            builder.open().map(Arc::new)
        })?;
        Ok(Arc::clone(writer))
    }
}

impl std::fmt::Debug for AttachmentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentRegistry")
            .field("framework", self.paths.framework())
            .field("options", &self.options)
            .field("attached", &self.len())
            .finish()
    }
}

/// Process-wide registry
///
/// Framework detection and the default option sources (user config file,
/// then `LOGIT_*` variables) are read once, on first use.
static GLOBAL: Lazy<AttachmentRegistry> = Lazy::new(|| {
    AttachmentRegistry::new(FrameworkContext::from_env())
        .with_options_resolver(OptionsResolver::with_default_sources())
});

/// The process-wide registry used by `logs_to!`
pub fn global() -> &'static AttachmentRegistry {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;

    use tempfile::tempdir;

    use crate::config::{ConfigError, MemoryOptionsSource};
    use crate::logging::NoOpLogger;
    use crate::types::{FlushMode, Severity};
    use crate::writer::WriterError;

    struct Publisher;
    struct Subscriber;

    fn registry(root: &std::path::Path) -> AttachmentRegistry {
        AttachmentRegistry::new(FrameworkContext::present(root.display().to_string(), "test"))
            .with_diagnostics(Arc::new(NoOpLogger))
    }

    #[test]
    fn test_attach_resolves_path_and_options() {
        let dir = tempdir().unwrap();
        let registry = registry(dir.path());

        let registration = registry
            .attach::<Publisher>("publisher", OptionsLayer::new().accessor_name("pub_log"))
            .unwrap();

        assert_eq!(
            registration.path(),
            format!("{}/log/publisher_test.log", dir.path().display())
        );
        assert_eq!(registration.accessor_name(), "pub_log");
        assert_eq!(registration.name(), "publisher");
        assert!(registration.host().ends_with("Publisher"));
        assert!(!registration.is_open());
        assert!(registry.is_attached::<Publisher>());
        assert!(!registry.is_attached::<Subscriber>());
    }

    #[test]
    fn test_writer_is_memoized() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("log")).unwrap();
        let registry = registry(dir.path());
        registry.attach::<Publisher>("publisher", OptionsLayer::new()).unwrap();

        let first = registry.writer::<Publisher>().unwrap();
        let second = registry.writer::<Publisher>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.registration::<Publisher>().unwrap().is_open());
    }

    #[test]
    fn test_types_get_distinct_writers() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("log")).unwrap();
        let registry = registry(dir.path());

        let a = registry.get_or_attach::<Publisher>("shared", OptionsLayer::new()).unwrap();
        let b = registry.get_or_attach::<Subscriber>("shared", OptionsLayer::new()).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.path(), b.path());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_reattach_keeps_first_registration() {
        let dir = tempdir().unwrap();
        let registry = registry(dir.path());

        registry.attach::<Publisher>("first", OptionsLayer::new()).unwrap();
        let again = registry
            .attach::<Publisher>("second", OptionsLayer::new().accessor_name("other"))
            .unwrap();
        assert_eq!(again.name(), "first");
        assert_eq!(registry.accessor_name::<Publisher>().as_deref(), Some("logger"));
    }

    #[test]
    fn test_not_attached() {
        let dir = tempdir().unwrap();
        let registry = registry(dir.path());
        assert!(matches!(
            registry.writer::<Publisher>(),
            Err(AttachError::NotAttached { .. })
        ));
        assert!(registry.path::<Publisher>().is_none());
    }

    #[test]
    fn test_config_error_at_attach() {
        let dir = tempdir().unwrap();
        let registry = registry(dir.path());

        let result = registry.attach::<Publisher>("publisher", OptionsLayer::new().accessor_name("not valid"));
        assert!(matches!(
            result,
            Err(AttachError::Config(ConfigError::InvalidValue { .. }))
        ));
        assert!(!registry.is_attached::<Publisher>());
    }

    #[test]
    fn test_open_failure_propagates_then_retries() {
        let dir = tempdir().unwrap();
        let registry = registry(dir.path());
        registry.attach::<Publisher>("publisher", OptionsLayer::new()).unwrap();

        assert!(matches!(
            registry.writer::<Publisher>(),
            Err(AttachError::Writer(WriterError::Io(_)))
        ));

        fs::create_dir(dir.path().join("log")).unwrap();
        assert!(registry.writer::<Publisher>().is_ok());
    }

    #[test]
    fn test_options_resolver_sources_apply() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("log")).unwrap();
        let defaults = MemoryOptionsSource::with_layer(
            OptionsLayer::new()
                .flush_mode(FlushMode::Immediate)
                .program_name("defaults"),
        );
        let registry = registry(dir.path())
            .with_options_resolver(OptionsResolver::new().with_source(Arc::new(defaults)));

        let writer = registry
            .get_or_attach::<Publisher>("jobs", OptionsLayer::new().program_name("Jobs"))
            .unwrap();
        assert_eq!(writer.options().flush_mode, FlushMode::Immediate);

        writer.log(Severity::Info, "ran").unwrap();
        let content = fs::read_to_string(writer.path()).unwrap();
        assert!(content.ends_with(" INFO   [Jobs]: ran\n"), "{content}");
    }

    #[test]
    fn test_concurrent_first_access_opens_once() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("log")).unwrap();
        let registry = Arc::new(registry(dir.path()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry
                        .get_or_attach::<Publisher>("racy", OptionsLayer::new())
                        .unwrap()
                })
            })
            .collect();

        let writers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for writer in &writers[1..] {
            assert!(Arc::ptr_eq(&writers[0], writer));
        }
    }
}
