//! Attaching named logs to host types
//!
//! A host type gets exactly one writer, created the first time it is asked
//! for. `logs_to!` adds an accessor method to the type that goes through the
//! process-wide registry.
//!
//! ```no_run
//! use logit_core::{logs_to, Severity};
//! use logit_core::types::OptionsLayer;
//!
//! struct Publisher;
//! logs_to!(Publisher, "/tmp/publisher.log");
//!
//! struct Auditor;
//! logs_to!(Auditor, "audit", audit_log, OptionsLayer::new().program_name("Auditor"));
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! Publisher.logger()?.log(Severity::Info, "doing something")?;
//! Auditor.audit_log()?.log(Severity::Warn, "checked")?;
//! # Ok(())
//! # }
//! ```

mod error;
mod registry;

pub use error::{AttachError, AttachResult};
pub use registry::{AttachmentRegistry, Registration, global};

/// Define an accessor method on a host type that returns its shared writer
///
/// Forms:
/// - `logs_to!(Host, name)`: accessor named `logger`
/// - `logs_to!(Host, name, accessor)`
/// - `logs_to!(Host, name, accessor, options)` where `options` is an `OptionsLayer`
/// - `logs_to!(Host, name, accessor, options, in registry)` to use a registry
///   other than `global()`; `registry` must be a `&'static AttachmentRegistry`
///
/// The accessor's identifier overrides any `accessor_name` in the options.
#[macro_export]
macro_rules! logs_to {
    ($host:ty, $name:expr, $accessor:ident, $options:expr, in $registry:expr) => {
        impl $host {
            #[allow(dead_code)]
            pub fn $accessor(
                &self,
            ) -> $crate::attach::AttachResult<::std::sync::Arc<$crate::writer::RecordWriter>> {
                let registry: &'static $crate::attach::AttachmentRegistry = $registry;
                registry.get_or_attach::<$host>(
                    $name,
                    $crate::types::OptionsLayer::accessor_name($options, stringify!($accessor)),
                )
            }
        }
    };
    ($host:ty, $name:expr) => {
        $crate::logs_to!($host, $name, logger, $crate::types::OptionsLayer::new());
    };
    ($host:ty, $name:expr, $accessor:ident) => {
        $crate::logs_to!($host, $name, $accessor, $crate::types::OptionsLayer::new());
    };
    ($host:ty, $name:expr, $accessor:ident, $options:expr) => {
        $crate::logs_to!($host, $name, $accessor, $options, in $crate::attach::global());
    };
}
