//! Logger trait definition

use std::sync::Arc;

use crate::types::Severity;

/// Minimal leveled logging interface
///
/// Implementations:
/// - `RecordWriter`: Formats records into its log file
/// - `ConsoleLogger`: Logs to stdout/stderr
/// - `MemoryLogger`: Captures messages for inspection
/// - `NoOpLogger`: Discards everything
pub trait Logger: Send + Sync {
    /// Log a debug message
    fn debug(&self, message: &str);

    /// Log an info message
    fn info(&self, message: &str);

    /// Log a warning message
    fn warn(&self, message: &str);

    /// Log an error message
    fn error(&self, message: &str);
}

/// Type alias for a boxed logger
pub type BoxedLogger = Box<dyn Logger>;

/// Type alias for an Arc-wrapped logger
pub type SharedLogger = Arc<dyn Logger>;

/// Extension methods available on every `Logger`
pub trait LoggerExt: Logger {
    /// Dispatch on a severity; fatal and unknown records go to `error`
    fn log_at(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => self.debug(message),
            Severity::Info => self.info(message),
            Severity::Warn => self.warn(message),
            Severity::Error | Severity::Fatal | Severity::Unknown => self.error(message),
        }
    }

    /// Log with format arguments at the given severity
    fn log_fmt(&self, severity: Severity, args: std::fmt::Arguments<'_>) {
        self.log_at(severity, &args.to_string());
    }
}

impl<T: Logger + ?Sized> LoggerExt for T {}

/// Convenience macros for logging with format arguments
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(&format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemoryLogger;

    #[test]
    fn test_log_at_routes_severities() {
        let logger = MemoryLogger::new();
        for severity in Severity::ALL {
            logger.log_at(severity, severity.label());
        }

        let routed: Vec<_> = logger.entries().into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            routed,
            vec![
                Severity::Debug,
                Severity::Info,
                Severity::Warn,
                Severity::Error,
                Severity::Error,
                Severity::Error,
            ]
        );
    }

    #[test]
    fn test_macros_and_log_fmt() {
        let memory = Arc::new(MemoryLogger::new());
        let logger: SharedLogger = memory.clone();
        log_info!(logger, "{} + {}", 1, 2);
        log_error!(logger, "failed");
        logger.log_fmt(Severity::Debug, format_args!("x={}", 3));

        assert_eq!(
            memory.entries(),
            vec![
                (Severity::Info, "1 + 2".to_string()),
                (Severity::Error, "failed".to_string()),
                (Severity::Debug, "x=3".to_string()),
            ]
        );
    }
}
