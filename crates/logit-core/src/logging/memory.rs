//! Capturing logger

use parking_lot::Mutex;

use super::traits::Logger;
use crate::types::Severity;

/// Keeps every message in memory
///
/// Used to observe what a writer reports on its diagnostics channel.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of captured messages, oldest first
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn push(&self, severity: Severity, message: &str) {
        self.entries.lock().push((severity, message.to_string()));
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.push(Severity::Debug, message);
    }

    fn info(&self, message: &str) {
        self.push(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(Severity::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Severity::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_warn;

    #[test]
    fn test_captures_in_order() {
        let logger = MemoryLogger::new();
        logger.info("first");
        log_warn!(logger, "second {}", 2);

        assert_eq!(
            logger.entries(),
            vec![
                (Severity::Info, "first".to_string()),
                (Severity::Warn, "second 2".to_string()),
            ]
        );

        logger.clear();
        assert!(logger.is_empty());
    }
}
