//! Record formatting

use chrono::NaiveDateTime;

use crate::types::Severity;

/// Timestamp layout used by `DefaultFormatter`
pub const TIMESTAMP_FORMAT: &str = "%m-%d-%Y %H:%M:%S";

/// Turns one record into the exact bytes written to the log
///
/// The returned line must include its trailing newline.
pub trait RecordFormatter: Send + Sync {
    fn format(
        &self,
        severity: Severity,
        timestamp: NaiveDateTime,
        progname: Option<&str>,
        message: &str,
    ) -> String;
}

/// `MM-DD-YYYY HH:MM:SS SEVERITY [progname]: message`
///
/// The severity label is left-justified to six columns and the
/// ` [progname]` segment is omitted when there is no program name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl RecordFormatter for DefaultFormatter {
    fn format(
        &self,
        severity: Severity,
        timestamp: NaiveDateTime,
        progname: Option<&str>,
        message: &str,
    ) -> String {
        let name = progname
            .map(|p| format!(" [{}]", p))
            .unwrap_or_default();

        format!(
            "{} {:<6}{}: {}\n",
            timestamp.format(TIMESTAMP_FORMAT),
            severity,
            name,
            message
        )
    }
}

impl<F> RecordFormatter for F
where
    F: Fn(Severity, NaiveDateTime, Option<&str>, &str) -> String + Send + Sync,
{
    fn format(
        &self,
        severity: Severity,
        timestamp: NaiveDateTime,
        progname: Option<&str>,
        message: &str,
    ) -> String {
        self(severity, timestamp, progname, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    #[test]
    fn test_without_progname() {
        let line = DefaultFormatter.format(Severity::Info, timestamp(), None, "doing something");
        assert_eq!(line, "01-02-2024 03:04:05 INFO  : doing something\n");
    }

    #[test]
    fn test_with_progname() {
        let line = DefaultFormatter.format(Severity::Info, timestamp(), Some("Publisher"), "doing something");
        assert_eq!(line, "01-02-2024 03:04:05 INFO   [Publisher]: doing something\n");
    }

    #[test]
    fn test_long_labels_fill_column() {
        let line = DefaultFormatter.format(Severity::Error, timestamp(), None, "boom");
        assert_eq!(line, "01-02-2024 03:04:05 ERROR : boom\n");

        let line = DefaultFormatter.format(Severity::Unknown, timestamp(), None, "?");
        assert_eq!(line, "01-02-2024 03:04:05 ANY   : ?\n");
    }

    #[test]
    fn test_closure_formatter() {
        let formatter = |severity: Severity, _: NaiveDateTime, _: Option<&str>, message: &str| {
            format!("{}|{}\n", severity, message)
        };
        assert_eq!(formatter.format(Severity::Warn, timestamp(), None, "hi"), "WARN|hi\n");
    }
}
