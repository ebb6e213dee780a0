//! File-backed record writer

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use super::clock::{Clock, SystemClock};
use super::error::{WriterError, WriterResult};
use super::format::{DefaultFormatter, RecordFormatter};
use super::rotation::Rotator;
use crate::logging::{ConsoleLogger, Logger, SharedLogger};
use crate::types::{FlushMode, RotationHint, Severity, WriteMode, WriterOptions};

/// The open log file
enum Sink {
    /// Default flush mode: bytes reach the OS when the buffer fills or on flush
    Buffered(BufWriter<File>),
    /// Immediate flush mode: every write goes straight to the descriptor
    Direct(File),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Buffered(w) => w.write(buf),
            Sink::Direct(f) => f.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Buffered(w) => w.write_all(buf),
            Sink::Direct(f) => f.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Buffered(w) => w.flush(),
            Sink::Direct(f) => f.flush(),
        }
    }
}

/// Writes formatted records to one log file
///
/// The file is opened once, when the writer is built, and stays open until
/// `close()` is called or the writer is dropped (which flushes buffered
/// bytes).
///
/// # Thread Safety
///
/// `handle` is the lifecycle guard: every operation that touches the file
/// descriptor (`write`, `flush`, `close`) holds it. Each record is emitted
/// with a single `write_all` under the guard, so concurrent writers never
/// interleave partial lines.
///
/// # Example
///
/// ```no_run
/// use logit_core::types::{Severity, WriterOptions};
/// use logit_core::writer::RecordWriter;
///
/// let writer = RecordWriter::open("/tmp/publisher.log", WriterOptions::default())?;
/// writer.write(Severity::Info, "doing something", None)?;
/// writer.flush();
/// # Ok::<(), logit_core::writer::WriterError>(())
/// ```
pub struct RecordWriter {
    path: PathBuf,
    options: WriterOptions,
    formatter: Box<dyn RecordFormatter>,
    clock: Arc<dyn Clock>,
    diagnostics: SharedLogger,
    /// Receives a copy of each line when `mirror_to_console` is set
    console: Mutex<Box<dyn Write + Send>>,
    /// `None` once the writer is closed
    handle: Mutex<Option<Sink>>,
}

impl RecordWriter {
    /// Open a writer with the default formatter, system clock and no rotator
    pub fn open(path: impl Into<PathBuf>, options: WriterOptions) -> WriterResult<Self> {
        Self::builder(path, options).open()
    }

    /// Start building a writer with custom collaborators
    pub fn builder(path: impl Into<PathBuf>, options: WriterOptions) -> RecordWriterBuilder {
        RecordWriterBuilder::new(path, options)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Rotation settings passed through to the rotator, if any
    pub fn rotation_hint(&self) -> Option<&RotationHint> {
        self.options.rotation_hint.as_ref()
    }

    /// Whether a record of this severity passes the minimum level
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity >= self.options.level
    }

    pub fn is_closed(&self) -> bool {
        self.handle.lock().is_none()
    }

    /// Format and write one record
    ///
    /// `progname` overrides the configured program name for this record.
    /// Returns `Ok(false)` when the record is below the minimum level; nothing
    /// is written anywhere in that case. Write failures and writes after
    /// `close()` are returned to the caller.
    pub fn write(&self, severity: Severity, message: &str, progname: Option<&str>) -> WriterResult<bool> {
        if !self.is_enabled(severity) {
            return Ok(false);
        }

        let progname = progname.or(self.options.program_name.as_deref());
        let line = self.formatter.format(severity, self.clock.now(), progname, message);

        let mut handle = self.handle.lock();
        let sink = handle.as_mut().ok_or_else(|| WriterError::closed(&self.path))?;
        sink.write_all(line.as_bytes())?;
        if self.options.flush_mode == FlushMode::Immediate {
            sink.flush()?;
        }

        if self.options.mirror_to_console {
            let mut console = self.console.lock();
            if let Err(e) = console.write_all(line.as_bytes()).and_then(|()| console.flush()) {
                self.diagnostics.warn(&format!("console mirror failed: {}", e));
            }
        }

        Ok(true)
    }

    /// Write a record using the configured program name
    pub fn log(&self, severity: Severity, message: &str) -> WriterResult<bool> {
        self.write(severity, message, None)
    }

    /// Push buffered bytes to the OS
    ///
    /// Best-effort: a closed writer is a successful no-op, and an I/O failure
    /// is reported as a warning on the diagnostics logger and returns `false`.
    pub fn flush(&self) -> bool {
        let result = {
            let mut handle = self.handle.lock();
            match handle.as_mut() {
                Some(sink) => sink.flush(),
                None => return true,
            }
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                self.diagnostics
                    .warn(&format!("flush of {} failed: {}", self.path.display(), e));
                false
            }
        }
    }

    /// Flush and release the file handle
    ///
    /// Later writes fail with `WriterError::Closed`; later flushes are no-ops.
    /// Closing twice is harmless.
    pub fn close(&self) -> WriterResult<()> {
        let sink = self.handle.lock().take();
        match sink {
            Some(mut sink) => Ok(sink.flush()?),
            None => Ok(()),
        }
    }

    fn report(&self, result: WriterResult<bool>) {
        if let Err(e) = result {
            self.diagnostics
                .error(&format!("lost record for {}: {}", self.path.display(), e));
        }
    }
}

impl Logger for RecordWriter {
    fn debug(&self, message: &str) {
        self.report(self.log(Severity::Debug, message));
    }

    fn info(&self, message: &str) {
        self.report(self.log(Severity::Info, message));
    }

    fn warn(&self, message: &str) {
        self.report(self.log(Severity::Warn, message));
    }

    fn error(&self, message: &str) {
        self.report(self.log(Severity::Error, message));
    }
}

impl std::fmt::Debug for RecordWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordWriter")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Builder for a `RecordWriter`
pub struct RecordWriterBuilder {
    path: PathBuf,
    options: WriterOptions,
    formatter: Box<dyn RecordFormatter>,
    clock: Arc<dyn Clock>,
    rotator: Option<Arc<dyn Rotator>>,
    diagnostics: Option<SharedLogger>,
    console: Option<Box<dyn Write + Send>>,
}

impl RecordWriterBuilder {
    fn new(path: impl Into<PathBuf>, options: WriterOptions) -> Self {
        Self {
            path: path.into(),
            options,
            formatter: Box::new(DefaultFormatter),
            clock: Arc::new(SystemClock),
            rotator: None,
            diagnostics: None,
            console: None,
        }
    }

    /// Replace the line formatter
    pub fn formatter(mut self, formatter: impl RecordFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Replace the timestamp source
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Hand the rotation hint to an external rotator on open
    pub fn rotator(mut self, rotator: Arc<dyn Rotator>) -> Self {
        self.rotator = Some(rotator);
        self
    }

    /// Where best-effort failures are reported (stderr by default)
    pub fn diagnostics(mut self, logger: SharedLogger) -> Self {
        self.diagnostics = Some(logger);
        self
    }

    /// Where mirrored lines go (stdout by default)
    pub fn console(mut self, console: Box<dyn Write + Send>) -> Self {
        self.console = Some(console);
        self
    }

    /// Open the log file
    ///
    /// Fails if the file cannot be created or written, including when its
    /// parent directory does not exist.
    pub fn open(self) -> WriterResult<RecordWriter> {
        let mut open_options = OpenOptions::new();
        open_options.create(true);
        match self.options.write_mode {
            WriteMode::Append => open_options.append(true),
            WriteMode::Truncate => open_options.write(true).truncate(true),
        };
        let file = open_options.open(&self.path)?;

        if let (Some(hint), Some(rotator)) = (&self.options.rotation_hint, &self.rotator) {
            rotator
                .register(&self.path, hint)
                .map_err(|e| WriterError::rotation(&self.path, e))?;
        }

        let sink = match self.options.flush_mode {
            FlushMode::Default => Sink::Buffered(BufWriter::new(file)),
            FlushMode::Immediate => Sink::Direct(file),
        };

        Ok(RecordWriter {
            path: self.path,
            options: self.options,
            formatter: self.formatter,
            clock: self.clock,
            diagnostics: self
                .diagnostics
                .unwrap_or_else(|| Arc::new(ConsoleLogger::new())),
            console: Mutex::new(
                self.console
                    .unwrap_or_else(|| Box::new(io::stdout())),
            ),
            handle: Mutex::new(Some(sink)),
        })
    }
}
