// Leveled console output shared by every check
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Output levels for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutputLevel {
    Error,      // Always shown - failures of any kind
    Summary,    // Level 0+ - verdicts and totals
    Info,       // Level 1+ - the full diagnostic trace
    Debug,      // Level 2+ - request headers, config summary
}

pub const DEFAULT_VERBOSITY: u8 = 1;

/// Console that owns the output sink for a run.
///
/// Every line goes through here so tests can capture exactly what an
/// operator would have seen on stdout.
pub struct Console {
    verbosity: u8,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Console {
    pub fn stdout(verbosity: u8) -> Self {
        Self::with_sink(verbosity, Box::new(io::stdout()))
    }

    pub fn with_sink(verbosity: u8, sink: Box<dyn Write + Send>) -> Self {
        Self {
            verbosity,
            sink: Mutex::new(sink),
        }
    }

    /// Console writing into an in-memory buffer
    pub fn capture(verbosity: u8) -> (Self, CaptureBuffer) {
        let buffer = CaptureBuffer::default();
        (Self::with_sink(verbosity, Box::new(buffer.clone())), buffer)
    }

    pub fn should_show(&self, level: OutputLevel) -> bool {
        match level {
            OutputLevel::Error => true,
            OutputLevel::Summary => true,
            OutputLevel::Info => self.verbosity >= 1,
            OutputLevel::Debug => self.verbosity >= 2,
        }
    }

    pub fn output(&self, level: OutputLevel, message: impl AsRef<str>) {
        if !self.should_show(level) {
            return;
        }

        // A broken stdout should not take the diagnostics down with it
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{}", message.as_ref());
            let _ = sink.flush();
        }
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.output(OutputLevel::Error, message);
    }

    pub fn summary(&self, message: impl AsRef<str>) {
        self.output(OutputLevel::Summary, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.output(OutputLevel::Info, message);
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.output(OutputLevel::Debug, message);
    }
}

// Leveled output macros that work anywhere a console is in scope
#[macro_export]
macro_rules! v_error {
    ($console:expr, $($arg:tt)*) => { $console.error(format!($($arg)*)) };
}

#[macro_export]
macro_rules! v_summary {
    ($console:expr, $($arg:tt)*) => { $console.summary(format!($($arg)*)) };
}

#[macro_export]
macro_rules! v_info {
    ($console:expr, $($arg:tt)*) => { $console.info(format!($($arg)*)) };
}

#[macro_export]
macro_rules! v_debug {
    ($console:expr, $($arg:tt)*) => { $console.debug(format!($($arg)*)) };
}

/// Shared in-memory sink handed out by [`Console::capture`]
#[derive(Clone, Default)]
pub struct CaptureBuffer(Arc<Mutex<Vec<u8>>>);

impl CaptureBuffer {
    pub fn contents(&self) -> String {
        match self.0.lock() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) => String::new(),
        }
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.0.lock() {
            Ok(mut bytes) => {
                bytes.extend_from_slice(buf);
                Ok(buf.len())
            }
            Err(_) => Err(io::Error::other("capture buffer poisoned")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_by_verbosity() {
        let (console, buffer) = Console::capture(0);
        console.error("err");
        console.summary("sum");
        console.info("info");
        console.debug("dbg");
        assert_eq!(buffer.contents(), "err\nsum\n");

        let (console, buffer) = Console::capture(2);
        console.info("info");
        console.debug("dbg");
        assert_eq!(buffer.contents(), "info\ndbg\n");
    }

    #[test]
    fn macros_format_and_filter() {
        let (console, buffer) = Console::capture(1);
        v_error!(console, "❌ failed: {}", 503);
        v_summary!(console, "rate {:.1}%", 66.666);
        v_info!(console, "call {} of {}", 1, 3);
        v_debug!(console, "hidden {}", "header");
        assert_eq!(buffer.contents(), "❌ failed: 503\nrate 66.7%\ncall 1 of 3\n");
    }
}
