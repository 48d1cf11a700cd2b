//=========================================================================
// Report Sinks
//=========================================================================
//
// Line-oriented text reporting used by `Player::dump_values` and the
// scoreboard. Sinks are infallible from the caller's point of view.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io::Write;

use log::{info, warn};

//=== ReportSink Trait ====================================================

/// Receives human-readable report lines, one call per line.
pub trait ReportSink {
    fn emit_line(&mut self, line: &str);
}

/// Captures lines in memory.
impl ReportSink for Vec<String> {
    fn emit_line(&mut self, line: &str) {
        self.push(line.to_owned());
    }
}

//=== LogSink =============================================================

/// Forwards each line to the `log` facade at `info` level.
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    target: &'static str,
}

impl LogSink {
    pub fn new() -> Self {
        Self { target: "report" }
    }

    /// Uses a custom log target instead of `"report"`.
    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for LogSink {
    fn emit_line(&mut self, line: &str) {
        info!(target: self.target, "{}", line);
    }
}

//=== WriterSink ==========================================================

/// Writes newline-terminated lines to any [`std::io::Write`].
///
/// Write failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn emit_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{}", line) {
            warn!(target: "report", "Dropped report line: {}", e);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn vec_sink_collects_lines() {
        let mut lines: Vec<String> = Vec::new();
        lines.emit_line("first");
        lines.emit_line("second");
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn writer_sink_terminates_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.emit_line("  score: 3");
        sink.emit_line("  roundsWon: 1");

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "  score: 3\n  roundsWon: 1\n");
    }

    #[test]
    fn writer_sink_swallows_write_errors() {
        let mut sink = WriterSink::new(BrokenPipe);
        sink.emit_line("lost");
    }

    #[test]
    fn log_sink_accepts_lines() {
        let mut sink = LogSink::with_target("test");
        sink.emit_line("  name: Alice");
        let mut default_sink = LogSink::default();
        default_sink.emit_line("  name: Bob");
    }
}
