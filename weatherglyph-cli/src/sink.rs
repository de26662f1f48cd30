use std::io::Write;

use chrono::Local;
use weatherglyph_core::{DisplayString, StreamError, StreamSink};

/// Prints stream values to stdout, one per line, optionally timestamped.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink {
    pub timestamped: bool,
}

impl StreamSink for StdoutSink {
    fn push(&self, value: &DisplayString) -> Result<(), StreamError> {
        let timestamp = self.timestamped.then(|| Local::now().format("%H:%M:%S").to_string());
        let line = render_line(value, timestamp);

        let mut out = std::io::stdout().lock();
        writeln!(out, "{line}").map_err(|e| StreamError::Push(e.to_string()))
    }
}

fn render_line(value: &DisplayString, timestamp: Option<String>) -> String {
    match timestamp {
        Some(ts) => format!("[{ts}] {value}"),
        None => value.to_string(),
    }
}
