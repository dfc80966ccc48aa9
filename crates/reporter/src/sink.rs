use std::io::Write;

/// Where report text goes. The reporter never fails, so sinks absorb
/// write errors instead of surfacing them.
pub trait ReportSink {
    /// Writes `text` followed by a newline.
    fn line(&mut self, text: &str);

    /// Writes `text` verbatim, no newline. Used for progress markers, so
    /// implementations should make the output visible immediately.
    fn raw(&mut self, text: &str);
}

/// Sink for interactive runs: standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn line(&mut self, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{text}");
    }

    fn raw(&mut self, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "{text}");
        let _ = out.flush();
    }
}

/// Capturing sink for tests and embedders that post-process the report.
#[derive(Debug, Default)]
pub struct BufferSink {
    buffer: String,
}

impl BufferSink {
    pub fn new() -> Self {
        BufferSink::default()
    }

    pub fn contents(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl ReportSink for BufferSink {
    fn line(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn raw(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}
