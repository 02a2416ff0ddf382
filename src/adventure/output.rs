//! Where the controller sends text meant for the player.

use std::io::{self, Write};

pub trait OutputSink {
    fn emit(&mut self, text: &str);
}

/// Collects every emitted message; tests read them back.
#[derive(Debug, Default, Clone)]
pub struct BufferedOutput {
    lines: Vec<String>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    /// Everything emitted so far, newline separated.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Remove and return what has been collected.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl OutputSink for BufferedOutput {
    fn emit(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

/// Writes to stdout.
#[derive(Debug, Default)]
pub struct ConsoleOutput;

impl OutputSink for ConsoleOutput {
    fn emit(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        // A closed stdout ends the session on the next read; nothing to do here.
        let _ = writeln!(stdout, "{}", text);
        let _ = stdout.flush();
    }
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn emit(&mut self, text: &str) {
        (**self).emit(text);
    }
}
