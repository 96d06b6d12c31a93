//! Print sink for the `Print` builtin.
//!
//! Output can go to stdout (the CLI), to a line buffer (tests and embedders
//! that inspect what a program printed) or nowhere.
//!
//! Enum dispatch rather than a trait object: the set of sinks is closed.

use std::sync::Arc;

use parking_lot::Mutex;

/// Captures printed lines in order.
#[derive(Default)]
pub struct BufferPrintHandler {
    lines: Mutex<Vec<String>>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, line: &str) {
        self.lines.lock().push(line.to_owned());
    }

    /// Lines printed so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

/// Where `Print` output goes.
pub enum PrintHandler {
    Stdout,
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandler {
    /// Emit one line.
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Buffer(h) => h.println(line),
            Self::Silent => {}
        }
    }

    /// Captured lines. Empty for sinks that do not capture.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Buffer(h) => h.lines(),
            Self::Stdout | Self::Silent => Vec::new(),
        }
    }
}

/// Print handler shared between a machine and whoever reads its output.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

/// A handler that records lines for later inspection.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_keeps_lines_in_order() {
        let handler = buffer_handler();
        handler.println("first");
        handler.println("second");
        assert_eq!(handler.lines(), vec!["first", "second"]);
    }

    #[test]
    fn silent_discards() {
        let handler = silent_handler();
        handler.println("hello");
        assert!(handler.lines().is_empty());
    }

    #[test]
    fn stdout_captures_nothing() {
        let handler = stdout_handler();
        handler.println("to the terminal");
        assert!(handler.lines().is_empty());
    }

    #[test]
    fn clones_share_one_buffer() {
        let handler = buffer_handler();
        let other = Arc::clone(&handler);
        other.println("via clone");
        assert_eq!(handler.lines(), vec!["via clone"]);
    }
}
