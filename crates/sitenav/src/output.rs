//! Terminal output for diagnostics and command results.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Diagnostics go to stderr; command results (JSON) go to stdout so they can
/// be piped.
pub(crate) struct Output {
    diagnostics: Term,
    results: Term,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            diagnostics: Term::stderr(),
            results: Term::stdout(),
        }
    }

    /// Plain diagnostic line.
    pub(crate) fn info(&self, msg: &str) {
        self.diagnostic(&Style::new(), msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.diagnostic(&Style::new().green(), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.diagnostic(&Style::new().yellow(), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.diagnostic(&Style::new().red(), msg);
    }

    /// Site title banner.
    pub(crate) fn highlight(&self, msg: &str) {
        self.diagnostic(&Style::new().cyan().bold(), msg);
    }

    /// Write a command result to stdout.
    pub(crate) fn data(&self, content: &str) -> std::io::Result<()> {
        self.results.write_line(content)
    }

    // Write errors on stderr are ignored.
    fn diagnostic(&self, style: &Style, msg: &str) {
        let _ = self.diagnostics.write_line(&style.apply_to(msg).to_string());
    }
}
