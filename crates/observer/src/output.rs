//! Terminal output for the CLI.

use console::{Style, Term};
use tracing::debug;

/// Status lines go to stderr, rendered HTML to stdout so it can be piped.
pub(crate) struct Output {
    status: Term,
    content: Term,
    success: Style,
    warning: Style,
    error: Style,
    notice: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            content: Term::stdout(),
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            notice: Style::new().cyan().bold(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        write(&self.status, msg);
    }

    /// A publish went through.
    pub(crate) fn success(&self, msg: &str) {
        write(&self.status, &self.success.apply_to(msg).to_string());
    }

    /// Nothing published or media left behind.
    pub(crate) fn warning(&self, msg: &str) {
        write(&self.status, &self.warning.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        write(&self.status, &self.error.apply_to(msg).to_string());
    }

    /// A render produced nothing to print.
    pub(crate) fn highlight(&self, msg: &str) {
        write(&self.status, &self.notice.apply_to(msg).to_string());
    }

    /// Rendered HTML fragment.
    pub(crate) fn content(&self, html: &str) {
        write(&self.content, html);
    }
}

fn write(term: &Term, line: &str) {
    if let Err(err) = term.write_line(line) {
        debug!(error = %err, "Could not write to terminal");
    }
}
