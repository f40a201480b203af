use chost_engine::{Notice, NoticeSink};
use console::style;

/// Prints notices to stderr, errors in red.
pub struct TerminalNotices;

impl NoticeSink for TerminalNotices {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            eprintln!("{}", style(notice).red().bold());
        } else {
            eprintln!("{}", style(notice).green());
        }
    }
}
