use std::fmt;
use std::sync::mpsc;

/// User-facing messages. Fire-and-forget; nothing waits on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    FetchFailed,
    NotFound(String),
    FileExists,
    WriteFailed(String),
    Created(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Created(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::FetchFailed => {
                write!(f, "Failed to get post. Check your internet connection and the URL.")
            }
            Notice::NotFound(term) => write!(f, "Post {term} not found!"),
            Notice::FileExists => write!(f, "Note with that title already exists!"),
            Notice::WriteFailed(message) => write!(f, "Could not write note: {message}"),
            Notice::Created(filename) => write!(f, "Created note {filename}"),
        }
    }
}

pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

pub struct ChannelNoticeSink {
    tx: mpsc::Sender<Notice>,
}

impl ChannelNoticeSink {
    pub fn new(tx: mpsc::Sender<Notice>) -> Self {
        Self { tx }
    }
}

impl NoticeSink for ChannelNoticeSink {
    fn notify(&self, notice: Notice) {
        let _ = self.tx.send(notice);
    }
}
