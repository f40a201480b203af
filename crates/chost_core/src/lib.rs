//! get-chost core: plain domain values shared by the engine and the app.
mod record;
mod settings;

pub use record::{PostRecord, AUTHOR_NOT_FOUND};
pub use settings::{ParseReplacerError, Settings, TagSpaceReplacer};
