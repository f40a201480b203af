//! get-chost engine: fetch a cohost post, clean it up and write it as a note.
mod convert;
mod decode;
mod dom;
mod extract;
mod fetch;
mod filename;
mod frontmatter;
mod importer;
mod notice;
mod persist;
mod types;

pub use convert::{Converter, Html2MdConverter};
pub use decode::{decode_html, DecodedHtml};
pub use extract::{
    CohostExtractor, ExtractError, ExtractWarning, Extraction, Extractor, AUTHOR, EMBEDDED_ASK,
    LINKED_TITLE, LOGIN_LINK, POST_CONTAINER, TAG_LIST, TITLE,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::{note_content, note_filename, post_id, NOTE_EXTENSION, SITE_ROOT};
pub use frontmatter::{build_tag_block, normalize_tag};
pub use importer::{ImportError, ImportOutcome, Importer};
pub use notice::{ChannelNoticeSink, Notice, NoticeSink};
pub use persist::{ensure_vault_dir, FileSink, PersistError, VaultWriter};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
