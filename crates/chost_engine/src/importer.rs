use std::path::PathBuf;

use chost_core::Settings;
use chost_logging::{chost_error, chost_info, chost_warn};
use thiserror::Error;

use crate::extract::{ExtractError, ExtractWarning, Extractor};
use crate::fetch::Fetcher;
use crate::filename::{note_content, note_filename};
use crate::notice::{Notice, NoticeSink};
use crate::persist::{FileSink, PersistError};
use crate::FetchError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
    #[error("write failed: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub path: PathBuf,
    pub filename: String,
    pub author_handle: String,
    pub title: Option<String>,
}

/// Runs fetch, extract and write for one URL, reporting every failure as a notice.
pub struct Importer<'a> {
    fetcher: &'a dyn Fetcher,
    extractor: &'a dyn Extractor,
    sink: &'a dyn FileSink,
    notices: &'a dyn NoticeSink,
}

impl<'a> Importer<'a> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        extractor: &'a dyn Extractor,
        sink: &'a dyn FileSink,
        notices: &'a dyn NoticeSink,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            sink,
            notices,
        }
    }

    pub async fn import(&self, url: &str, settings: &Settings) -> Result<ImportOutcome, ImportError> {
        chost_info!("importing {}", url);

        let fetched = match self.fetcher.fetch(url).await {
            Ok(output) => output,
            Err(err) => {
                chost_warn!("fetch of {} failed: {}", url, err);
                self.notices.notify(Notice::FetchFailed);
                return Err(err.into());
            }
        };

        let extraction = match self.extractor.extract(&fetched.html, url, settings) {
            Ok(extraction) => extraction,
            Err(err) => {
                chost_error!("could not extract {}: {}", url, err);
                self.notices.notify(Notice::NotFound(url.to_string()));
                return Err(err.into());
            }
        };
        for warning in &extraction.warnings {
            match warning {
                ExtractWarning::AuthorNotFound => {
                    self.notices.notify(Notice::NotFound("author".to_string()));
                }
            }
        }

        let record = extraction.record;
        let filename = note_filename(&record);
        let path = match self.sink.create(&filename, &note_content(&record)) {
            Ok(path) => path,
            Err(err) => {
                chost_warn!("could not create {}: {}", filename, err);
                self.notices.notify(match &err {
                    PersistError::FileExists(_) => Notice::FileExists,
                    other => Notice::WriteFailed(other.to_string()),
                });
                return Err(err.into());
            }
        };

        chost_info!("wrote {:?}", path);
        self.notices.notify(Notice::Created(filename.clone()));
        Ok(ImportOutcome {
            path,
            filename,
            author_handle: record.author_handle,
            title: record.title,
        })
    }
}
