use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chost_logging::chost_debug;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("vault directory missing or not writable: {0}")]
    VaultDir(String),
    #[error("{0} already exists")]
    FileExists(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Where finished notes go. `create` must never overwrite.
pub trait FileSink: Send + Sync {
    fn create(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError>;
}

/// Ensure the vault directory exists; create if missing.
pub fn ensure_vault_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::VaultDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::VaultDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::VaultDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes files into a vault directory via a temp file in the same directory.
#[derive(Debug, Clone)]
pub struct VaultWriter {
    dir: PathBuf,
}

impl VaultWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn staged(&self, content: &str) -> Result<NamedTempFile, PersistError> {
        ensure_vault_dir(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        Ok(tmp)
    }

    /// Atomically replaces `{dir}/{filename}`. Used for app state, never for notes.
    pub fn replace(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        let target = self.dir.join(filename);
        let tmp = self.staged(content)?;
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

impl FileSink for VaultWriter {
    fn create(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        let target = self.dir.join(filename);
        if target.exists() {
            return Err(PersistError::FileExists(target));
        }
        let tmp = self.staged(content)?;
        // A file that appeared since the check above still wins.
        tmp.persist_noclobber(&target).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                PersistError::FileExists(target.clone())
            } else {
                PersistError::Io(e.error)
            }
        })?;
        chost_debug!("created {:?}", target);
        Ok(target)
    }
}
