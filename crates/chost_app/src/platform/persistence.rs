use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chost_core::Settings;
use chost_engine::VaultWriter;
use chost_logging::{chost_info, chost_warn};

const SETTINGS_FILENAME: &str = ".get_chost.ron";

pub(crate) fn settings_path(vault: &Path) -> PathBuf {
    vault.join(SETTINGS_FILENAME)
}

/// Stored settings merged over the defaults; any problem falls back to defaults.
pub(crate) fn load_settings(vault: &Path) -> Settings {
    let path = settings_path(vault);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Settings::default();
        }
        Err(err) => {
            chost_warn!("Failed to read settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            chost_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            chost_warn!("Failed to parse settings from {:?}: {}", path, err);
            Settings::default()
        }
    }
}

pub(crate) fn save_settings(vault: &Path, settings: &Settings) -> Result<PathBuf> {
    let pretty = ron::ser::PrettyConfig::new();
    let content =
        ron::ser::to_string_pretty(settings, pretty).context("serializing settings")?;

    let writer = VaultWriter::new(vault.to_path_buf());
    let path = writer
        .replace(SETTINGS_FILENAME, &content)
        .with_context(|| format!("writing settings to {:?}", vault))?;
    chost_info!("Saved settings to {:?}", path);
    Ok(path)
}
