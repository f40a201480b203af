use std::path::Path;

use anyhow::{bail, Context, Result};
use chost_core::Settings;
use chost_engine::{CohostExtractor, FetchSettings, Importer, ReqwestFetcher, VaultWriter};
use chost_logging::{chost_error, chost_info};
use clap::Parser;

use super::logging::{self, LogDestination};
use super::notices::TerminalNotices;
use super::persistence::{load_settings, save_settings, settings_path};
use super::prompt::ask_for_url;
use crate::cli::{Cli, Command};

pub fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(if cli.verbose {
        LogDestination::Both
    } else {
        LogDestination::File
    });

    match cli.command {
        Command::Import { url, vault } => {
            let url = match url {
                Some(url) => url,
                None => match ask_for_url()? {
                    Some(url) => url,
                    None => {
                        chost_info!("Import cancelled: no URL given");
                        return Ok(());
                    }
                },
            };
            import(&url, &vault.path)
        }
        Command::Settings {
            import_tags,
            tag_space_replacer,
            vault,
        } => {
            let mut settings = load_settings(&vault.path);
            let changed = import_tags.is_some() || tag_space_replacer.is_some();
            if let Some(value) = import_tags {
                settings.import_post_tags = value;
            }
            if let Some(value) = tag_space_replacer {
                settings.tag_space_replacer = value;
            }
            if changed {
                save_settings(&vault.path, &settings)?;
            }
            print_settings(&settings, &vault.path);
            Ok(())
        }
    }
}

/// One fetch, extract and write; a single-threaded runtime is all it needs.
fn import(url: &str, vault: &Path) -> Result<()> {
    let settings = load_settings(vault);
    let fetcher = ReqwestFetcher::new(FetchSettings::default())?;
    let extractor = CohostExtractor::new();
    let writer = VaultWriter::new(vault.to_path_buf());
    let notices = TerminalNotices;
    let importer = Importer::new(&fetcher, &extractor, &writer, &notices);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    match runtime.block_on(importer.import(url, &settings)) {
        Ok(outcome) => {
            println!("{}", outcome.path.display());
            Ok(())
        }
        Err(err) => {
            chost_error!("Import of {} failed: {}", url, err);
            bail!("import failed")
        }
    }
}

fn print_settings(settings: &Settings, vault: &Path) {
    println!("Settings ({})", settings_path(vault).display());
    println!("  Import post tags: {}", settings.import_post_tags);
    println!(
        "  Tag space replacement character: {}",
        settings.tag_space_replacer.label()
    );
}
