use std::path::PathBuf;

use chost_core::TagSpaceReplacer;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "get-chost", version, about = "Save cohost posts as markdown notes")]
pub struct Cli {
    /// Also print log output to the terminal.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import a Chost from URL (creates a new note)
    Import {
        /// Post URL; prompted for when omitted.
        url: Option<String>,
        #[command(flatten)]
        vault: VaultArg,
    },
    /// Show or change the import settings stored in the vault.
    Settings {
        /// Import post tags (if any exist) as note tags.
        #[arg(long, value_name = "BOOL")]
        import_tags: Option<bool>,
        /// Character that replaces the space in multi-word tags: "-" or "_".
        #[arg(long, value_name = "CHAR")]
        tag_space_replacer: Option<TagSpaceReplacer>,
        #[command(flatten)]
        vault: VaultArg,
    },
}

#[derive(Debug, Args)]
pub struct VaultArg {
    /// Directory that receives the notes.
    #[arg(long = "vault", env = "GET_CHOST_VAULT", default_value = ".")]
    pub path: PathBuf,
}
