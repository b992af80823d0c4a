//! Command-line argument structures and enums

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Keep the Contents listing of folder index notes up to date", long_about = None)]
pub struct Cli {
    /// Vault directory (default: current directory)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Config file to use instead of the vault or global one
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Update every index note in the vault
    #[command(alias = "u")]
    Update {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update the index note of one folder
    UpdateFolder {
        /// A folder, or a document inside the folder
        path: PathBuf,
    },

    /// Create index notes for folders that lack one, then update the vault
    CreateMissing,

    /// Watch the vault and update index notes as files change
    Watch,

    /// Show the effective configuration
    Config {
        /// Write a default config file into the vault
        #[arg(long)]
        init: bool,
    },
}
