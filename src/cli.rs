// CLI module for handling command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "moodleorg")]
#[command(about = "Browse and download moodle.org plugins as resolver packages")]
pub struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every package synthesized from the catalog
    Packages {
        /// Print full package records as JSON
        #[arg(long)]
        json: bool,
        /// Only show packages whose name contains this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show all versions of one package
    Show { name: String },
    /// Download and verify a package's distribution archive
    Download {
        name: String,
        /// Version to download (defaults to the most recent release)
        #[arg(long)]
        version: Option<String>,
        /// Directory to save the archive in
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Manage the local catalog cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// Remove the cached catalog so the next run fetches it again
    Clear,
}
