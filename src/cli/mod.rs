pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sitegrab")]
#[command(about = "Fetch a web page's markup through public relays", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/sitegrab/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Retrieve one or more pages
    Scan {
        /// Page URLs; a missing scheme defaults to https://
        #[arg(required = true)]
        urls: Vec<String>,

        /// Output file (one URL) or directory (several URLs)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the <base href> injection
        #[arg(long)]
        raw: bool,

        /// Open the saved file (or the output directory for several URLs)
        #[arg(long, requires = "output")]
        open: bool,

        /// Number of concurrent scans when several URLs are given
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Add a <base href> to markup saved by hand
    Normalize {
        /// File with the page markup
        path: PathBuf,

        /// URL the markup was copied from
        #[arg(short, long)]
        source: String,

        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the relay chain in priority order
    Relays,
    /// Print the config file location
    ConfigPath,
}
