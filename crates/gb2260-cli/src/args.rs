use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for gb2260-cli
#[derive(Debug, Parser)]
#[command(
    name = "gb2260",
    version,
    about = "Resolve and search GB/T 2260 administrative division codes"
)]
pub struct CliArgs {
    /// Revision file ("<code> <name>" per line); repeat for several, oldest
    /// first. Later files override earlier ones. Default: the bundled sample.
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Vec<PathBuf>,

    /// Reuse (or write) a binary cache next to the first input file, tied to
    /// the exact list of inputs
    #[cfg(feature = "builder")]
    #[arg(short = 'c', long = "cache", global = true)]
    pub cache: bool,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset contents
    Stats,

    /// Look up a division by its code
    Get {
        /// Six-digit division code (e.g. 110105)
        code: String,
    },

    /// Search divisions by code prefix and optional name
    Search {
        /// Code prefix, compared textually (e.g. 11, 1306)
        prefix: String,

        /// Name fragment; matches when either name contains the other
        #[arg(short = 'n', long = "name")]
        name: Option<String>,
    },

    /// Merge the input revisions and write a binary cache
    #[cfg(feature = "builder")]
    Build {
        /// Output file
        out: PathBuf,
    },
}
