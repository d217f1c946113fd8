use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::config::STORE_DIR_ENV;

struct DefaultArgs;

impl DefaultArgs {
    pub const LIMIT: &'static str = "1";
    pub const ORDER: &'static str = "dsc";
}

/// Flat file store with directory-wide word counting.
#[derive(Clone, Debug, Parser)]
#[command(name = "filestore")]
#[command(about = "Store files in a directory and count or rank the words they contain.")]
pub struct Cli {
    /// Store directory. Default: $FILESTORE_DIR, else ~/store.
    #[arg(long, short = 's', env = STORE_DIR_ENV, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Maximum concurrent file scans. Default: 4x logical CPUs, capped by the open-file limit.
    #[arg(long, short = 'j', global = true)]
    pub workers: Option<usize>,

    /// Abort counting after this many seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Strict mode: fail if any file cannot be read instead of skipping it.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool), global = true)]
    pub strict: Option<bool>,

    /// Verbose output (debug logs and a progress bar).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool), global = true)]
    pub verbose: Option<bool>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Copy files into the store. Fails if a name already exists.
    Add {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
    /// Create or replace a stored file with the content of FILE.
    Update {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Remove a file from the store.
    Rm {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// List stored files.
    Ls,
    /// Count the words in all stored files.
    Wc,
    /// Most (or least) frequent words across all stored files.
    FreqWords {
        /// Number of words to print.
        #[arg(long, short = 'n', default_value = DefaultArgs::LIMIT, allow_negative_numbers = true)]
        limit: i64,

        /// `dsc` for most frequent first; anything else for least frequent first.
        #[arg(long, default_value = DefaultArgs::ORDER)]
        order: String,
    },
}
