//! Public and internal types for the filestore API and the aggregation pipeline.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::FileError;
use crate::pipeline::CancelToken;
use crate::utils::Logger;

/// Word → occurrence count. Words are raw bytes, compared byte-for-byte (no case folding).
///
/// One tally is built per scanned file and one holds the merged result. A word that is
/// absent counts as zero.
pub type WordTally = HashMap<Vec<u8>, u64>;

/// One stored file as reported by a [`FileSource`](crate::store::FileSource) listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Entry name inside the store (single path component).
    pub name: String,
    /// Size in bytes at listing time (0 when unknown).
    pub size: u64,
    /// Location the source opens; for [`DirStore`](crate::store::DirStore) the absolute path.
    pub path: PathBuf,
}

/// Unit of work handed to a scan worker. `seq` is the position in the listing.
#[derive(Clone, Debug)]
pub struct FileTask {
    pub seq: usize,
    pub file: FileDescriptor,
}

/// What a scan keeps besides the token count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Build a per-word tally.
    #[default]
    Words,
    /// Count tokens only; the tally stays empty.
    TotalOnly,
}

/// Result of scanning one file completely.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilePartial {
    pub tally: WordTally,
    pub total: u64,
}

/// A file that could not be scanned, with the reason.
#[derive(Debug)]
pub struct FileFailure {
    pub seq: usize,
    pub file: FileDescriptor,
    pub cause: FileError,
}

/// Exactly one of these is produced for every dispatched [`FileTask`].
#[derive(Debug)]
pub enum ScanOutcome {
    Scanned {
        seq: usize,
        file: FileDescriptor,
        partial: FilePartial,
    },
    Failed(FileFailure),
}

/// One line of a ranking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedEntry {
    pub word: Vec<u8>,
    pub count: u64,
}

impl RankedEntry {
    pub fn new(word: impl Into<Vec<u8>>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }

    /// Word as text; invalid UTF-8 is replaced.
    pub fn word_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.word)
    }
}

/// Ranking direction by count. Ties are always broken by ascending word bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Order {
    Ascending,
    #[default]
    Descending,
}

impl Order {
    /// Exactly `"dsc"` ranks most frequent first; every other selector (including `" dsc"`)
    /// ranks least frequent first.
    pub fn from_selector(selector: &str) -> Self {
        if selector == "dsc" {
            Order::Descending
        } else {
            Order::Ascending
        }
    }

    pub fn as_selector(&self) -> &'static str {
        match self {
            Order::Ascending => "asc",
            Order::Descending => "dsc",
        }
    }
}

impl FromStr for Order {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Order::from_selector(s))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_selector())
    }
}

/// Per-request state, logged at each transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestState {
    Dispatching,
    AwaitingAll,
    Merging,
    Ranking,
    Done,
}

/// Lib options for [`total_word_count`](crate::total_word_count) and [`top_words`](crate::top_words).
#[derive(Clone, Debug, Default)]
pub struct ScanOpts {
    /// Maximum concurrent scan workers. When None, 4× logical CPUs capped by the FD limit.
    pub workers: Option<usize>,
    /// Request deadline measured from the start of the call.
    pub timeout: Option<Duration>,
    /// External cancellation (e.g. Ctrl+C). Combined with `timeout`.
    pub cancel: Option<CancelToken>,
    /// Strict mode: any per-file failure fails the whole request.
    pub strict: bool,
    /// Show a progress bar over scanned files (stderr).
    pub show_progress: bool,
    /// Logger handle passed to every pipeline stage.
    pub logger: Logger,
}

/// Merged result of one aggregation request, before ranking.
#[derive(Debug, Default)]
pub struct Aggregate {
    pub tally: WordTally,
    pub total: u64,
    pub files_scanned: usize,
    /// Failed files, ordered by listing position.
    pub failures: Vec<FileFailure>,
}

/// Answer to a total word count query.
#[derive(Debug)]
pub struct WordTotal {
    pub total: u64,
    pub files_scanned: usize,
    pub failures: Vec<FileFailure>,
}

/// Answer to a top-words query.
#[derive(Debug)]
pub struct TopWords {
    pub entries: Vec<RankedEntry>,
    pub total: u64,
    pub files_scanned: usize,
    pub failures: Vec<FileFailure>,
}

/// Full options (CLI). Built from defaults, then `.filestore.toml`, then flags.
#[derive(Clone, Debug, Default)]
pub struct Opts {
    /// Store directory. When None, `$FILESTORE_DIR` or `~/store`.
    pub store_dir: Option<PathBuf>,
    pub workers: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub strict: bool,
    pub verbose: bool,
}

impl Opts {
    /// Lib options for one request; `logger` and `cancel` are injected by the caller.
    pub fn scan_opts(&self, logger: Logger, cancel: CancelToken) -> ScanOpts {
        ScanOpts {
            workers: self.workers,
            timeout: self.timeout_secs.map(Duration::from_secs),
            cancel: Some(cancel),
            strict: self.strict,
            show_progress: self.verbose,
            logger,
        }
    }
}
