//! Filestore: flat file store with concurrent directory-wide word counting and ranking

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use error::{AggregateError, FileError, StoreError};
pub use pipeline::CancelToken;
pub use store::{DirStore, FileSource};
pub use utils::{CaptureLog, Logger};

use std::path::Path;
use std::sync::Arc;

use crate::engine::rank::{rank, validate_limit};
use crate::pipeline::{aggregate_source, pipeline_state};

/// Result alias used by public filestore API
pub type Result<T> = std::result::Result<T, AggregateError>;

fn log_config(opts: &ScanOpts) {
    opts.logger.debug(format_args!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    ));
}

/// Total number of words across every file directly inside `dir`.
///
/// Unreadable files are skipped and listed in [`WordTotal::failures`] (unless `opts.strict`).
/// A missing or unlistable `dir` is [`AggregateError::Directory`].
pub fn total_word_count(dir: &Path, opts: &ScanOpts) -> Result<WordTotal> {
    total_word_count_in(Arc::new(DirStore::new(dir)), opts)
}

/// [`total_word_count`] over any [`FileSource`]. Scans count tokens only; no tally is built.
pub fn total_word_count_in(source: Arc<dyn FileSource>, opts: &ScanOpts) -> Result<WordTotal> {
    log_config(opts);
    let aggregate = aggregate_source(source, ScanMode::TotalOnly, opts)?;
    pipeline_state(&opts.logger, RequestState::Done);
    Ok(WordTotal {
        total: aggregate.total,
        files_scanned: aggregate.files_scanned,
        failures: aggregate.failures,
    })
}

/// The `limit` most (`order == "dsc"`) or least (any other `order`) frequent words across
/// every file directly inside `dir`. Equal counts are ordered by ascending word bytes.
///
/// A negative `limit` is [`AggregateError::InvalidArgument`] and nothing is scanned.
pub fn top_words(dir: &Path, limit: i64, order: &str, opts: &ScanOpts) -> Result<TopWords> {
    top_words_in(Arc::new(DirStore::new(dir)), limit, order, opts)
}

/// [`top_words`] over any [`FileSource`].
pub fn top_words_in(
    source: Arc<dyn FileSource>,
    limit: i64,
    order: &str,
    opts: &ScanOpts,
) -> Result<TopWords> {
    let limit = validate_limit(limit)?;
    let order = Order::from_selector(order);
    log_config(opts);
    let aggregate = aggregate_source(source, ScanMode::Words, opts)?;

    pipeline_state(&opts.logger, RequestState::Ranking);
    let entries = rank(aggregate.tally, limit, order);
    pipeline_state(&opts.logger, RequestState::Done);
    Ok(TopWords {
        entries,
        total: aggregate.total,
        files_scanned: aggregate.files_scanned,
        failures: aggregate.failures,
    })
}
