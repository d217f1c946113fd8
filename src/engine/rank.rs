//! Ranker: deterministic ordering and truncation of the merged tally.
//!
//! Primary key is the count in the requested direction. Equal counts are always ordered by
//! ascending word bytes, in both directions, so output never depends on hash-map iteration
//! or on which worker finished first.

use std::cmp::Ordering;

use crate::error::AggregateError;
use crate::{Order, RankedEntry, WordTally};

/// Convert a caller-supplied limit. Negative limits are rejected, not clamped.
pub fn validate_limit(limit: i64) -> Result<usize, AggregateError> {
    usize::try_from(limit).map_err(|_| {
        AggregateError::InvalidArgument(format!("limit must be zero or positive, got {limit}"))
    })
}

/// Total order used for ranking under `order`.
pub fn compare_entries(order: Order, a: &RankedEntry, b: &RankedEntry) -> Ordering {
    let by_count = match order {
        Order::Descending => b.count.cmp(&a.count),
        Order::Ascending => a.count.cmp(&b.count),
    };
    by_count.then_with(|| a.word.cmp(&b.word))
}

/// At most `limit` entries of `tally`, ranked.
pub fn rank(tally: WordTally, limit: usize, order: Order) -> Vec<RankedEntry> {
    if limit == 0 || tally.is_empty() {
        return Vec::new();
    }
    let mut entries: Vec<RankedEntry> = tally
        .into_iter()
        .map(|(word, count)| RankedEntry { word, count })
        .collect();
    let cmp = |a: &RankedEntry, b: &RankedEntry| compare_entries(order, a, b);
    if limit < entries.len() {
        // Partition so the first `limit` are the winners, then sort only those.
        entries.select_nth_unstable_by(limit - 1, cmp);
        entries.truncate(limit);
    }
    entries.sort_unstable_by(cmp);
    entries
}
