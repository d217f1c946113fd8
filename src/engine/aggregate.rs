//! Fan-in reduction: folds scan outcomes into one tally and total on a single thread.
//!
//! Workers never touch the accumulating map; they hand over owned partials through the
//! outcome channel and this stage is the only writer, so no locking is involved.

use crate::{Aggregate, ScanMode, ScanOutcome, WordTally};

/// Add every count of `partial` into `into`. Key-wise sum; commutative and associative.
pub fn merge_tally(into: &mut WordTally, mut partial: WordTally) {
    // Fold the smaller map into the larger one.
    if partial.len() > into.len() {
        std::mem::swap(into, &mut partial);
    }
    for (word, count) in partial {
        *into.entry(word).or_insert(0) += count;
    }
}

/// Single-consumer accumulator for one request.
#[derive(Debug)]
pub struct Aggregator {
    mode: ScanMode,
    acc: Aggregate,
    received: usize,
    cancelled: usize,
}

impl Aggregator {
    pub fn new(mode: ScanMode) -> Self {
        Self {
            mode,
            acc: Aggregate::default(),
            received: 0,
            cancelled: 0,
        }
    }

    /// Take one outcome. Successful partials are summed in; failures are recorded and
    /// contribute nothing; abandoned (cancelled) scans are only counted.
    pub fn absorb(&mut self, outcome: ScanOutcome) {
        self.received += 1;
        match outcome {
            ScanOutcome::Scanned { partial, .. } => {
                self.acc.total += partial.total;
                self.acc.files_scanned += 1;
                if self.mode == ScanMode::Words {
                    merge_tally(&mut self.acc.tally, partial.tally);
                }
            }
            ScanOutcome::Failed(failure) if failure.cause.is_cancelled() => {
                self.cancelled += 1;
            }
            ScanOutcome::Failed(failure) => self.acc.failures.push(failure),
        }
    }

    /// Outcomes absorbed so far, of any kind.
    pub fn received(&self) -> usize {
        self.received
    }

    pub fn saw_cancelled(&self) -> bool {
        self.cancelled > 0
    }

    /// Merged result; failures ordered by listing position so reports are stable.
    pub fn finish(mut self) -> Aggregate {
        self.acc.failures.sort_by_key(|f| f.seq);
        self.acc
    }
}

/// Fold a finished set of outcomes, in whatever order they arrived.
pub fn aggregate_outcomes<I>(mode: ScanMode, outcomes: I) -> Aggregate
where
    I: IntoIterator<Item = ScanOutcome>,
{
    let mut aggregator = Aggregator::new(mode);
    for outcome in outcomes {
        aggregator.absorb(outcome);
    }
    aggregator.finish()
}
