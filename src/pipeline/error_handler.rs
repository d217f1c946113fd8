use crate::error::AggregateError;
use crate::{Aggregate, ScanOpts};

/// Check the merged result for per-file failures: in strict mode the first one (by listing
/// order) fails the request; otherwise each is logged and the partial result is kept.
/// Call after the pipeline has been joined.
pub fn check_for_failed_files(
    opts: &ScanOpts,
    mut aggregate: Aggregate,
) -> Result<Aggregate, AggregateError> {
    if aggregate.failures.is_empty() {
        return Ok(aggregate);
    }
    let failed = aggregate.failures.len();
    if opts.strict {
        let first = aggregate.failures.swap_remove(0);
        return Err(AggregateError::FileIo {
            name: first.file.name,
            failed,
            cause: first.cause,
        });
    }
    opts.logger.warn(format_args!(
        "Skipped {} of {} files that could not be read",
        failed,
        failed + aggregate.files_scanned
    ));
    for failure in &aggregate.failures {
        opts.logger
            .warn(format_args!("  skipped: {}: {}", failure.file.name, failure.cause));
    }
    Ok(aggregate)
}
