use std::sync::Arc;
use std::thread::JoinHandle;

use crate::engine::aggregate::Aggregator;
use crate::engine::progress::{create_progress_bar, finish_progress_bar, update_progress_bar};
use crate::error::AggregateError;
use crate::store::FileSource;
use crate::{Aggregate, FileDescriptor, RequestState, ScanMode, ScanOpts};

use super::context::{PipelineHandles, PipelineTuning, WorkerContext, create_pipeline_channels};
use super::error_handler::check_for_failed_files;
use super::scheduler::{spawn_dispatch_thread, spawn_scan_workers};
use super::pipeline_state;

/// Start the dispatch + scan pipeline over an already listed set of files. Caller receives
/// from `outcome_rx` until it closes and must then join the handles.
pub fn run_pipeline(
    files: Vec<FileDescriptor>,
    ctx: &WorkerContext,
    tuning: PipelineTuning,
) -> PipelineHandles {
    let channels = create_pipeline_channels(tuning.channel_cap);

    let dispatch_handle = spawn_dispatch_thread(channels.task_tx, files, ctx.cancel.clone());

    let worker_handles =
        spawn_scan_workers(channels.task_rx, &channels.outcome_tx, ctx, tuning.num_workers);

    // Dropping the last sender closes the channel so the consumer sees the end.
    drop(channels.outcome_tx);

    PipelineHandles {
        outcome_rx: channels.outcome_rx,
        dispatch_handle,
        worker_handles,
        tuning,
    }
}

/// Join dispatcher and workers (after the outcome stream is drained). Returns how many tasks
/// were dispatched.
pub fn shutdown_pipeline_handles(
    dispatch_handle: JoinHandle<usize>,
    worker_handles: Vec<JoinHandle<()>>,
) -> Result<usize, AggregateError> {
    let dispatched = dispatch_handle
        .join()
        .map_err(|_| AggregateError::Internal("dispatch thread panicked".into()))?;
    let mut panicked = 0;
    for h in worker_handles {
        if h.join().is_err() {
            panicked += 1;
        }
    }
    if panicked > 0 {
        return Err(AggregateError::Internal(format!(
            "{panicked} scan worker(s) panicked"
        )));
    }
    Ok(dispatched)
}

/// Reject option values that would make the request meaningless before any work starts.
pub fn validate_scan_opts(opts: &ScanOpts) -> Result<(), AggregateError> {
    if opts.workers == Some(0) {
        return Err(AggregateError::InvalidArgument(
            "worker count must be at least 1".into(),
        ));
    }
    Ok(())
}

/// Main orchestrator: list the source, scan every file on the worker pool, and fold all
/// outcomes into one [`Aggregate`] on the calling thread.
///
/// Listing failure aborts before anything is dispatched. Cancellation (flag or deadline)
/// yields [`AggregateError::Cancelled`], never a truncated result.
pub fn aggregate_source(
    source: Arc<dyn FileSource>,
    mode: ScanMode,
    opts: &ScanOpts,
) -> Result<Aggregate, AggregateError> {
    validate_scan_opts(opts)?;
    let logger = &opts.logger;
    let cancel = opts
        .cancel
        .clone()
        .unwrap_or_default()
        .child_with_timeout(opts.timeout);

    let files = source
        .list_files()
        .map_err(|e| AggregateError::Directory {
            dir: source.location().to_path_buf(),
            source: e,
        })?;
    let file_count = files.len();
    if cancel.is_cancelled() {
        return Err(AggregateError::Cancelled);
    }

    pipeline_state(logger, RequestState::Dispatching);
    let tuning = PipelineTuning::for_request(opts.workers, file_count);
    logger.debug(format_args!(
        "{} files, {} scan workers, queue capacity {}",
        file_count, tuning.num_workers, tuning.channel_cap
    ));
    let ctx = WorkerContext {
        source,
        mode,
        cancel: cancel.clone(),
        logger: logger.clone(),
    };
    let PipelineHandles {
        outcome_rx,
        dispatch_handle,
        worker_handles,
        ..
    } = run_pipeline(files, &ctx, tuning);

    pipeline_state(logger, RequestState::AwaitingAll);
    let mut bar = opts
        .show_progress
        .then(|| create_progress_bar(file_count, "Scanning"));
    let mut aggregator = Aggregator::new(mode);
    while let Ok(outcome) = outcome_rx.recv() {
        aggregator.absorb(outcome);
        if let Some(bar) = bar.as_mut() {
            update_progress_bar(bar, 1);
        }
    }
    if let Some(bar) = bar.as_mut() {
        finish_progress_bar(bar);
    }
    let dispatched = shutdown_pipeline_handles(dispatch_handle, worker_handles)?;

    pipeline_state(logger, RequestState::Merging);
    if aggregator.saw_cancelled() || (cancel.is_cancelled() && dispatched < file_count) {
        logger.debug(format_args!(
            "cancelled after {} of {} files",
            aggregator.received(),
            file_count
        ));
        return Err(AggregateError::Cancelled);
    }
    if aggregator.received() != file_count {
        return Err(AggregateError::Internal(format!(
            "expected {} scan outcomes, received {}",
            file_count,
            aggregator.received()
        )));
    }

    check_for_failed_files(opts, aggregator.finish())
}
