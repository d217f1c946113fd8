//! Pipeline context and tuning: channels, worker bound, and the handles the caller joins.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::store::FileSource;
use crate::utils::Logger;
use crate::utils::config::{QUEUE_SLOTS_PER_WORKER, WorkerLimits};
use crate::utils::fd_limit::cap_by_fd_limit;
use crate::{FileTask, ScanMode, ScanOutcome};

use super::CancelToken;

/// Worker count and channel capacity for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineTuning {
    pub num_workers: usize,
    /// Capacity of both the task queue and the outcome queue.
    pub channel_cap: usize,
}

impl PipelineTuning {
    /// `requested` (already validated ≥ 1) or the CPU-derived default, capped by the FD
    /// limit and by `file_count`, never below 1.
    pub fn for_request(requested: Option<usize>, file_count: usize) -> Self {
        let wanted = requested.unwrap_or_else(|| WorkerLimits::current().default_workers());
        let num_workers = cap_by_fd_limit(wanted).min(file_count).max(1);
        Self {
            num_workers,
            channel_cap: num_workers * QUEUE_SLOTS_PER_WORKER,
        }
    }
}

/// Shared, read-only context for scan workers.
#[derive(Clone)]
pub struct WorkerContext {
    pub source: Arc<dyn FileSource>,
    pub mode: ScanMode,
    pub cancel: CancelToken,
    pub logger: Logger,
}

/// Channels for the pipeline. Dispatcher gets task_tx; workers get task_rx and outcome_tx;
/// the caller keeps outcome_rx.
pub struct PipelineChannels {
    pub task_tx: Sender<FileTask>,
    pub task_rx: Receiver<FileTask>,
    pub outcome_tx: Sender<ScanOutcome>,
    pub outcome_rx: Receiver<ScanOutcome>,
}

pub fn create_pipeline_channels(channel_cap: usize) -> PipelineChannels {
    let (task_tx, task_rx) = bounded::<FileTask>(channel_cap);
    let (outcome_tx, outcome_rx) = bounded::<ScanOutcome>(channel_cap);
    PipelineChannels {
        task_tx,
        task_rx,
        outcome_tx,
        outcome_rx,
    }
}

/// Handles returned by [`run_pipeline`](super::run_pipeline): receive outcomes until the
/// channel closes, then join.
/// `dispatch_handle` returns how many tasks were dispatched (fewer than the listing on cancel).
pub struct PipelineHandles {
    pub outcome_rx: Receiver<ScanOutcome>,
    pub dispatch_handle: JoinHandle<usize>,
    pub worker_handles: Vec<JoinHandle<()>>,
    pub tuning: PipelineTuning,
}
