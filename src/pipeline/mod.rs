//! Pipeline components: cancellation, scanner, channels, fan-out workers, orchestrator.

pub mod cancel;
pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod scanner;
pub mod scheduler;

pub use cancel::CancelToken;
pub use context::{
    PipelineChannels, PipelineHandles, PipelineTuning, WorkerContext, create_pipeline_channels,
};
pub use error_handler::check_for_failed_files;
pub use orchestrator::{aggregate_source, run_pipeline, shutdown_pipeline_handles};
pub use scanner::{Tokenizer, is_word_separator, scan_bytes, scan_reader};
pub use scheduler::{scan_task, spawn_dispatch_thread, spawn_scan_workers};

use crate::RequestState;
use crate::utils::Logger;

/// Log a request state transition.
pub(crate) fn pipeline_state(logger: &Logger, state: RequestState) {
    logger.debug(format_args!("request state: {:?}", state));
}
