//! Fan-out: a dispatcher thread feeds a bounded task queue; a fixed pool of scan workers
//! drains it and reports one outcome per task on the shared outcome channel.

use crossbeam_channel::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::pipeline::CancelToken;
use crate::pipeline::scanner::scan_reader;
use crate::error::FileError;
use crate::{FileDescriptor, FileFailure, FileTask, ScanOutcome};

use super::context::WorkerContext;

/// Push every file onto `task_tx` in listing order. Stops early when cancelled or when all
/// workers are gone. Drops `task_tx` when done so idle workers exit. Returns the number sent.
pub fn spawn_dispatch_thread(
    task_tx: Sender<FileTask>,
    files: Vec<FileDescriptor>,
    cancel: CancelToken,
) -> JoinHandle<usize> {
    thread::spawn(move || {
        let mut sent = 0_usize;
        for (seq, file) in files.into_iter().enumerate() {
            if cancel.is_cancelled() {
                break;
            }
            if task_tx.send(FileTask { seq, file }).is_err() {
                break;
            }
            sent += 1;
        }
        drop(task_tx);
        sent
    })
}

/// Single scan worker: take tasks until the queue closes, send exactly one outcome per task.
fn scan_worker_loop(
    task_rx: Receiver<FileTask>,
    outcome_tx: Sender<ScanOutcome>,
    ctx: WorkerContext,
) {
    while let Ok(task) = task_rx.recv() {
        let outcome = scan_task(task, &ctx);
        if outcome_tx.send(outcome).is_err() {
            break;
        }
    }
    drop(outcome_tx);
}

/// Spawn `num_workers` scan workers. Caller must drop its own `outcome_tx` afterwards so the
/// outcome channel closes once the last worker exits.
pub fn spawn_scan_workers(
    task_rx: Receiver<FileTask>,
    outcome_tx: &Sender<ScanOutcome>,
    ctx: &WorkerContext,
    num_workers: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_workers)
        .map(|_| {
            let task_rx = task_rx.clone();
            let outcome_tx = outcome_tx.clone();
            let ctx = ctx.clone();
            thread::spawn(move || scan_worker_loop(task_rx, outcome_tx, ctx))
        })
        .collect()
}

/// Open and scan one file. Failures stay local to the file.
pub fn scan_task(task: FileTask, ctx: &WorkerContext) -> ScanOutcome {
    let FileTask { seq, file } = task;
    let result = if ctx.cancel.is_cancelled() {
        Err(FileError::Cancelled)
    } else {
        ctx.source
            .open_for_read(&file)
            .map_err(FileError::Open)
            .and_then(|reader| scan_reader(reader, ctx.mode, &ctx.cancel))
    };
    match result {
        Ok(partial) => {
            ctx.logger.debug(format_args!(
                "scanned {} ({} tokens)",
                file.name, partial.total
            ));
            ScanOutcome::Scanned { seq, file, partial }
        }
        Err(cause) => {
            if !cause.is_cancelled() {
                ctx.logger
                    .debug(format_args!("failed to scan {}: {}", file.name, cause));
            }
            ScanOutcome::Failed(FileFailure { seq, file, cause })
        }
    }
}
