//! File descriptor limit detection for capping concurrent scans (Unix).

/// File descriptors held by one scan worker (the open file, plus slack).
const FDS_PER_WORKER: usize = 2;

/// Fraction of the process FD limit to use (leave headroom for other code).
const FD_LIMIT_FRACTION: f64 = 0.8;

/// Returns the soft limit for max open file descriptors, or `None` if unavailable (e.g. Windows).
#[cfg(unix)]
fn max_open_fds() -> Option<u64> {
    use std::mem::MaybeUninit;
    let mut rlim = MaybeUninit::<libc::rlimit>::uninit();
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, rlim.as_mut_ptr()) } != 0 {
        return None;
    }
    let rlim = unsafe { rlim.assume_init() };
    let cur = rlim.rlim_cur;
    // RLIM_INFINITY is typically !0 or u64::MAX; treat as "no practical limit"
    if cur == libc::RLIM_INFINITY || cur > i64::MAX as u64 {
        return None;
    }
    Some(cur)
}

#[cfg(not(unix))]
fn max_open_fds() -> Option<u64> {
    None
}

/// Max workers that keep open files under ~80% of the FD limit.
/// Returns `None` if no limit is available (use caller's default).
fn max_workers_by_fd_limit() -> Option<usize> {
    let limit = max_open_fds()?;
    let usable = (limit as f64 * FD_LIMIT_FRACTION) as usize;
    if usable < FDS_PER_WORKER {
        return Some(1);
    }
    Some(usable / FDS_PER_WORKER)
}

/// Lower `workers` to what the FD limit allows; unchanged when there is no limit.
pub fn cap_by_fd_limit(workers: usize) -> usize {
    match max_workers_by_fd_limit() {
        Some(fd_cap) if fd_cap < workers => fd_cap,
        _ => workers,
    }
}
