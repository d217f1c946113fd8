//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::path::PathBuf;
use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
}

/// Environment variable overriding the default store dir. Read by the CLI parser.
pub const STORE_DIR_ENV: &str = "FILESTORE_DIR";

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Directory name under the home directory used when no store dir is configured.
    pub const DEFAULT_STORE_DIR_NAME: &'static str = "store";

    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Config file looked up in the current working directory (`.filestore.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// `~/store`, or `./store` when no home directory can be resolved.
    pub fn default_store_dir(&self) -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(Self::DEFAULT_STORE_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_STORE_DIR_NAME))
    }
}

// ---- Worker threads ----

/// Bounds for the scan worker pool.
/// Use [`WorkerLimits::current()`] to fill `logical_cpus` from rayon; the rest are const.
#[derive(Clone, Copy, Debug)]
pub struct WorkerLimits {
    /// Logical CPUs (from rayon); set by [`WorkerLimits::current()`].
    pub logical_cpus: usize,
    /// Workers per logical CPU. Scans block on file I/O, so oversubscribe.
    pub per_cpu: usize,
    /// Never fewer workers than this (when there is work at all).
    pub floor: usize,
}

impl Default for WorkerLimits {
    fn default() -> Self {
        Self {
            logical_cpus: 0, // use current() to set from rayon
            per_cpu: Self::WORKERS_PER_CPU,
            floor: Self::FLOOR_WORKERS,
        }
    }
}

impl WorkerLimits {
    pub const WORKERS_PER_CPU: usize = 4;
    pub const FLOOR_WORKERS: usize = 1;

    /// Build limits with `logical_cpus` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            logical_cpus: rayon::current_num_threads(),
            ..Self::default()
        }
    }

    /// Default bound when the caller does not set one.
    pub fn default_workers(&self) -> usize {
        (self.logical_cpus * self.per_cpu).max(self.floor)
    }
}

// ---- Scanning ----

/// Scanner I/O sizes.
pub struct ScanConsts;

impl ScanConsts {
    /// Bytes read per call while tokenizing a file. 64 KB.
    pub const READ_CHUNK_SIZE: usize = 64 * 1024;
}

// ---- Channels ----

/// Task and outcome channel capacity per worker. Keeps the queues bounded no matter
/// how many files the store holds.
pub const QUEUE_SLOTS_PER_WORKER: usize = 4;
