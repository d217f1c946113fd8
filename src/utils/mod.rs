pub mod config;
pub mod fd_limit;
pub mod filestore_toml;
pub mod logger;

pub use config::*;
pub use fd_limit::cap_by_fd_limit;
pub use filestore_toml::{apply_file_to_opts, load_filestore_toml, parse_filestore_toml};
pub use logger::{CaptureLog, Logger, setup_logging};
