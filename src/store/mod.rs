//! Storage collaborator: lists stored files and opens them for reading.

pub mod dir_store;

pub use dir_store::{DirStore, validate_name};

use std::io::{self, Read};
use std::path::Path;

use crate::FileDescriptor;

/// Byte stream for one stored file.
pub type FileReader = Box<dyn Read + Send>;

/// Where aggregation reads its files from. Implementations must be usable from many
/// scan workers at once.
pub trait FileSource: Send + Sync {
    /// Directory (or other location) the listing comes from; used in error messages.
    fn location(&self) -> &Path;

    /// All files to scan, in a stable order. Failure here aborts the whole request.
    fn list_files(&self) -> io::Result<Vec<FileDescriptor>>;

    /// Open one listed file for streaming reads.
    fn open_for_read(&self, file: &FileDescriptor) -> io::Result<FileReader>;
}
