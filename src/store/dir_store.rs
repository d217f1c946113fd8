//! Flat directory store: listing and reading for aggregation, plus add/update/remove.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::FileDescriptor;
use crate::error::StoreError;

use super::{FileReader, FileSource};

/// Files kept directly inside one directory (no sub-directories are walked).
#[derive(Clone, Debug)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Store over `dir`. Nothing is checked or created; reads fail later if it is missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store over `dir`, creating the directory (and parents) if missing.
    pub fn open_or_create(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io("create store dir", &dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stored entry names, sorted.
    pub fn names(&self) -> Result<Vec<String>, StoreError> {
        let files = self
            .list_files()
            .map_err(|e| StoreError::io("list store", &self.dir, e))?;
        Ok(files.into_iter().map(|f| f.name).collect())
    }

    /// Copy each source file into the store under its file name. Every name is checked
    /// before anything is copied; an existing name fails the whole call.
    pub fn add(&self, sources: &[PathBuf]) -> Result<Vec<String>, StoreError> {
        let mut planned: Vec<(&Path, String)> = Vec::with_capacity(sources.len());
        for src in sources {
            let name = name_from_source(src)?;
            if self.dir.join(&name).exists() || planned.iter().any(|(_, n)| *n == name) {
                return Err(StoreError::AlreadyExists(name));
            }
            planned.push((src.as_path(), name));
        }

        let mut added = Vec::with_capacity(planned.len());
        for (src, name) in planned {
            let dest = self.dir.join(&name);
            let mut input = File::open(src).map_err(|e| StoreError::io("open", src, e))?;
            let mut output = match OpenOptions::new().write(true).create_new(true).open(&dest) {
                Ok(f) => f,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    return Err(StoreError::AlreadyExists(name));
                }
                Err(e) => return Err(StoreError::io("create", &dest, e)),
            };
            if let Err(e) = io::copy(&mut input, &mut output) {
                drop(output);
                let _ = fs::remove_file(&dest);
                return Err(StoreError::io("copy into", &dest, e));
            }
            added.push(name);
        }
        Ok(added)
    }

    /// Create or replace the stored file named like `source`. The new content is written to a
    /// temp file next to it and renamed over the old one.
    pub fn update(&self, source: &Path) -> Result<String, StoreError> {
        let name = name_from_source(source)?;
        let dest = self.dir.join(&name);
        let temp = temp_path_for(&self.dir, &name);

        let result = fs::copy(source, &temp)
            .map_err(|e| StoreError::io("copy", source, e))
            .and_then(|_| fs::rename(&temp, &dest).map_err(|e| StoreError::io("replace", &dest, e)));
        if result.is_err() {
            let _ = fs::remove_file(&temp);
        }
        result.map(|_| name)
    }

    /// Delete one stored file.
    pub fn remove(&self, name: &str) -> Result<(), StoreError> {
        let name = validate_name(name)?;
        let path = self.dir.join(name);
        fs::remove_file(&path).map_err(|e| StoreError::io("remove", &path, e))
    }
}

impl FileSource for DirStore {
    fn location(&self) -> &Path {
        &self.dir
    }

    fn list_files(&self) -> io::Result<Vec<FileDescriptor>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(io::Error::from)?;
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            files.push(FileDescriptor {
                name: entry.file_name().to_string_lossy().into_owned(),
                size,
                path: entry.into_path(),
            });
        }
        Ok(files)
    }

    fn open_for_read(&self, file: &FileDescriptor) -> io::Result<FileReader> {
        let f = File::open(&file.path)?;
        Ok(Box::new(f))
    }
}

/// Accept `name` only if it is a single, ordinary path component.
pub fn validate_name(name: &str) -> Result<&str, StoreError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(name)
}

fn name_from_source(source: &Path) -> Result<String, StoreError> {
    let name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StoreError::InvalidName(source.display().to_string()))?;
    validate_name(name).map(str::to_string)
}

fn temp_path_for(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!(".{name}.{}-tmp", env!("CARGO_PKG_NAME")))
}
