//! Store maintenance and listing tests.

use filestore::store::{FileSource, validate_name};
use filestore::{DirStore, StoreError};
use std::fs;
use std::io::Read;
use std::path::Path;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_open_or_create_makes_missing_dir() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("deep/store");
    let store = DirStore::open_or_create(&dir).unwrap();
    assert!(dir.is_dir());
    assert!(store.names().unwrap().is_empty());
}

#[test]
fn test_add_copies_files_and_lists_sorted() {
    let temp = tempdir().unwrap();
    let src = temp.path().join("src");
    write_file(&src.join("b.txt"), "bee");
    write_file(&src.join("a.txt"), "ay");
    let store = DirStore::open_or_create(temp.path().join("store")).unwrap();

    let added = store
        .add(&[src.join("b.txt"), src.join("a.txt")])
        .unwrap();
    assert_eq!(added, vec!["b.txt", "a.txt"]);
    assert_eq!(store.names().unwrap(), vec!["a.txt", "b.txt"]);
    assert_eq!(
        fs::read_to_string(store.dir().join("b.txt")).unwrap(),
        "bee"
    );
}

#[test]
fn test_add_existing_name_conflicts_and_copies_nothing() {
    let temp = tempdir().unwrap();
    let src = temp.path().join("src");
    write_file(&src.join("new.txt"), "new");
    write_file(&src.join("dup.txt"), "replacement");
    let store = DirStore::open_or_create(temp.path().join("store")).unwrap();
    write_file(&store.dir().join("dup.txt"), "original");

    let err = store
        .add(&[src.join("new.txt"), src.join("dup.txt")])
        .unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(ref n) if n == "dup.txt"));
    assert_eq!(store.names().unwrap(), vec!["dup.txt"]);
    assert_eq!(
        fs::read_to_string(store.dir().join("dup.txt")).unwrap(),
        "original"
    );
}

#[test]
fn test_add_same_name_twice_in_one_call_conflicts() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("x/f.txt"), "1");
    write_file(&temp.path().join("y/f.txt"), "2");
    let store = DirStore::open_or_create(temp.path().join("store")).unwrap();
    let err = store
        .add(&[temp.path().join("x/f.txt"), temp.path().join("y/f.txt")])
        .unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(_)));
    assert!(store.names().unwrap().is_empty());
}

#[test]
fn test_add_missing_source_is_io_error() {
    let temp = tempdir().unwrap();
    let store = DirStore::open_or_create(temp.path().join("store")).unwrap();
    let err = store.add(&[temp.path().join("ghost.txt")]).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}

#[test]
fn test_failed_copy_leaves_nothing_behind() {
    let temp = tempdir().unwrap();
    // Opening a directory succeeds on Unix but reading it fails mid-copy.
    fs::create_dir(temp.path().join("adir")).unwrap();
    let store = DirStore::open_or_create(temp.path().join("store")).unwrap();

    let err = store.add(&[temp.path().join("adir")]).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(store.names().unwrap().is_empty());

    // A retry with a real file of the same name is not blocked.
    fs::remove_dir(temp.path().join("adir")).unwrap();
    write_file(&temp.path().join("adir"), "now a file");
    assert_eq!(store.add(&[temp.path().join("adir")]).unwrap(), vec!["adir"]);
}

#[test]
fn test_update_replaces_and_truncates() {
    let temp = tempdir().unwrap();
    let store = DirStore::open_or_create(temp.path().join("store")).unwrap();
    write_file(&store.dir().join("notes"), "a much longer original body");
    write_file(&temp.path().join("notes"), "short");

    assert_eq!(store.update(&temp.path().join("notes")).unwrap(), "notes");
    assert_eq!(
        fs::read_to_string(store.dir().join("notes")).unwrap(),
        "short"
    );
    assert_eq!(store.names().unwrap(), vec!["notes"]);
}

#[test]
fn test_update_creates_when_absent() {
    let temp = tempdir().unwrap();
    let store = DirStore::open_or_create(temp.path().join("store")).unwrap();
    write_file(&temp.path().join("fresh"), "hi");
    store.update(&temp.path().join("fresh")).unwrap();
    assert_eq!(store.names().unwrap(), vec!["fresh"]);
}

#[test]
fn test_remove() {
    let temp = tempdir().unwrap();
    let store = DirStore::open_or_create(temp.path()).unwrap();
    write_file(&store.dir().join("gone"), "x");
    store.remove("gone").unwrap();
    assert!(store.names().unwrap().is_empty());
    assert!(matches!(store.remove("gone"), Err(StoreError::Io { .. })));
}

#[test]
fn test_remove_rejects_path_traversal() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("outside"), "keep me");
    let store = DirStore::open_or_create(temp.path().join("store")).unwrap();
    assert!(matches!(
        store.remove("../outside"),
        Err(StoreError::InvalidName(_))
    ));
    assert!(temp.path().join("outside").exists());
}

#[test]
fn test_validate_name() {
    assert!(validate_name("report.txt").is_ok());
    assert!(validate_name(".hidden").is_ok());
    for bad in ["", ".", "..", "a/b", "a\\b", "nul\0"] {
        assert!(validate_name(bad).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn test_list_files_describes_entries() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("b"), "12345");
    write_file(&temp.path().join("a"), "");
    write_file(&temp.path().join("sub/inner"), "not listed");
    let store = DirStore::new(temp.path());

    let files = store.list_files().unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "sub"]);
    assert_eq!(files[1].size, 5);
    assert_eq!(files[1].path, temp.path().join("b"));
}

#[test]
fn test_open_for_read_streams_content() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("f"), "stream me");
    let store = DirStore::new(temp.path());
    let files = store.list_files().unwrap();
    let mut content = String::new();
    store
        .open_for_read(&files[0])
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "stream me");
}

#[test]
fn test_list_missing_dir_fails() {
    let temp = tempdir().unwrap();
    let store = DirStore::new(temp.path().join("absent"));
    assert!(store.list_files().is_err());
    assert!(matches!(store.names(), Err(StoreError::Io { .. })));
}
