use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Command running in `cwd` (so no stray config file is picked up) against `store`.
fn filestore(cwd: &Path, store: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("filestore"));
    cmd.current_dir(cwd)
        .env_remove("FILESTORE_DIR")
        .env_remove("RUST_LOG")
        .arg("--store-dir")
        .arg(store);
    cmd
}

fn store_with(files: &[(&str, &str)]) -> TempDir {
    let temp = tempdir().unwrap();
    for (name, content) in files {
        write_file(&temp.path().join("store").join(name), content);
    }
    temp
}

#[test]
fn wc_prints_padded_total() {
    let temp = store_with(&[("a.txt", "a a b"), ("b.txt", "x y\nz")]);
    filestore(temp.path(), &temp.path().join("store"))
        .arg("wc")
        .assert()
        .success()
        .stdout("  6\n");
}

#[test]
fn freq_words_default_is_single_most_frequent() {
    let temp = store_with(&[("a", "cat dog"), ("b", "dog dog")]);
    filestore(temp.path(), &temp.path().join("store"))
        .arg("freq-words")
        .assert()
        .success()
        .stdout("  3 dog\n");
}

#[test]
fn freq_words_limit_and_order() {
    let temp = store_with(&[("a", "cat dog emu"), ("b", "dog dog emu")]);
    let store = temp.path().join("store");
    filestore(temp.path(), &store)
        .args(["freq-words", "-n", "10", "--order", "dsc"])
        .assert()
        .success()
        .stdout("  3 dog\n  2 emu\n  1 cat\n");
    filestore(temp.path(), &store)
        .args(["freq-words", "--limit", "2", "--order", "asc"])
        .assert()
        .success()
        .stdout("  1 cat\n  2 emu\n");
}

#[test]
fn freq_words_limit_zero_prints_nothing() {
    let temp = store_with(&[("a", "word")]);
    filestore(temp.path(), &temp.path().join("store"))
        .args(["freq-words", "-n", "0"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn freq_words_negative_limit_is_rejected() {
    let temp = store_with(&[("a", "word")]);
    filestore(temp.path(), &temp.path().join("store"))
        .args(["freq-words", "-n", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));
}

#[test]
fn unreadable_entry_is_skipped_with_warning() {
    let temp = store_with(&[("words", "x y x")]);
    fs::create_dir(temp.path().join("store/subdir")).unwrap();
    filestore(temp.path(), &temp.path().join("store"))
        .args(["freq-words", "-n", "5"])
        .assert()
        .success()
        .stdout("  2 x\n  1 y\n")
        .stderr(predicate::str::contains("skipped: subdir"));
}

#[test]
fn strict_flag_turns_skip_into_failure() {
    let temp = store_with(&[("words", "x y x")]);
    fs::create_dir(temp.path().join("store/subdir")).unwrap();
    filestore(temp.path(), &temp.path().join("store"))
        .args(["--strict", "wc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict mode"));
}

#[test]
fn wc_on_missing_store_fails() {
    let temp = tempdir().unwrap();
    filestore(temp.path(), &temp.path().join("missing"))
        .arg("wc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot list directory"));
}

#[test]
fn add_ls_update_rm_round_trip() {
    let temp = tempdir().unwrap();
    let store = temp.path().join("store");
    write_file(&temp.path().join("in/one.txt"), "alpha beta");
    write_file(&temp.path().join("in/two.txt"), "gamma");

    filestore(temp.path(), &store)
        .arg("add")
        .arg(temp.path().join("in/two.txt"))
        .arg(temp.path().join("in/one.txt"))
        .assert()
        .success();
    filestore(temp.path(), &store)
        .arg("ls")
        .assert()
        .success()
        .stdout("one.txt\ntwo.txt\n");

    filestore(temp.path(), &store)
        .arg("add")
        .arg(temp.path().join("in/one.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    write_file(&temp.path().join("in/one.txt"), "alpha");
    filestore(temp.path(), &store)
        .arg("update")
        .arg(temp.path().join("in/one.txt"))
        .assert()
        .success();
    filestore(temp.path(), &store)
        .arg("wc")
        .assert()
        .success()
        .stdout("  2\n");

    filestore(temp.path(), &store)
        .args(["rm", "two.txt"])
        .assert()
        .success();
    filestore(temp.path(), &store)
        .arg("ls")
        .assert()
        .success()
        .stdout("one.txt\n");
}

#[test]
fn config_file_in_working_directory_is_applied() {
    let temp = store_with(&[("words", "x y")]);
    fs::create_dir(temp.path().join("store/subdir")).unwrap();
    write_file(
        &temp.path().join(".filestore.toml"),
        "[settings]\nstrict = true\nworkers = 2\n",
    );
    filestore(temp.path(), &temp.path().join("store"))
        .arg("wc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict mode"));

    // Flags override the file.
    filestore(temp.path(), &temp.path().join("store"))
        .args(["--strict=false", "wc"])
        .assert()
        .success()
        .stdout("  2\n");
}

#[test]
fn rust_log_overrides_default_level() {
    let temp = store_with(&[("a", "one two")]);
    filestore(temp.path(), &temp.path().join("store"))
        .env("RUST_LOG", "filestore=debug")
        .arg("wc")
        .assert()
        .success()
        .stdout("  2\n")
        .stderr(predicate::str::contains("request state: Done"));
}

#[test]
fn store_dir_from_environment() {
    let temp = store_with(&[("a", "one two three")]);
    Command::new(assert_cmd::cargo::cargo_bin!("filestore"))
        .current_dir(temp.path())
        .env("FILESTORE_DIR", temp.path().join("store"))
        .arg("wc")
        .assert()
        .success()
        .stdout("  3\n");
}
