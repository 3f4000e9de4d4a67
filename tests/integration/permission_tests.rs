//! Unreadable files and directories are skipped, never fatal.
//!
//! These tests only run on unix and return early when the process can
//! still read a mode-000 file (e.g. when running as root).
#![cfg(unix)]

use dupefinder::duplicates::{find_duplicates, hash_candidates, HashConfig};
use dupefinder::scanner::{scan, DiagnosticSink, ScanConfig};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

#[derive(Default)]
struct Collect(Mutex<Vec<String>>);

impl DiagnosticSink for Collect {
    fn warn(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

fn set_mode(path: &Path, mode: u32) {
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}

/// True when permission bits are not enforced for this process.
fn permissions_ignored(dir: &Path) -> bool {
    let probe = dir.join(".probe");
    fs::write(&probe, b"x").unwrap();
    set_mode(&probe, 0o000);
    let readable = fs::File::open(&probe).is_ok();
    set_mode(&probe, 0o644);
    fs::remove_file(&probe).unwrap();
    readable
}

#[test]
fn test_unreadable_file_is_left_out() {
    let dir = tempdir().unwrap();
    if permissions_ignored(dir.path()) {
        return;
    }
    fs::write(dir.path().join("f1"), b"foo").unwrap();
    fs::write(dir.path().join("f2"), b"foo").unwrap();
    set_mode(&dir.path().join("f2"), 0o000);

    let sink = Arc::new(Collect::default());
    let hash = HashConfig::default()
        .with_worker_count(2)
        .with_verbose(true)
        .with_sink(sink.clone());
    let groups = find_duplicates(dir.path(), &ScanConfig::default(), &hash).unwrap();

    assert!(groups.is_empty());
    let warnings = sink.0.lock().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("f2"));
    drop(warnings);

    set_mode(&dir.path().join("f2"), 0o644);
}

#[test]
fn test_unreadable_directory_is_skipped() {
    let dir = tempdir().unwrap();
    if permissions_ignored(dir.path()) {
        return;
    }
    let open = dir.path().join("subdir.1");
    let locked = dir.path().join("subdir.2");
    fs::create_dir(&open).unwrap();
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("f"), b"foo\n").unwrap();
    fs::write(locked.join("f2"), b"foo\n").unwrap();
    fs::write(open.join("f3"), b"foo\n").unwrap();
    fs::write(open.join("f4"), b"foo\n").unwrap();
    set_mode(&locked, 0o000);

    let sink = Arc::new(Collect::default());
    let scan_config = ScanConfig::default().with_verbose(true).with_sink(sink.clone());
    let groups = find_duplicates(dir.path(), &scan_config, &HashConfig::default()).unwrap();

    assert_eq!(groups.len(), 1);
    let mut paths: Vec<_> = groups["d3b07384d113edec49eaa6238ad5ff00"]
        .iter()
        .map(|r| r.file.path.clone())
        .collect();
    paths.sort();
    assert_eq!(paths, vec![open.join("f3"), open.join("f4")]);
    assert_eq!(sink.0.lock().unwrap().len(), 1);

    set_mode(&locked, 0o755);
}

#[test]
fn test_skip_warnings_silent_without_verbose() {
    let dir = tempdir().unwrap();
    if permissions_ignored(dir.path()) {
        return;
    }
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    set_mode(&locked, 0o000);

    let sink = Arc::new(Collect::default());
    let (_, visited) = scan(dir.path(), &ScanConfig::default().with_sink(sink.clone())).unwrap();

    assert_eq!(visited, 0);
    assert!(sink.0.lock().unwrap().is_empty());

    set_mode(&locked, 0o755);
}

#[test]
fn test_unreadable_root_yields_nothing() {
    let dir = tempdir().unwrap();
    if permissions_ignored(dir.path()) {
        return;
    }
    let root = dir.path().join("root");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a"), b"1").unwrap();
    fs::write(root.join("b"), b"1").unwrap();
    set_mode(&root, 0o000);

    let result = scan(&root, &ScanConfig::default());

    set_mode(&root, 0o755);
    let (buckets, visited) = result.unwrap();
    assert!(buckets.is_empty());
    assert_eq!(visited, 0);
}

#[test]
fn test_file_locked_after_walk_counts_as_failed() {
    let dir = tempdir().unwrap();
    if permissions_ignored(dir.path()) {
        return;
    }
    fs::write(dir.path().join("a"), b"same").unwrap();
    fs::write(dir.path().join("b"), b"same").unwrap();

    let (buckets, _) = scan(dir.path(), &ScanConfig::default()).unwrap();
    set_mode(&dir.path().join("b"), 0o000);

    let (groups, stats) = hash_candidates(buckets, &HashConfig::default());

    assert_eq!(stats.submitted, 2);
    assert_eq!(stats.hashed, 1);
    assert_eq!(stats.failed, 1);
    assert_eq!(groups.len(), 1);

    set_mode(&dir.path().join("b"), 0o644);
}
