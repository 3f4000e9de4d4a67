use dupefinder::duplicates::{DuplicateFinder, FinderConfig, HashConfig};
use dupefinder::scanner::ScanConfig;
use std::fs;
use tempfile::tempdir;

const FILE_COUNT: usize = 20_000;

/// Tens of thousands of candidates must not exhaust file descriptors:
/// the bounded pool keeps open handles near the worker count.
#[test]
fn test_many_candidates_with_bounded_pool() {
    let dir = tempdir().unwrap();
    for i in 0..FILE_COUNT {
        // Distinct content, but sizes collide heavily so every file is hashed
        fs::write(dir.path().join(format!("{}.txt", i)), i.to_string()).unwrap();
    }
    let first = dir.path().join("f.txt");
    let second = dir.path().join("f2.txt");
    fs::write(&first, b"foo").unwrap();
    fs::write(&second, b"foo").unwrap();

    let config = FinderConfig::new(
        ScanConfig::default(),
        HashConfig::default().with_worker_count(2),
    );
    let (groups, summary) = DuplicateFinder::new(config)
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.total_files, FILE_COUNT as u64 + 2);
    assert_eq!(summary.failed_files, 0);
    assert_eq!(groups.len(), 1);

    let mut paths: Vec<_> = groups["acbd18db4cc2f85cedef654fccc4a4d8"]
        .iter()
        .map(|r| r.file.path.clone())
        .collect();
    paths.sort();
    assert_eq!(paths, vec![first, second]);
}
