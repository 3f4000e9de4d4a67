use dupefinder::duplicates::{
    filter_candidates, find_duplicates, find_size_duplicates, hash_all, HashConfig, HashGroups,
};
use dupefinder::scanner::{scan, HashAlgorithm, ScanConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

/// `a` holds "writes\n"; `b`, `c`, `d` are empty files spread over subdirectories.
fn writes_tree() -> TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("x").join("y")).unwrap();
    fs::write(dir.path().join("a"), b"writes\n").unwrap();
    fs::write(dir.path().join("x").join("b"), b"").unwrap();
    fs::write(dir.path().join("x").join("y").join("c"), b"").unwrap();
    fs::write(dir.path().join("d"), b"").unwrap();
    dir
}

fn sorted_paths(groups: &HashGroups, digest: &str) -> Vec<PathBuf> {
    let mut paths: Vec<_> = groups[digest].iter().map(|r| r.file.path.clone()).collect();
    paths.sort();
    paths
}

fn two_copies(dir: &Path, content: &[u8]) {
    fs::write(dir.join("one"), content).unwrap();
    fs::write(dir.join("two"), content).unwrap();
}

#[test]
fn test_empty_files_form_one_group() {
    let dir = writes_tree();

    let groups = find_duplicates(dir.path(), &ScanConfig::default(), &HashConfig::default())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(
        sorted_paths(&groups, EMPTY_MD5),
        vec![
            dir.path().join("d"),
            dir.path().join("x").join("b"),
            dir.path().join("x").join("y").join("c"),
        ]
    );
    for record in &groups[EMPTY_MD5] {
        assert_eq!(record.file.size, 0);
        assert_eq!(record.digest, EMPTY_MD5);
    }
}

#[test]
fn test_min_size_excludes_empty_files() {
    let dir = writes_tree();

    let groups = find_duplicates(
        dir.path(),
        &ScanConfig::new(1, None, Vec::<String>::new()),
        &HashConfig::default(),
    )
    .unwrap();

    assert!(groups.is_empty());
}

#[test]
fn test_digest_per_algorithm() {
    let cases = [
        (HashAlgorithm::Md5, "9d365f59076828add0b000414583cb33"),
        (HashAlgorithm::Sha1, "67503a007b3829965fde57d51768bdb32bb0389f"),
        (
            HashAlgorithm::Sha256,
            "fd6e46528c86f5f2a43aa9f013bf64fcc6939606e077bf3a4b14ef09fcb46f59",
        ),
        (HashAlgorithm::Xxhash, "b59acf3d21a6a54a"),
    ];
    let dir = tempdir().unwrap();
    two_copies(dir.path(), b"writes\n");

    for (algorithm, expected) in cases {
        let config = HashConfig::default().with_algorithm(algorithm);
        let groups = find_duplicates(dir.path(), &ScanConfig::default(), &config).unwrap();

        assert_eq!(groups.len(), 1, "{}", algorithm);
        assert_eq!(groups[expected].len(), 2, "{}", algorithm);
        assert_eq!(expected.len(), algorithm.hex_len());
    }
}

#[test]
fn test_partial_hash_groups_files_with_common_head() {
    let dir = tempdir().unwrap();
    let mut first = vec![0u8; 400_000];
    let mut second = vec![0u8; 400_000];
    first[399_999] = 1;
    second[399_999] = 2;
    fs::write(dir.path().join("first"), &first).unwrap();
    fs::write(dir.path().join("second"), &second).unwrap();

    let full = find_duplicates(dir.path(), &ScanConfig::default(), &HashConfig::default())
        .unwrap();
    assert!(full.is_empty());

    let partial = find_duplicates(
        dir.path(),
        &ScanConfig::default(),
        &HashConfig::default().with_partial(10),
    )
    .unwrap();
    assert_eq!(partial.len(), 1);
    assert_eq!(partial["a63c90cc3684ad8b0a2176a6a8fe9005"].len(), 2);
}

#[test]
fn test_partial_limit_beyond_file_size_hashes_whole_file() {
    let dir = tempdir().unwrap();
    two_copies(dir.path(), b"foo");

    let groups = find_duplicates(
        dir.path(),
        &ScanConfig::default(),
        &HashConfig::default().with_partial(1_000_000),
    )
    .unwrap();

    assert_eq!(groups["acbd18db4cc2f85cedef654fccc4a4d8"].len(), 2);
}

#[test]
fn test_size_only_reports_collisions_without_reading() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"abc").unwrap();
    fs::write(dir.path().join("b"), b"xyz").unwrap();
    fs::write(dir.path().join("c"), b"longer").unwrap();

    let groups = find_size_duplicates(dir.path(), &ScanConfig::default()).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[&3].len(), 2);

    // Content hashing tells them apart
    let hashed = find_duplicates(dir.path(), &ScanConfig::default(), &HashConfig::default())
        .unwrap();
    assert!(hashed.is_empty());
}

#[test]
fn test_stages_compose_like_entry_point() {
    let dir = writes_tree();
    fs::write(dir.path().join("e"), b"writes\n").unwrap();

    let (buckets, visited) = scan(dir.path(), &ScanConfig::default()).unwrap();
    assert_eq!(visited, 5);

    let candidates = filter_candidates(buckets);
    assert!(candidates.values().all(|files| files.len() >= 2));

    let staged = hash_all(candidates, &HashConfig::default().with_worker_count(3));
    let direct = find_duplicates(dir.path(), &ScanConfig::default(), &HashConfig::default())
        .unwrap();

    assert_eq!(staged.len(), direct.len());
    for digest in direct.keys() {
        assert_eq!(sorted_paths(&staged, digest), sorted_paths(&direct, digest));
    }
}

#[test]
fn test_worker_count_does_not_change_membership() {
    let dir = tempdir().unwrap();
    for i in 0..60 {
        fs::write(
            dir.path().join(format!("file{:02}", i)),
            format!("payload-{}", i % 5),
        )
        .unwrap();
    }

    let baseline =
        find_duplicates(dir.path(), &ScanConfig::default(), &HashConfig::default()).unwrap();
    assert_eq!(baseline.len(), 5);

    for workers in [2, 4, 16, 100] {
        let config = HashConfig::default().with_worker_count(workers);
        let groups = find_duplicates(dir.path(), &ScanConfig::default(), &config).unwrap();
        assert_eq!(groups.len(), baseline.len());
        for digest in baseline.keys() {
            assert_eq!(sorted_paths(&groups, digest), sorted_paths(&baseline, digest));
        }
    }
}
