use dupefinder::duplicates::{find_duplicates, find_size_duplicates, HashConfig};
use dupefinder::output::{Report, ReportFormat};
use dupefinder::scanner::ScanConfig;
use std::fs;
use tempfile::tempdir;

const FOO_MD5: &str = "acbd18db4cc2f85cedef654fccc4a4d8";

fn render(report: Report<'_>, format: ReportFormat, print_size: bool) -> String {
    let mut buffer = Vec::new();
    report.render(&mut buffer, format, print_size).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[test]
fn test_text_output_for_scan() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b"), b"foo").unwrap();
    fs::write(dir.path().join("a"), b"foo").unwrap();
    fs::write(dir.path().join("c"), b"bar!").unwrap();

    let groups =
        find_duplicates(dir.path(), &ScanConfig::default(), &HashConfig::default()).unwrap();

    let text = render(Report::Hashes(&groups), ReportFormat::Text, false);
    let expected = format!(
        "{FOO_MD5}\t{}\n{FOO_MD5}\t{}\n",
        dir.path().join("a").display(),
        dir.path().join("b").display()
    );
    assert_eq!(text, expected);

    let text = render(Report::Hashes(&groups), ReportFormat::Text, true);
    assert!(text.lines().all(|line| line.split('\t').nth(1) == Some("3")));
}

#[test]
fn test_json_output_for_scan() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"foo").unwrap();
    fs::write(dir.path().join("b"), b"foo").unwrap();

    let groups =
        find_duplicates(dir.path(), &ScanConfig::default(), &HashConfig::default()).unwrap();
    let json = render(Report::Hashes(&groups), ReportFormat::Json, false);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let members = value[FOO_MD5].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["name"], "a");
    assert_eq!(members[0]["size"], 3);
    assert_eq!(members[0]["digest"], FOO_MD5);
    assert_eq!(
        members[1]["path"],
        dir.path().join("b").to_string_lossy().into_owned()
    );
}

#[test]
fn test_size_only_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x"), b"12").unwrap();
    fs::write(dir.path().join("y"), b"34").unwrap();

    let groups = find_size_duplicates(dir.path(), &ScanConfig::default()).unwrap();

    let text = render(Report::Sizes(&groups), ReportFormat::Text, false);
    assert_eq!(
        text,
        format!(
            "2\t{}\n2\t{}\n",
            dir.path().join("x").display(),
            dir.path().join("y").display()
        )
    );

    let json = render(Report::Sizes(&groups), ReportFormat::Json, false);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["2"].as_array().unwrap().len(), 2);
}

#[cfg(unix)]
#[test]
fn test_json_output_with_non_utf8_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ok"), b"foo").unwrap();
    if fs::write(dir.path().join(OsStr::from_bytes(b"\xff\xfe")), b"foo").is_err() {
        return;
    }

    let groups =
        find_duplicates(dir.path(), &ScanConfig::default(), &HashConfig::default()).unwrap();
    let json = render(Report::Hashes(&groups), ReportFormat::Json, false);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let members = value[FOO_MD5].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["name"], "ok");
    assert_eq!(members[1]["name"], "\u{fffd}\u{fffd}");
    assert!(json.ends_with("}\n"));
}
