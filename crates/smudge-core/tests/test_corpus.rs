use std::fs;

use smudge_core::corpus::{
    resolve_seed, DegradationLog, LogRecord, Stage, DEFAULT_CATEGORIES, LOG_FILE_NAME,
};
use smudge_core::degrade::DegradationSpec;

// ---------------------------------------------------------------------------
// DegradationLog
// ---------------------------------------------------------------------------

#[test]
fn test_log_save_sorts_and_formats_lines() {
    let log = DegradationLog::new();
    log.push(LogRecord {
        source: "target/th/b/0000.png".into(),
        output: "input/th/b/0000.png".into(),
        spec: DegradationSpec::Compression { quality: 12 },
    });
    log.push(LogRecord {
        source: "target/th/a/0000.png".into(),
        output: "input/th/a/0000.png".into(),
        spec: DegradationSpec::Blur { sigma: 3.0 },
    });

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(LOG_FILE_NAME);
    log.save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "target/th/a/0000.png -> input/th/a/0000.png : blur");
    assert_eq!(
        lines[1],
        "target/th/b/0000.png -> input/th/b/0000.png : compression"
    );
    assert!(text.ends_with('\n'));
}

#[test]
fn test_log_len_and_extend() {
    let log = DegradationLog::new();
    assert!(log.is_empty());

    log.extend(vec![
        LogRecord {
            source: "a".into(),
            output: "b".into(),
            spec: DegradationSpec::Blur { sigma: 2.0 },
        },
        LogRecord {
            source: "c".into(),
            output: "d".into(),
            spec: DegradationSpec::Compression { quality: 9 },
        },
    ]);
    assert_eq!(log.len(), 2);
    assert!(!log.is_empty());
}

#[test]
fn test_log_save_empty_writes_empty_file() {
    let log = DegradationLog::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.txt");
    log.save(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

// ---------------------------------------------------------------------------
// resolve_seed
// ---------------------------------------------------------------------------

#[test]
fn test_resolve_seed_keeps_configured_value() {
    assert_eq!(resolve_seed(Some(1234)), 1234);
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

#[test]
fn test_stage_display() {
    assert_eq!(format!("{}", Stage::Extract), "Extracting frames");
    assert_eq!(format!("{}", Stage::Degrade), "Degrading frames");
}

// ---------------------------------------------------------------------------
// DEFAULT_CATEGORIES
// ---------------------------------------------------------------------------

#[test]
fn test_default_categories_partition() {
    assert_eq!(DEFAULT_CATEGORIES, ["th", "th-bb", "th-m", "th-ob"]);
}
