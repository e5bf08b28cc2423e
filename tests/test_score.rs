use std::fs;

use boom::score::*;

fn score_file(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("high score.txt");
    fs::write(&path, contents).expect("write record");
    (dir, path)
}

// ── Parsing ───────────────────────────────────────────────────────────────────

#[test]
fn parse_plain_record() {
    let record = parse_record("1200\n7\n").expect("valid");
    assert_eq!(record, ScoreRecord { best_score: 1200, best_level: 7 });
}

#[test]
fn parse_ignores_stray_trailing_token() {
    let record = parse_record("1200 1\n7").expect("valid");
    assert_eq!(record.best_score, 1200);
    assert_eq!(record.best_level, 7);
}

#[test]
fn parse_rejects_missing_or_garbage_lines() {
    assert!(parse_record("").is_none());
    assert!(parse_record("12\n").is_none());
    assert!(parse_record("twelve\n3\n").is_none());
}

#[test]
fn render_writes_two_lines() {
    let text = render_record(&ScoreRecord { best_score: 5, best_level: 2 });
    assert_eq!(text, "5\n2\n");
}

// ── Memory store ──────────────────────────────────────────────────────────────

#[test]
fn memory_store_only_raises() {
    let mut store = MemoryScoreStore::new(ScoreRecord { best_score: 100, best_level: 3 });

    assert_eq!(store.write(50, ScoreKind::BestScore).unwrap(), 100);
    assert_eq!(store.write(100, ScoreKind::BestScore).unwrap(), 100);
    assert_eq!(store.read(ScoreKind::BestScore), 100);

    assert_eq!(store.write(101, ScoreKind::BestScore).unwrap(), 101);
    assert_eq!(store.read(ScoreKind::BestScore), 101);
    assert_eq!(store.read(ScoreKind::BestLevel), 3);
}

#[test]
fn memory_store_fields_are_independent() {
    let mut store = MemoryScoreStore::default();
    store.write(9, ScoreKind::BestLevel).unwrap();
    assert_eq!(store.record(), ScoreRecord { best_score: 0, best_level: 9 });
}

// ── File store ────────────────────────────────────────────────────────────────

#[test]
fn file_store_reads_existing_record() {
    let (_dir, path) = score_file("450 1\n4\n");
    let store = FileScoreStore::open(&path).expect("open");
    assert_eq!(store.path(), path.as_path());
    assert_eq!(store.read(ScoreKind::BestScore), 450);
    assert_eq!(store.read(ScoreKind::BestLevel), 4);
}

#[test]
fn file_store_ignores_lower_values() {
    let (_dir, path) = score_file("450\n4\n");
    let mut store = FileScoreStore::open(&path).expect("open");
    assert_eq!(store.write(300, ScoreKind::BestScore).unwrap(), 450);
    assert_eq!(store.write(4, ScoreKind::BestLevel).unwrap(), 4);
    assert_eq!(fs::read_to_string(&path).unwrap(), "450\n4\n");
}

#[test]
fn file_store_persists_higher_values_immediately() {
    let (_dir, path) = score_file("450\n4\n");
    let mut store = FileScoreStore::open(&path).expect("open");

    assert_eq!(store.write(500, ScoreKind::BestScore).unwrap(), 500);
    assert_eq!(fs::read_to_string(&path).unwrap(), "500\n4\n");

    assert_eq!(store.write(5, ScoreKind::BestLevel).unwrap(), 5);
    assert_eq!(fs::read_to_string(&path).unwrap(), "500\n5\n");

    let reopened = FileScoreStore::open(&path).expect("reopen");
    assert_eq!(reopened.read(ScoreKind::BestScore), 500);
    assert_eq!(reopened.read(ScoreKind::BestLevel), 5);
}

#[test]
fn file_store_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = FileScoreStore::open(dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, ScoreError::Io { .. }));
}

#[test]
fn file_store_malformed_file_reports_line() {
    let (_dir, path) = score_file("300\nlots\n");
    let err = FileScoreStore::open(&path).unwrap_err();
    assert!(matches!(err, ScoreError::Malformed { line: 2, .. }));

    let (_dir, path) = score_file("\n3\n");
    let err = FileScoreStore::open(&path).unwrap_err();
    assert!(matches!(err, ScoreError::Malformed { line: 1, .. }));
}
