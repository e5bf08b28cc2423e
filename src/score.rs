//! Persisted high-water marks: best score and best level.
//!
//! Both values only ever go up.  A write with a value that is not strictly
//! greater than the stored one leaves the store untouched.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScoreKind {
    BestScore,
    BestLevel,
}

#[derive(thiserror::Error, Debug)]
pub enum ScoreError {
    #[error("cannot access score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("score file {path} is malformed: line {line} is not a number")]
    Malformed { path: PathBuf, line: usize },
}

pub trait ScoreStore {
    fn read(&self, kind: ScoreKind) -> u64;

    /// Raise the stored value to `value` if it is strictly greater.  Returns
    /// the value stored afterwards.
    fn write(&mut self, value: u64, kind: ScoreKind) -> Result<u64, ScoreError>;
}

/// The record as held in memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreRecord {
    pub best_score: u64,
    pub best_level: u64,
}

impl ScoreRecord {
    pub fn get(&self, kind: ScoreKind) -> u64 {
        match kind {
            ScoreKind::BestScore => self.best_score,
            ScoreKind::BestLevel => self.best_level,
        }
    }

    /// Returns `true` if the record changed.
    fn raise(&mut self, value: u64, kind: ScoreKind) -> bool {
        let slot = match kind {
            ScoreKind::BestScore => &mut self.best_score,
            ScoreKind::BestLevel => &mut self.best_level,
        };
        if value > *slot {
            *slot = value;
            true
        } else {
            false
        }
    }
}

// ── In-memory store ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct MemoryScoreStore {
    record: ScoreRecord,
}

impl MemoryScoreStore {
    pub fn new(record: ScoreRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> ScoreRecord {
        self.record
    }
}

impl ScoreStore for MemoryScoreStore {
    fn read(&self, kind: ScoreKind) -> u64 {
        self.record.get(kind)
    }

    fn write(&mut self, value: u64, kind: ScoreKind) -> Result<u64, ScoreError> {
        self.record.raise(value, kind);
        Ok(self.record.get(kind))
    }
}

// ── File store ────────────────────────────────────────────────────────────────

/// Two-line text file: best score on line 1, best level on line 2.
///
/// The file must already exist.  Every successful raise rewrites the whole
/// file immediately.
#[derive(Clone, Debug)]
pub struct FileScoreStore {
    path: PathBuf,
    record: ScoreRecord,
}

impl FileScoreStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScoreError> {
        let path = path.as_ref().to_path_buf();
        let record = load_record(&path)?;
        info!(
            "loaded score record from {}: best score {}, best level {}",
            path.display(),
            record.best_score,
            record.best_level
        );
        Ok(Self { path, record })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn read(&self, kind: ScoreKind) -> u64 {
        self.record.get(kind)
    }

    fn write(&mut self, value: u64, kind: ScoreKind) -> Result<u64, ScoreError> {
        // Re-read so a value raised by another session is never lowered.
        let mut record = load_record(&self.path)?;
        if record.raise(value, kind) {
            fs::write(&self.path, render_record(&record)).map_err(|source| ScoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        }
        self.record = record;
        Ok(record.get(kind))
    }
}

fn load_record(path: &Path) -> Result<ScoreRecord, ScoreError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ScoreError::Io { path: path.to_path_buf(), source })?;
    parse_record(&text).ok_or_else(|| {
        let line = if parse_line(text.lines().next()).is_none() { 1 } else { 2 };
        ScoreError::Malformed { path: path.to_path_buf(), line }
    })
}

/// Parse the two-line record.  Only the first whitespace-separated token of
/// each line counts, so stray trailing tokens are ignored.
pub fn parse_record(text: &str) -> Option<ScoreRecord> {
    let mut lines = text.lines();
    let best_score = parse_line(lines.next())?;
    let best_level = parse_line(lines.next())?;
    Some(ScoreRecord { best_score, best_level })
}

fn parse_line(line: Option<&str>) -> Option<u64> {
    line?.split_whitespace().next()?.parse().ok()
}

pub fn render_record(record: &ScoreRecord) -> String {
    format!("{}\n{}\n", record.best_score, record.best_level)
}
