//! Append-only score history kept as a flat JSON array.
//!
//! There is no file locking. Two runs saving at the same moment can both
//! read the same history and the later write wins, dropping one score.

use crate::types::report::Stats;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store location from config, relative paths anchored at `root`.
    pub fn resolve(root: &Path, file: &str) -> Self {
        let candidate = PathBuf::from(file);
        if candidate.is_absolute() {
            Self::new(candidate)
        } else {
            Self::new(root.join(candidate))
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `score`. A failed write is logged and otherwise ignored.
    pub fn save(&self, score: u8) {
        let mut history = self.all();
        history.push(score);
        match self.write(&history) {
            Ok(()) => debug!(path = %self.path.display(), runs = history.len(), "saved score"),
            Err(error) => warn!(
                path = %self.path.display(),
                %error,
                "persistent storage failed, score not saved"
            ),
        }
    }

    /// Every stored score, oldest first. Missing, unreadable, or malformed
    /// files read as an empty history.
    pub fn all(&self) -> Vec<u8> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(error) => {
                debug!(path = %self.path.display(), %error, "history unreadable");
                return Vec::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|error| {
            debug!(path = %self.path.display(), %error, "history malformed");
            Vec::new()
        })
    }

    pub fn stats(&self) -> Stats {
        compute_stats(&self.all())
    }

    fn write(&self, history: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(history)?;
        std::fs::write(&self.path, json)
    }
}

pub fn compute_stats(history: &[u8]) -> Stats {
    let Some(&best) = history.iter().max() else {
        return Stats {
            runs: 0,
            average: 0.0,
            best: 0,
        };
    };
    let total: u64 = history.iter().map(|&score| u64::from(score)).sum();
    Stats {
        runs: history.len(),
        average: total as f64 / history.len() as f64,
        best,
    }
}
