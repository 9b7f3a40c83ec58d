//! High scores persisted as a JSON array of `{ "name", "score" }` objects.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use arcade_core::{HighScoreEntry, HighScoreTable};

#[derive(Debug, Clone)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing, unreadable or malformed data loads as an empty table.
    pub fn load(&self) -> HighScoreTable {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return HighScoreTable::new(),
            Err(e) => {
                tracing::warn!("failed reading high scores {}: {e}", self.path.display());
                return HighScoreTable::new();
            }
        };

        match serde_json::from_str::<Vec<HighScoreEntry>>(&raw) {
            Ok(entries) => HighScoreTable::from_entries(entries),
            Err(e) => {
                tracing::warn!(
                    "ignoring malformed high scores {}: {e}",
                    self.path.display()
                );
                HighScoreTable::new()
            }
        }
    }

    pub fn save(&self, table: &HighScoreTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating directory {}", parent.display()))?;
        }
        let json = table.to_json().context("failed encoding high scores")?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed writing {}", self.path.display()))
    }

    /// Loads, inserts one entry and saves. Returns the rank reached.
    pub fn record(&self, name: &str, score: u32) -> Result<Option<usize>> {
        let mut table = self.load();
        let rank = table.insert(name, score);
        if rank.is_some() {
            self.save(&table)?;
        }
        Ok(rank)
    }
}
