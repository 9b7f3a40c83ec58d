//! Ranked name/score list kept between runs.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PILOT_NAME, HIGH_SCORE_SLOTS};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
}

impl HighScoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// At most [`HIGH_SCORE_SLOTS`] entries, best first. Serializes as a plain
/// JSON array of `{ "name", "score" }` objects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = HighScoreEntry>) -> Self {
        let mut table = Self {
            entries: entries.into_iter().collect(),
        };
        table.normalize();
        table
    }

    /// Parses a persisted table. Anything malformed yields an empty table.
    pub fn from_json_lenient(raw: &str) -> Self {
        match serde_json::from_str::<Vec<HighScoreEntry>>(raw) {
            Ok(entries) => Self::from_entries(entries),
            Err(_) => Self::default(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }

    #[inline]
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Whether `score` would survive insertion.
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < HIGH_SCORE_SLOTS
            || self.entries.last().is_some_and(|lowest| score > lowest.score)
    }

    /// Inserts, re-sorts descending and truncates. Returns the 0-based rank
    /// when the entry made the table. Ties rank below existing entries.
    pub fn insert(&mut self, name: &str, score: u32) -> Option<usize> {
        let entry = HighScoreEntry::new(normalize_name(name), score);
        let rank = self
            .entries
            .iter()
            .position(|existing| existing.score < score)
            .unwrap_or(self.entries.len());
        if rank >= HIGH_SCORE_SLOTS {
            return None;
        }

        self.entries.insert(rank, entry);
        self.entries.truncate(HIGH_SCORE_SLOTS);
        Some(rank)
    }

    fn normalize(&mut self) {
        for entry in &mut self.entries {
            entry.name = normalize_name(&entry.name);
        }
        // Stable, so equal scores keep their persisted order.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(HIGH_SCORE_SLOTS);
    }
}

/// Trims the submitted name; blank submissions get the default pilot name.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_PILOT_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u32)]) -> HighScoreTable {
        HighScoreTable::from_entries(
            entries
                .iter()
                .map(|(name, score)| HighScoreEntry::new(*name, *score)),
        )
    }

    #[test]
    fn insertion_resorts_and_truncates_to_three() {
        let mut scores = table(&[("A", 5000), ("B", 3000), ("C", 1000)]);
        assert_eq!(scores.insert("Ace", 4200), Some(1));
        assert_eq!(scores, table(&[("A", 5000), ("Ace", 4200), ("B", 3000)]));
    }

    #[test]
    fn low_scores_do_not_displace_a_full_table() {
        let mut scores = table(&[("A", 5000), ("B", 3000), ("C", 1000)]);
        assert!(!scores.qualifies(1000));
        assert_eq!(scores.insert("D", 1000), None);
        assert_eq!(scores.len(), 3);
        assert_eq!(scores.entries()[2].name, "C");
    }

    #[test]
    fn short_table_accepts_anything() {
        let mut scores = HighScoreTable::new();
        assert!(scores.qualifies(0));
        assert_eq!(scores.insert("zero", 0), Some(0));
        assert_eq!(scores.insert("ten", 10), Some(0));
        assert_eq!(scores.best().map(|entry| entry.score), Some(10));
    }

    #[test]
    fn blank_names_fall_back_to_default() {
        let mut scores = HighScoreTable::new();
        scores.insert("   ", 900);
        scores.insert("  Vega ", 800);
        assert_eq!(scores.entries()[0].name, DEFAULT_PILOT_NAME);
        assert_eq!(scores.entries()[1].name, "Vega");
    }

    #[test]
    fn malformed_json_is_an_empty_table() {
        for raw in ["", "not json", "{\"name\":\"A\"}", "[{\"name\":\"A\",\"score\":-5}]"] {
            assert!(HighScoreTable::from_json_lenient(raw).is_empty(), "{raw:?}");
        }
    }

    #[test]
    fn persisted_json_is_normalized_on_load() {
        let raw = r#"[
            {"name": "low", "score": 10},
            {"name": "top", "score": 9000},
            {"name": "mid", "score": 500},
            {"name": "cut", "score": 1}
        ]"#;
        let scores = HighScoreTable::from_json_lenient(raw);
        let names: Vec<_> = scores.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["top", "mid", "low"]);

        let reloaded = HighScoreTable::from_json_lenient(&scores.to_json().expect("serializes"));
        assert_eq!(reloaded, scores);
    }
}
