//! Word frequency counting and the `word\tfrequency` file format
//!
//! Counting is a flat `HashMap<String, u64>`; ordering is made
//! deterministic by sorting on count descending with the word itself as
//! a tiebreaker. The file format is one `word\tfrequency` line per word,
//! most frequent first, and is consumed by the `top` command (and by
//! external plotting tools).

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::AnalysisError;

/// Frequency table over segmented words
#[derive(Debug, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one batch of words
    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for word in words {
            *self.counts.entry(word.into()).or_insert(0) += 1;
        }
    }

    /// Number of distinct words
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total occurrences across all words
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// All entries sorted by count descending, word ascending on ties
    ///
    /// The tiebreaker makes output deterministic across runs.
    #[must_use]
    pub fn sorted(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(w, c)| (w.clone(), *c))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    /// The `n` most frequent entries
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut entries = self.sorted();
        entries.truncate(n);
        entries
    }

    /// Write the full table as `word\tfrequency` lines, most frequent first
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create frequency file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        for (word, count) in self.sorted() {
            writeln!(writer, "{word}\t{count}")?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Read a `word\tfrequency` file back into ordered entries
///
/// # Errors
///
/// Fails on lines without a tab separator or with a non-numeric count.
pub fn read_frequencies(path: &Path) -> Result<Vec<(String, u64)>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read frequency file: {}", path.display()))?;

    let mut entries = Vec::new();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (word, count) = line.rsplit_once('\t').ok_or(AnalysisError::MalformedRecord {
            line: i + 1,
            reason: "expected word\\tfrequency".to_string(),
        })?;
        let count: u64 = count.trim().parse().map_err(|_| AnalysisError::MalformedRecord {
            line: i + 1,
            reason: format!("invalid count: {count}"),
        })?;
        entries.push((word.to_string(), count));
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_counting() {
        let mut table = FrequencyTable::new();
        table.add_words(vec!["a", "b", "a", "c", "a", "b"]);

        assert_eq!(table.distinct(), 3);
        assert_eq!(table.total(), 6);
        assert_eq!(table.sorted()[0], ("a".to_string(), 3));
    }

    #[test]
    fn test_sorted_is_deterministic_on_ties() {
        let mut table = FrequencyTable::new();
        table.add_words(vec!["乙", "甲", "乙", "甲"]);

        // Equal counts: lexicographic order of the words decides
        let sorted = table.sorted();
        assert_eq!(sorted[0].0, "乙".min("甲").to_string());
    }

    #[test]
    fn test_top_truncates() {
        let mut table = FrequencyTable::new();
        table.add_words(vec!["a", "a", "b", "c"]);

        let top = table.top(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], ("a".to_string(), 2));
    }

    #[test]
    fn test_top_beyond_len() {
        let mut table = FrequencyTable::new();
        table.add_words(vec!["a"]);
        assert_eq!(table.top(10).len(), 1);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("word_frequency.txt");

        let mut table = FrequencyTable::new();
        table.add_words(vec!["视频", "弹幕", "视频", "视频", "up主"]);
        table.write_to(&path).unwrap();

        let entries = read_frequencies(&path).unwrap();
        assert_eq!(entries[0], ("视频".to_string(), 3));
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_read_rejects_malformed_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, "word-without-tab\n").unwrap();
        assert!(read_frequencies(&path).is_err());

        std::fs::write(&path, "word\tnot-a-number\n").unwrap();
        assert!(read_frequencies(&path).is_err());
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("freq.txt");
        std::fs::write(&path, "a\t3\n\nb\t1\n").unwrap();

        let entries = read_frequencies(&path).unwrap();
        assert_eq!(entries.len(), 2);
    }
}
