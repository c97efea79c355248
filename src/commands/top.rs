//! `top` command: print the most frequent words from a frequency file

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::analysis::read_frequencies;

/// Print the `n` most frequent entries of a `word\tfrequency` file
pub fn top(input: PathBuf, n: usize) -> Result<()> {
    let entries = read_frequencies(&input)
        .with_context(|| format!("Failed to read frequencies from {}", input.display()))?;

    if entries.is_empty() {
        println!("Frequency file is empty");
        return Ok(());
    }

    let width = entries
        .iter()
        .take(n)
        .map(|(w, _)| w.chars().count())
        .max()
        .unwrap_or(0);

    for (word, count) in entries.iter().take(n) {
        let pad = width.saturating_sub(word.chars().count());
        println!("{word}{:pad$}  {count}", "");
    }

    Ok(())
}
