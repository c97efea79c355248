//! `tokenize` command: deduplicate, segment, and count a comment CSV

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::analysis::{dedup_rows, load_stopwords, FrequencyTable, Segmenter};
use crate::storage;

/// How many top words to echo after counting
const PREVIEW_COUNT: usize = 20;

/// Tokenize a comment CSV into a word frequency file
///
/// # Arguments
///
/// * `input` - Comment CSV (as written by the fetch command)
/// * `output` - Frequency file (`word\tfrequency` per line)
/// * `stopwords` - Optional stopword file, one word per line
/// * `processed` - Optional path for the deduplicated CSV copy
pub fn tokenize(
    input: PathBuf,
    output: PathBuf,
    stopwords: Option<PathBuf>,
    processed: Option<PathBuf>,
) -> Result<()> {
    println!("Tokenizing {}", input.display());
    println!("==========================");

    let rows = storage::read_comments(&input)
        .with_context(|| format!("Failed to read comments from {}", input.display()))?;
    tracing::info!(rows = %rows.len(), "Read comment rows");

    let (rows, dropped) = dedup_rows(rows);
    tracing::info!(unique = %rows.len(), dropped = %dropped, "Deduplicated comment texts");
    println!("{} unique comments ({} duplicates dropped)", rows.len(), dropped);

    let segmenter = match &stopwords {
        Some(path) => Segmenter::new().with_stopwords(load_stopwords(path)),
        None => Segmenter::new(),
    };
    if segmenter.stopword_count() > 0 {
        println!("Using {} stopwords", segmenter.stopword_count());
    }

    let mut table = FrequencyTable::new();
    for row in &rows {
        table.add_words(segmenter.segment(&row.text));
    }
    tracing::info!(
        distinct = %table.distinct(),
        total = %table.total(),
        "Counted word frequencies"
    );

    print_top(&table, PREVIEW_COUNT);

    table
        .write_to(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Frequency table saved to {}", output.display());

    if let Some(processed_path) = processed {
        storage::write_rows(&processed_path, &rows)
            .with_context(|| format!("Failed to write {}", processed_path.display()))?;
        println!("Deduplicated comments saved to {}", processed_path.display());
    }

    Ok(())
}

/// Echo the most frequent words to stdout
fn print_top(table: &FrequencyTable, n: usize) {
    println!("\nTop {n} words:");
    for (word, count) in table.top(n) {
        println!("{word}: {count}");
    }
}
