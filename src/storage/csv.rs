//! CSV reading and writing for collected comments
//!
//! The output file carries a UTF-8 BOM so spreadsheet tools open it with
//! the right encoding, a `time,text` header, and RFC-4180-style quoting
//! (fields containing commas, quotes, or newlines are quoted; embedded
//! quotes are doubled). The reader accepts the same dialect and is used
//! by the tokenize stage.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::crawler::reply::Comment;
use crate::error::AnalysisError;

/// UTF-8 byte order mark emitted at the start of output files
const BOM: &str = "\u{FEFF}";

/// A row read back from a comment CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRow {
    /// Formatted timestamp string
    pub time: String,

    /// Raw comment text
    pub text: String,
}

/// Write comments to a CSV file with columns `time,text`
///
/// The caller is expected to have sorted the comments already; rows are
/// written in the given order.
///
/// # Arguments
///
/// * `path` - Output file path (parent directories are created)
/// * `comments` - Comment records to write
pub fn write_comments(path: &Path, comments: &[Comment]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(BOM.as_bytes())?;
    writeln!(writer, "time,text")?;

    for comment in comments {
        writeln!(
            writer,
            "{},{}",
            escape_field(&comment.formatted_time()),
            escape_field(&comment.text)
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Write previously-read rows back out in the same dialect
///
/// Used by the tokenize stage to persist the deduplicated copy.
pub fn write_rows(path: &Path, rows: &[CommentRow]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writer.write_all(BOM.as_bytes())?;
    writeln!(writer, "time,text")?;

    for row in rows {
        writeln!(writer, "{},{}", escape_field(&row.time), escape_field(&row.text))?;
    }

    writer.flush()?;
    Ok(())
}

/// Read a comment CSV produced by [`write_comments`]
///
/// # Errors
///
/// Fails when the header lacks a `text` column or a row cannot be parsed.
pub fn read_comments(path: &Path) -> Result<Vec<CommentRow>> {
    let mut content = String::new();
    File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?
        .read_to_string(&mut content)?;

    let content = content.strip_prefix(BOM).unwrap_or(&content);

    let mut records = parse_records(content)?;
    if records.is_empty() {
        return Err(AnalysisError::EmptyInput.into());
    }

    let header = records.remove(0);
    let time_idx = header.iter().position(|h| h == "time");
    let text_idx = header.iter().position(|h| h == "text").ok_or_else(|| {
        AnalysisError::ColumnNotFound("text".to_string(), header.join(", "))
    })?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, record) in records.into_iter().enumerate() {
        let text = record
            .get(text_idx)
            .ok_or_else(|| AnalysisError::MalformedRecord {
                line: i + 2,
                reason: format!("missing field {text_idx}"),
            })?
            .clone();
        let time = time_idx
            .and_then(|idx| record.get(idx))
            .cloned()
            .unwrap_or_default();
        rows.push(CommentRow { time, text });
    }

    Ok(rows)
}

/// Quote a field if it contains the delimiter, quotes, or line breaks
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split CSV content into records of fields, honoring quoted fields
fn parse_records(content: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => {
                record.push(std::mem::take(&mut field));
            }
            '\r' => {
                // Swallow the \n of a CRLF pair
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    // Trailing record without a final newline
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}
