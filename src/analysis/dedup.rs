//! Exact-text deduplication of comment rows
//!
//! Reposted and copy-pasted comments would otherwise dominate the word
//! frequencies. Deduplication is by exact text match: the first
//! occurrence wins and input order is preserved.

use std::collections::HashSet;

use crate::storage::CommentRow;

/// Remove rows whose text duplicates an earlier row
///
/// Returns the surviving rows and the number of rows dropped.
pub fn dedup_rows(rows: Vec<CommentRow>) -> (Vec<CommentRow>, usize) {
    let total = rows.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(total);
    let mut unique = Vec::with_capacity(total);

    for row in rows {
        if seen.insert(row.text.clone()) {
            unique.push(row);
        }
    }

    let dropped = total - unique.len();
    (unique, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(time: &str, text: &str) -> CommentRow {
        CommentRow {
            time: time.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let rows = vec![
            row("t1", "好视频"),
            row("t2", "支持"),
            row("t3", "好视频"),
            row("t4", "支持"),
            row("t5", "新内容"),
        ];

        let (unique, dropped) = dedup_rows(rows);
        assert_eq!(dropped, 2);

        let times: Vec<&str> = unique.iter().map(|r| r.time.as_str()).collect();
        assert_eq!(times, vec!["t1", "t2", "t5"]);
    }

    #[test]
    fn test_no_duplicates_untouched() {
        let rows = vec![row("t1", "a"), row("t2", "b")];
        let (unique, dropped) = dedup_rows(rows);
        assert_eq!(dropped, 0);
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let (unique, dropped) = dedup_rows(Vec::new());
        assert!(unique.is_empty());
        assert_eq!(dropped, 0);
    }
}
