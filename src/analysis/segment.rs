//! Chinese word segmentation for comment text
//!
//! Comments are cleaned (punctuation and symbols stripped, word
//! characters and whitespace kept) and cut into words with jieba's
//! dictionary-only mode (HMM disabled, so out-of-vocabulary runs are not
//! guessed into words). Stopwords and blank tokens are filtered out.
//!
//! The stopword file is one word per line; a missing file is reported as
//! a warning and segmentation proceeds unfiltered.

use jieba_rs::Jieba;
use std::collections::HashSet;
use std::path::Path;

/// Word segmenter with an optional stopword filter
pub struct Segmenter {
    jieba: Jieba,
    stopwords: HashSet<String>,
}

impl Segmenter {
    /// Create a segmenter with the bundled dictionary and no stopwords
    #[must_use]
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
            stopwords: HashSet::new(),
        }
    }

    /// Set the stopword list
    #[must_use]
    pub fn with_stopwords(mut self, stopwords: HashSet<String>) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Number of loaded stopwords
    #[must_use]
    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    /// Segment one text into filtered words
    ///
    /// Punctuation is stripped first; the surviving tokens are trimmed
    /// and dropped when blank or listed as stopwords.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let cleaned = strip_punctuation(text);

        self.jieba
            .cut(&cleaned, false)
            .into_iter()
            .map(str::trim)
            .filter(|w| !w.is_empty() && !self.stopwords.contains(*w))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove punctuation and symbols, keeping word characters and whitespace
///
/// Mirrors the usual `[^\w\s]` cleanup: alphanumerics (including CJK),
/// underscores, and whitespace survive.
fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect()
}

/// Load a stopword file (one word per line)
///
/// A missing file yields an empty set with a warning, matching the
/// pipeline's lenient handling of optional inputs. Other I/O errors are
/// also downgraded to warnings.
pub fn load_stopwords(path: &Path) -> HashSet<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let stopwords: HashSet<String> = content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
            tracing::info!(count = %stopwords.len(), path = %path.display(), "Loaded stopwords");
            stopwords
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Stopword file not usable, continuing without filtering"
            );
            HashSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(strip_punctuation("你好，世界！"), "你好世界");
        assert_eq!(strip_punctuation("a.b,c!d"), "abcd");
        assert_eq!(strip_punctuation("under_score ok"), "under_score ok");
        assert_eq!(strip_punctuation("表情[doge]测试"), "表情doge测试");
    }

    #[test]
    fn test_segment_chinese_text() {
        let segmenter = Segmenter::new();
        let words = segmenter.segment("我们都是中国人");
        assert!(!words.is_empty());
        // Whatever the cut, the characters all came from the input
        assert_eq!(words.concat(), "我们都是中国人");
    }

    #[test]
    fn test_segment_filters_stopwords() {
        let stopwords: HashSet<String> = ["的", "了"].iter().map(|s| s.to_string()).collect();
        let segmenter = Segmenter::new().with_stopwords(stopwords);

        let words = segmenter.segment("我的书");
        assert!(!words.contains(&"的".to_string()));
    }

    #[test]
    fn test_segment_drops_blank_tokens() {
        let segmenter = Segmenter::new();
        let words = segmenter.segment("  你好   世界  ");
        assert!(words.iter().all(|w| !w.trim().is_empty()));
    }

    #[test]
    fn test_segment_empty_text() {
        let segmenter = Segmenter::new();
        assert!(segmenter.segment("").is_empty());
        assert!(segmenter.segment("！？。，").is_empty());
    }

    #[test]
    fn test_load_stopwords_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stopwords.txt");
        std::fs::write(&path, "的\n了\n\n  是  \n").unwrap();

        let stopwords = load_stopwords(&path);
        assert_eq!(stopwords.len(), 3);
        assert!(stopwords.contains("的"));
        assert!(stopwords.contains("是"));
    }

    #[test]
    fn test_missing_stopword_file_is_empty_set() {
        let stopwords = load_stopwords(Path::new("/nonexistent/stopwords.txt"));
        assert!(stopwords.is_empty());
    }
}
