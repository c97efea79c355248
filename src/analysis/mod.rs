//! Text analysis for collected comments
//!
//! The tokenize stage of the pipeline: deduplicate comment texts, segment
//! them into words, and count word frequencies for downstream plotting.

pub mod dedup;
pub mod frequency;
pub mod segment;

pub use dedup::dedup_rows;
pub use frequency::{read_frequencies, FrequencyTable};
pub use segment::{load_stopwords, Segmenter};
