//! File storage for pipeline artifacts
//!
//! Comments travel between pipeline stages as CSV files; word
//! frequencies as tab-separated text (see [`crate::analysis::frequency`]).

pub mod csv;

pub use csv::{read_comments, write_comments, write_rows, CommentRow};
