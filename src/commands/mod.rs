pub mod fetch;
pub mod tokenize;
pub mod top;

// Re-export command functions for convenience
pub use fetch::fetch;
pub use tokenize::tokenize;
pub use top::top;
