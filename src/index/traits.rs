//! Index trait and error types

use crate::content::Document;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during index operations
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Durable store of indexed page content, keyed by location identifier
///
/// `index_page` is not guaranteed idempotent from the caller's point of
/// view; callers use `is_indexed` to avoid redundant writes. Index failures
/// propagate to the caller; the crawl loop performs no buffering of
/// unindexed content.
pub trait Index {
    /// Whether the location already has a recorded entry
    fn is_indexed(&self, location: &str) -> IndexResult<bool>;

    /// Records the location's extracted text, replacing any prior entry
    fn index_page(&mut self, location: &str, content: &Document) -> IndexResult<()>;

    /// Occurrence counts of `term` across all recorded locations
    fn term_counts(&self, term: &str) -> IndexResult<HashMap<String, u64>>;

    /// Number of recorded locations
    fn page_count(&self) -> IndexResult<u64>;
}
