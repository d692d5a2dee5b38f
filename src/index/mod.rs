//! The content index
//!
//! A durable store keyed by location identifier. It provides the crawl
//! loop's sole deduplication check (`is_indexed`), the durable record of
//! extracted text (`index_page`), and term-frequency lookup across recorded
//! locations (`term_counts`).

mod schema;
mod sqlite;
mod tokenize;
mod traits;

pub use sqlite::SqliteIndex;
pub use tokenize::tokenize;
pub use traits::{Index, IndexError, IndexResult};
