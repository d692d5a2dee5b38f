//! Kumo: a frontier-based wiki crawler and term indexer
//!
//! This crate walks a hyperlinked article collection from a seed location,
//! indexes the textual content of each page, and follows same-collection
//! links until the frontier is exhausted or a page budget is reached.

pub mod config;
pub mod content;
pub mod crawler;
pub mod index;

use thiserror::Error;

/// Main error type for kumo operations
#[derive(Debug, Error)]
pub enum KumoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Retrieval error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Index error: {0}")]
    Index(#[from] index::IndexError),

    /// Stepping with nothing left to crawl is a caller contract violation;
    /// callers must check `frontier_size()` first.
    #[error("Stepped an empty frontier")]
    EmptyFrontier,

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for kumo operations
pub type Result<T> = std::result::Result<T, KumoError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use content::{Document, PageLink, Paragraph};
pub use crawler::{Crawler, Frontier, StepOutcome};
