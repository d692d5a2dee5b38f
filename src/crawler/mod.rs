//! Crawl loop: frontier, content retrieval, link discovery, orchestration
//!
//! This module contains the core crawling logic:
//! - The FIFO frontier of locations awaiting a crawl attempt
//! - Content retrieval (live HTTP or deterministic fixture) and HTML parsing
//! - Internal-link extraction and resolution
//! - The single-step crawl orchestrator

mod engine;
mod extract;
mod fetcher;
mod frontier;

pub use engine::{Crawler, StepOutcome};
pub use extract::{extract_internal_links, is_emphasized, is_parenthesized};
pub use fetcher::{
    build_http_client, parse_document, ContentSource, FetchError, FetchResult, WikiSource,
    TEST_SEED,
};
pub use frontier::Frontier;
