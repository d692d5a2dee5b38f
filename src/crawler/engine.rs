//! The crawl orchestrator
//!
//! One `step` performs at most one fetch-index-discover cycle: pop a
//! location from the frontier, decide whether to fetch it, record its
//! content in the index, and push its internal links back onto the
//! frontier. The caller drives the loop and owns the stopping condition.

use crate::config::CollectionConfig;
use crate::crawler::extract::extract_internal_links;
use crate::crawler::fetcher::ContentSource;
use crate::crawler::frontier::Frontier;
use crate::index::Index;
use crate::{KumoError, Result};

/// Outcome of a single crawl step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The location was fetched, indexed, and its links enqueued
    Processed(String),

    /// The location was already indexed; nothing was fetched or written
    Skipped,
}

/// A crawl session: one frontier, an injected content source, and the index
/// recording what has been processed
///
/// The session is created with a seed location already on the frontier and
/// lives as long as the caller keeps stepping it. It holds no external
/// resources of its own beyond the index handle.
pub struct Crawler<S, I> {
    frontier: Frontier,
    source: S,
    index: I,
    collection: CollectionConfig,
}

impl<S: ContentSource, I: Index> Crawler<S, I> {
    /// Creates a crawl session seeded with `seed`
    pub fn new(
        seed: impl Into<String>,
        source: S,
        index: I,
        collection: CollectionConfig,
    ) -> Self {
        let mut frontier = Frontier::new();
        frontier.push(seed.into());

        Self {
            frontier,
            source,
            index,
            collection,
        }
    }

    /// Number of locations awaiting a crawl attempt
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// The pending frontier, in crawl order
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// The index this session records into
    pub fn index(&self) -> &I {
        &self.index
    }

    /// Performs one fetch-index-discover cycle
    ///
    /// Pops the frontier head and, outside test mode, skips it without
    /// fetching when the index already has it — the crawl's sole
    /// deduplication, applied at fetch time rather than enqueue time. In
    /// test mode the dedup check is bypassed and content always comes from
    /// the deterministic test retrieval, so a location may be reprocessed.
    ///
    /// The index write is the commit point: retrieval and index failures
    /// propagate before anything is recorded, and a failure between the
    /// write and the enqueue of discovered links loses only those links'
    /// discoverability, never index integrity.
    ///
    /// # Errors
    ///
    /// Returns [`KumoError::EmptyFrontier`] when called with no pending
    /// locations; callers must check [`frontier_size`](Self::frontier_size)
    /// first.
    pub async fn step(&mut self, test_mode: bool) -> Result<StepOutcome> {
        let location = self.frontier.pop().ok_or(KumoError::EmptyFrontier)?;
        tracing::info!("Crawling {}", location);

        let content = if test_mode {
            self.source.fetch_test(&location).await?
        } else {
            if self.index.is_indexed(&location)? {
                tracing::debug!("Already indexed, skipping {}", location);
                return Ok(StepOutcome::Skipped);
            }
            self.source.fetch_live(&location).await?
        };

        self.index.index_page(&location, &content)?;

        let discovered = extract_internal_links(&content, &self.collection, test_mode);
        tracing::debug!(
            "Discovered {} internal links on {}",
            discovered.len(),
            location
        );
        for link in discovered {
            self.frontier.push(link);
        }

        Ok(StepOutcome::Processed(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Document, PageLink, Paragraph};
    use crate::crawler::fetcher::{FetchError, FetchResult};
    use crate::index::SqliteIndex;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Scripted content source that records which fetches were made
    struct StubSource {
        pages: HashMap<String, Document>,
        live_fetches: RefCell<Vec<String>>,
        test_fetches: RefCell<Vec<String>>,
    }

    impl StubSource {
        fn new(pages: Vec<(&str, Document)>) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .map(|(url, doc)| (url.to_string(), doc))
                    .collect(),
                live_fetches: RefCell::new(vec![]),
                test_fetches: RefCell::new(vec![]),
            }
        }

        fn lookup(&self, location: &str) -> FetchResult<Document> {
            self.pages
                .get(location)
                .cloned()
                .ok_or_else(|| FetchError::UnknownFixture {
                    url: location.to_string(),
                })
        }
    }

    impl ContentSource for StubSource {
        async fn fetch_live(&self, location: &str) -> FetchResult<Document> {
            self.live_fetches.borrow_mut().push(location.to_string());
            self.lookup(location)
        }

        async fn fetch_test(&self, location: &str) -> FetchResult<Document> {
            self.test_fetches.borrow_mut().push(location.to_string());
            self.lookup(location)
        }
    }

    fn collection() -> CollectionConfig {
        CollectionConfig {
            base_address: "https://en.wikipedia.org".to_string(),
            internal_prefix: "/wiki".to_string(),
            content_root: None,
        }
    }

    fn url(name: &str) -> String {
        format!("https://en.wikipedia.org/wiki/{}", name)
    }

    fn page_with_links(text: &str, targets: &[&str]) -> Document {
        Document::new(vec![Paragraph {
            text: text.to_string(),
            links: targets
                .iter()
                .map(|name| PageLink {
                    anchor: name.to_string(),
                    href: format!("/wiki/{}", name),
                    abs_href: Some(url(name)),
                    emphasized: false,
                })
                .collect(),
        }])
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let source = StubSource::new(vec![
            ("https://en.wikipedia.org/wiki/S", page_with_links("seed page", &["A", "B", "C"])),
            ("https://en.wikipedia.org/wiki/A", page_with_links("a page", &[])),
        ]);
        let index = SqliteIndex::new_in_memory().unwrap();
        let mut crawler = Crawler::new(url("S"), source, index, collection());

        // First step processes the seed and enqueues its links in order
        let outcome = crawler.step(false).await.unwrap();
        assert_eq!(outcome, StepOutcome::Processed(url("S")));
        assert!(crawler.index().is_indexed(&url("S")).unwrap());
        let pending: Vec<&str> = crawler.frontier().iter().collect();
        assert_eq!(pending, vec![url("A"), url("B"), url("C")]);

        // Second step processes A, which has no internal links
        let outcome = crawler.step(false).await.unwrap();
        assert_eq!(outcome, StepOutcome::Processed(url("A")));
        assert!(crawler.index().is_indexed(&url("A")).unwrap());
        assert_eq!(crawler.index().page_count().unwrap(), 2);
        let pending: Vec<&str> = crawler.frontier().iter().collect();
        assert_eq!(pending, vec![url("B"), url("C")]);
    }

    #[tokio::test]
    async fn test_dedup_skips_indexed_location() {
        let source = StubSource::new(vec![(
            "https://en.wikipedia.org/wiki/S",
            page_with_links("seed", &["A"]),
        )]);
        let mut index = SqliteIndex::new_in_memory().unwrap();
        index
            .index_page(&url("S"), &page_with_links("seed", &["A"]))
            .unwrap();

        let mut crawler = Crawler::new(url("S"), source, index, collection());
        let outcome = crawler.step(false).await.unwrap();

        assert_eq!(outcome, StepOutcome::Skipped);
        // No fetch, no second write, no frontier pushes
        assert!(crawler.source.live_fetches.borrow().is_empty());
        assert!(crawler.source.test_fetches.borrow().is_empty());
        assert_eq!(crawler.index().page_count().unwrap(), 1);
        assert_eq!(crawler.frontier_size(), 0);
    }

    #[tokio::test]
    async fn test_test_mode_bypasses_dedup() {
        let source = StubSource::new(vec![(
            "https://en.wikipedia.org/wiki/S",
            page_with_links("seed", &[]),
        )]);
        let mut index = SqliteIndex::new_in_memory().unwrap();
        index
            .index_page(&url("S"), &page_with_links("seed", &[]))
            .unwrap();

        let mut crawler = Crawler::new(url("S"), source, index, collection());
        let outcome = crawler.step(true).await.unwrap();

        assert_eq!(outcome, StepOutcome::Processed(url("S")));
        assert_eq!(crawler.source.test_fetches.borrow().as_slice(), [url("S")]);
        assert!(crawler.source.live_fetches.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_frontier_entries_index_once() {
        let source = StubSource::new(vec![
            ("https://en.wikipedia.org/wiki/S", page_with_links("seed", &["A", "A"])),
            ("https://en.wikipedia.org/wiki/A", page_with_links("a page", &[])),
        ]);
        let index = SqliteIndex::new_in_memory().unwrap();
        let mut crawler = Crawler::new(url("S"), source, index, collection());

        crawler.step(false).await.unwrap();
        assert_eq!(crawler.frontier_size(), 2);

        // First occurrence is processed, the duplicate is skipped
        assert_eq!(
            crawler.step(false).await.unwrap(),
            StepOutcome::Processed(url("A"))
        );
        assert_eq!(crawler.step(false).await.unwrap(), StepOutcome::Skipped);
        assert_eq!(crawler.source.live_fetches.borrow().len(), 2);
        assert_eq!(crawler.index().page_count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_frontier_is_an_error() {
        let source = StubSource::new(vec![(
            "https://en.wikipedia.org/wiki/S",
            page_with_links("seed", &[]),
        )]);
        let index = SqliteIndex::new_in_memory().unwrap();
        let mut crawler = Crawler::new(url("S"), source, index, collection());

        crawler.step(false).await.unwrap();
        assert_eq!(crawler.frontier_size(), 0);

        let result = crawler.step(false).await;
        assert!(matches!(result, Err(KumoError::EmptyFrontier)));
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates_without_indexing() {
        // Seed is on the frontier but the source has no content for it
        let source = StubSource::new(vec![]);
        let index = SqliteIndex::new_in_memory().unwrap();
        let mut crawler = Crawler::new(url("S"), source, index, collection());

        let result = crawler.step(false).await;
        assert!(matches!(result, Err(KumoError::Fetch(_))));
        assert_eq!(crawler.index().page_count().unwrap(), 0);
    }
}
