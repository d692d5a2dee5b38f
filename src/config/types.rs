use serde::Deserialize;

/// Main configuration structure for kumo
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub collection: CollectionConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// The location the crawl starts from
    pub seed: String,

    /// Maximum number of pages to index before stopping
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

/// Describes the article collection being crawled
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
    /// Absolute address the collection lives under (no trailing slash),
    /// e.g. "https://en.wikipedia.org"
    #[serde(rename = "base-address")]
    pub base_address: String,

    /// Path prefix that marks a reference as internal to the collection,
    /// e.g. "/wiki"
    #[serde(rename = "internal-prefix")]
    pub internal_prefix: String,

    /// Optional CSS selector for the container holding article paragraphs;
    /// when absent, all <p> elements are used
    #[serde(rename = "content-root", default)]
    pub content_root: Option<String>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite index database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}
