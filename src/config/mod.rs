//! Configuration loading and validation
//!
//! Kumo is configured with a TOML file describing the crawl budget, the
//! article collection being walked, the user agent identity, and the
//! database path.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{CollectionConfig, Config, CrawlConfig, OutputConfig, UserAgentConfig};
pub use validation::validate;
