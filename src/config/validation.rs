use crate::config::types::{CollectionConfig, Config, CrawlConfig, UserAgentConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_collection_config(&config.collection)?;
    validate_crawl_config(&config.crawl, &config.collection)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(
    config: &CrawlConfig,
    collection: &CollectionConfig,
) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    let seed = Url::parse(&config.seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", config.seed, e)))?;

    if seed.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' must use HTTPS scheme",
            config.seed
        )));
    }

    if !config.seed.starts_with(&collection.base_address) {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' is outside the collection base address '{}'",
            config.seed, collection.base_address
        )));
    }

    Ok(())
}

/// Validates collection configuration
fn validate_collection_config(config: &CollectionConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_address).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid base_address '{}': {}",
            config.base_address, e
        ))
    })?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base_address must be an HTTP(S) URL, got '{}'",
            config.base_address
        )));
    }

    // Internal links are resolved by prefixing base_address to a /-rooted
    // path; a trailing slash would produce double slashes.
    if config.base_address.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base_address must not end with '/', got '{}'",
            config.base_address
        )));
    }

    if !config.internal_prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "internal_prefix must start with '/', got '{}'",
            config.internal_prefix
        )));
    }

    if let Some(selector) = &config.content_root {
        Selector::parse(selector).map_err(|e| {
            ConfigError::Validation(format!("Invalid content_root selector '{}': {}", selector, e))
        })?;
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email shape check: one '@' with a dot somewhere after it
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "contact_email '{}' is missing '@'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "contact_email '{}' is not a valid address",
            email
        )));
    }

    Ok(())
}
