// Catalog fetcher: cached retrieval of pluglist.php

use crate::cache::CatalogCache;
use crate::config::Config;
use crate::constants;
use crate::error::FetchError;
use crate::http;
use crate::moodle::PlugListResponse;
use log::{debug, info, warn};
use std::time::Duration;

/// Retrieves the moodle.org catalog, serving recent copies from the cache
pub struct CatalogFetcher {
    api_url: String,
    cache: Box<dyn CatalogCache>,
    ttl: Duration,
}

impl CatalogFetcher {
    pub fn new(cache: Box<dyn CatalogCache>) -> Self {
        Self {
            api_url: constants::API_URL.to_string(),
            cache,
            ttl: Duration::from_secs(constants::CACHE_TTL_SECS),
        }
    }

    pub fn from_config(config: &Config, cache: Box<dyn CatalogCache>) -> Self {
        Self::new(cache).with_api_url(config.api_url.clone())
    }

    /// Set the API base URL (mirrors, tests)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Full URL of the versioned list endpoint
    pub fn endpoint(&self) -> String {
        [
            self.api_url.as_str(),
            constants::API_VERSION,
            constants::PLUGLIST_ENDPOINT,
        ]
        .join("/")
    }

    /// Fetch the catalog
    ///
    /// A cached copy younger than the freshness threshold is returned without
    /// touching the network. Otherwise a single GET is issued and its body is
    /// written back to the cache unless the cache is read-only. Failing to
    /// write the cache only logs a warning.
    pub async fn fetch_catalog(&self) -> Result<PlugListResponse, FetchError> {
        let key = constants::CACHE_KEY;

        if let Some(age) = self.cache.age(key)
            && age < self.ttl
            && let Some(cached) = self.cache.read(key)
        {
            debug!("Using cached {} ({}s old)", key, age.as_secs());
            return Ok(PlugListResponse::from_slice(&cached)?);
        }

        let url = self.endpoint();
        info!("HTTP GET {}", url);
        let body = http::fetch_bytes(&url).await?;

        if !self.cache.is_read_only()
            && let Err(e) = self.cache.write(key, &body)
        {
            warn!("Failed to cache {}: {}", key, e);
        }

        let response = PlugListResponse::from_slice(&body)?;
        debug!(
            "Fetched catalog generated at {} with {} plugin(s)",
            response.timestamp,
            response.plugins.len()
        );
        Ok(response)
    }
}
