// Activation entry point for hosts embedding the moodle.org repository

use crate::cache::{CatalogCache, FileCache};
use crate::config::Config;
use crate::fetcher::CatalogFetcher;
use crate::guard::DownloadGuard;
use crate::repository::MoodleRepository;
use crate::synthesizer::PackageSynthesizer;
use anyhow::Context;

/// State created when the host activates the integration
pub struct MoodleOrgPlugin {
    pub repository: MoodleRepository,
    /// Download hooks; throttle state lives for this activation only
    pub guard: DownloadGuard,
}

impl MoodleOrgPlugin {
    /// Load the catalog with a file cache at the configured location
    pub async fn activate(config: &Config) -> anyhow::Result<Self> {
        let cache = FileCache::from_config(config).context("Failed to set up catalog cache")?;
        Self::activate_with_cache(config, Box::new(cache)).await
    }

    /// Load the catalog through a caller-provided cache
    pub async fn activate_with_cache(
        config: &Config,
        cache: Box<dyn CatalogCache>,
    ) -> anyhow::Result<Self> {
        let fetcher = CatalogFetcher::from_config(config, cache);
        let synthesizer = PackageSynthesizer::new(config.namespace.clone());

        let repository = MoodleRepository::initialize(&fetcher, &synthesizer)
            .await
            .context("Failed to load the moodle.org plugin catalog")?;

        Ok(Self {
            repository,
            guard: DownloadGuard::new(config.throttle.clone()),
        })
    }
}
