// Repository of packages synthesized from the moodle.org catalog

use crate::constants;
use crate::error::FetchError;
use crate::fetcher::CatalogFetcher;
use crate::moodle::Plugin;
use crate::package::SynthesizedPackage;
use crate::synthesizer::PackageSynthesizer;
use log::{debug, warn};

/// All packages the catalog provides, ready for the resolver
#[derive(Debug, Clone, Default)]
pub struct MoodleRepository {
    packages: Vec<SynthesizedPackage>,
}

impl MoodleRepository {
    /// Fetch the catalog and register a package for every plugin version
    ///
    /// Catalog fetch or parse failures abort initialization. A plugin whose
    /// packages cannot be built is logged and skipped.
    pub async fn initialize(
        fetcher: &CatalogFetcher,
        synthesizer: &PackageSynthesizer,
    ) -> Result<Self, FetchError> {
        let catalog = fetcher.fetch_catalog().await?;
        Ok(Self::from_plugins(&catalog.plugins, synthesizer))
    }

    /// Build the repository from already-parsed plugins
    pub fn from_plugins(plugins: &[Plugin], synthesizer: &PackageSynthesizer) -> Self {
        let mut repository = Self::default();
        let mut skipped = 0;

        for plugin in plugins {
            if plugin.component.is_empty() {
                skipped += 1;
                continue;
            }

            match synthesizer.synthesize(plugin) {
                Ok(packages) => repository.packages.extend(packages),
                Err(e) => warn!("{}", e),
            }
        }

        debug!(
            "Registered {} package(s) from {} plugin(s), {} without a component",
            repository.packages.len(),
            plugins.len(),
            skipped
        );
        repository
    }

    pub fn name(&self) -> &'static str {
        constants::REPOSITORY_NAME
    }

    pub fn packages(&self) -> &[SynthesizedPackage] {
        &self.packages
    }

    /// Every version registered under `name`
    pub fn find_packages<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a SynthesizedPackage> + 'a {
        self.packages
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn find_package<'a>(
        &'a self,
        name: &'a str,
        version: &str,
    ) -> Option<&'a SynthesizedPackage> {
        self.find_packages(name).find(|p| p.version == version)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
