//! Exposes the moodle.org plugin catalog as a package repository.
//!
//! The catalog is fetched (and cached) by [`fetcher::CatalogFetcher`], parsed
//! into the [`moodle`] model, and turned into [`package::SynthesizedPackage`]
//! records by [`synthesizer::PackageSynthesizer`]. [`guard::DownloadGuard`]
//! verifies and throttles downloads of those packages.

pub mod cache;
pub mod calver;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetcher;
pub mod guard;
pub mod http;
pub mod moodle;
pub mod package;
pub mod plugin;
pub mod repository;
pub mod synthesizer;

pub use cache::{CatalogCache, FileCache};
pub use config::{Config, ThrottleConfig};
pub use error::{CacheError, DeserializationError, FetchError, IntegrityError, SynthesisError};
pub use fetcher::CatalogFetcher;
pub use guard::{DownloadEvent, DownloadGuard, PackageContext};
pub use package::SynthesizedPackage;
pub use plugin::MoodleOrgPlugin;
pub use repository::MoodleRepository;
pub use synthesizer::PackageSynthesizer;
