// Download guard: checksum verification and origin throttling
//
// The host calls into the guard after each file download. Checksums are only
// checked for packages that carry a moodle.org MD5, and only downloads from
// the moodle.org domain count towards the throttle.

use crate::config::ThrottleConfig;
use crate::constants;
use crate::error::IntegrityError;
use crate::http;
use crate::package::SynthesizedPackage;
use log::{debug, info};
use md5::{Digest, Md5};
use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Duration;

/// Package metadata the host passes along with a download
pub trait PackageContext {
    /// Value of an entry in the package's extra metadata
    fn extra(&self, key: &str) -> Option<&str>;
}

impl PackageContext for SynthesizedPackage {
    fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }
}

/// A finished download, as reported by the host
#[derive(Clone, Copy)]
pub struct DownloadEvent<'a> {
    /// Downloaded file on disk
    pub file: &'a Path,
    /// Package the file belongs to, if the download was for a package
    pub package: Option<&'a dyn PackageContext>,
    /// URL the file was requested from
    pub url: &'a str,
}

impl<'a> DownloadEvent<'a> {
    pub fn new(file: &'a Path, url: &'a str) -> Self {
        Self {
            file,
            package: None,
            url,
        }
    }

    pub fn for_package(mut self, package: &'a dyn PackageContext) -> Self {
        self.package = Some(package);
        self
    }
}

/// Counter of downloads from the origin since the last pause
#[derive(Debug, Clone)]
pub struct Throttle {
    config: ThrottleConfig,
    count: u32,
}

impl Throttle {
    pub fn new(config: ThrottleConfig) -> Self {
        Self { config, count: 0 }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Record one origin download; returns the pause to take, if any
    ///
    /// After `config.count` downloads, the next one triggers a pause and
    /// resets the counter.
    pub fn record(&mut self) -> Option<Duration> {
        if !self.config.enabled {
            return None;
        }

        self.count += 1;
        if self.count > self.config.count {
            self.count = 0;
            Some(self.config.pause)
        } else {
            None
        }
    }
}

/// Hex MD5 of a file's contents
pub fn file_md5(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Post-download hooks for one activation
///
/// Owns the throttle counter, so every activation starts from zero. Hosts
/// that download from several tasks must share one guard behind their own
/// synchronization.
#[derive(Debug, Clone)]
pub struct DownloadGuard {
    origin_domain: String,
    throttle: Throttle,
}

impl DownloadGuard {
    pub fn new(throttle: ThrottleConfig) -> Self {
        Self {
            origin_domain: constants::ORIGIN_DOMAIN.to_string(),
            throttle: Throttle::new(throttle),
        }
    }

    /// Count downloads against a different origin domain
    pub fn with_origin_domain(mut self, domain: impl Into<String>) -> Self {
        self.origin_domain = domain.into();
        self
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Verify the downloaded file against the package's recorded MD5
    ///
    /// Downloads without a package, or for packages without a checksum, pass
    /// untouched.
    pub fn verify_download(&self, event: &DownloadEvent<'_>) -> Result<(), IntegrityError> {
        let Some(expected) = event
            .package
            .and_then(|package| package.extra(constants::EXTRA_DIST_MD5))
        else {
            return Ok(());
        };

        let actual = file_md5(event.file).map_err(|source| IntegrityError::Unreadable {
            path: event.file.to_path_buf(),
            source,
        })?;

        if !actual.eq_ignore_ascii_case(expected.trim()) {
            return Err(IntegrityError::ChecksumMismatch {
                url: event.url.to_string(),
                expected: expected.to_string(),
                actual,
            });
        }

        debug!("Checksum verified for {}", event.url);
        Ok(())
    }

    /// Whether a URL points at the origin domain
    pub fn is_origin(&self, url: &str) -> bool {
        http::host_of(url).is_some_and(|host| http::host_matches(&host, &self.origin_domain))
    }

    /// Count an origin download and pause the caller when the limit is hit
    ///
    /// Returns the pause that was taken, if any.
    pub async fn throttle_download(&mut self, event: &DownloadEvent<'_>) -> Option<Duration> {
        if !self.is_origin(event.url) {
            return None;
        }

        let pause = self.throttle.record()?;
        info!(
            "Pausing {}s to avoid {} rate limits",
            pause.as_secs(),
            self.origin_domain
        );
        tokio::time::sleep(pause).await;
        Some(pause)
    }

    /// Run both hooks in order: verification first, then throttling
    pub async fn post_file_download(
        &mut self,
        event: &DownloadEvent<'_>,
    ) -> Result<(), IntegrityError> {
        self.verify_download(event)?;
        self.throttle_download(event).await;
        Ok(())
    }
}
