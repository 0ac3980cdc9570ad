// Config module for environment-level configuration

use crate::constants;
use log::warn;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_NAMESPACE: &str = "MOODLEORG_NAMESPACE";
pub const ENV_API_URL: &str = "MOODLEORG_API_URL";
pub const ENV_CACHE_DIR: &str = "MOODLEORG_CACHE_DIR";
pub const ENV_CACHE_READ_ONLY: &str = "MOODLEORG_CACHE_READ_ONLY";
pub const ENV_NO_THROTTLE: &str = "MOODLEORG_NO_THROTTLE";
pub const ENV_THROTTLE_COUNT: &str = "MOODLEORG_THROTTLE_COUNT";
pub const ENV_THROTTLE_SLEEP: &str = "MOODLEORG_THROTTLE_SLEEP";

/// Throttle settings for downloads from the origin host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleConfig {
    pub enabled: bool,
    /// Downloads allowed before a pause
    pub count: u32,
    pub pause: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: constants::DEFAULT_THROTTLE_COUNT,
            pause: Duration::from_secs(constants::DEFAULT_THROTTLE_SLEEP_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub namespace: String,
    pub api_url: String,
    /// None = use the per-user cache directory
    pub cache_dir: Option<PathBuf>,
    pub cache_read_only: bool,
    pub throttle: ThrottleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: constants::DEFAULT_NAMESPACE.to_string(),
            api_url: constants::API_URL.to_string(),
            cache_dir: None,
            cache_read_only: false,
            throttle: ThrottleConfig::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            namespace: non_empty(ENV_NAMESPACE).unwrap_or(defaults.namespace),
            api_url: non_empty(ENV_API_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            cache_dir: non_empty(ENV_CACHE_DIR).map(PathBuf::from),
            cache_read_only: non_empty(ENV_CACHE_READ_ONLY)
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            throttle: ThrottleConfig {
                enabled: !non_empty(ENV_NO_THROTTLE)
                    .map(|v| parse_flag(&v))
                    .unwrap_or(false),
                count: parse_number(ENV_THROTTLE_COUNT, non_empty(ENV_THROTTLE_COUNT))
                    .unwrap_or(defaults.throttle.count),
                pause: parse_number(ENV_THROTTLE_SLEEP, non_empty(ENV_THROTTLE_SLEEP))
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.throttle.pause),
            },
        }
    }

    /// Directory the catalog cache lives in
    pub fn resolve_cache_dir(&self) -> Option<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Some(dir.clone()),
            None => dirs::cache_dir().map(|base| {
                base.join("moodleorg")
                    .join(sanitize_cache_segment(&self.api_url))
            }),
        }
    }
}

/// Replace everything outside `[a-z0-9.]` so a URL can be used as a directory name
pub fn sanitize_cache_segment(url: &str) -> String {
    url.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_number<T: std::str::FromStr>(key: &str, value: Option<String>) -> Option<T> {
    let value = value?;
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid number", key, value);
            None
        }
    }
}
