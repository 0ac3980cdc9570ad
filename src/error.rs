// Error types shared across the catalog pipeline

use std::path::PathBuf;
use thiserror::Error;

/// The catalog JSON did not have the expected shape.
#[derive(Debug, Error)]
pub enum DeserializationError {
    #[error("Malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown plugin maturity \"{0}\"")]
    UnknownMaturity(String),
}

/// Retrieving the catalog failed. Aborts repository initialization.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to query {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to query {url}: HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to query {0}: empty response")]
    EmptyResponse(String),

    #[error(transparent)]
    Deserialization(#[from] DeserializationError),
}

/// Persisting to the catalog cache failed. Never fatal.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("I/O error on cache entry {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid cache key: {0}")]
    InvalidKey(String),

    #[error("Cache directory resolution failed")]
    DirResolutionFailed,
}

/// Building packages for one plugin failed. The remaining plugins are unaffected.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Plugin {plugin_id} has malformed component \"{component}\", expected <type>_<name>")]
    MalformedComponent { plugin_id: u64, component: String },
    #[error("Plugin {plugin_id} has malformed version \"{version}\", expected YYYYMMDDNN")]
    MalformedVersion { plugin_id: u64, version: String },
}

/// A downloaded artifact failed verification.
#[derive(Debug, Error)]
pub enum IntegrityError {
    #[error("Checksum verification of the file failed (downloaded from {url})")]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("Could not read downloaded file {path} for verification: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
