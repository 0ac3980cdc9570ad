// Shared HTTP client utilities

use crate::error::FetchError;
use reqwest::{Client, Response, Url};

/// User-Agent string for all HTTP requests
const USER_AGENT: &str = concat!("moodleorg/", env!("CARGO_PKG_VERSION"));

lazy_static::lazy_static! {
    /// Shared HTTP client with proper User-Agent
    static ref CLIENT: Client = Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to create HTTP client");
}

/// Fetch raw bytes from a URL, failing on non-success status or an empty body
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, FetchError> {
    let network = |source| FetchError::Network {
        url: url.to_string(),
        source,
    };

    let response: Response = CLIENT.get(url).send().await.map_err(network)?;

    if !response.status().is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let bytes = response.bytes().await.map_err(network)?;
    if bytes.is_empty() {
        return Err(FetchError::EmptyResponse(url.to_string()));
    }

    Ok(bytes.to_vec())
}

/// Extract a file name from the last path segment of a URL
pub fn filename_from_url(url: &str, fallback: &str) -> String {
    url.split('/')
        .next_back()
        .unwrap_or(fallback)
        .split('?')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Lowercased host part of a URL
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|host| host.trim_end_matches('.').to_ascii_lowercase())
}

/// Whether `host` is `domain` or one of its subdomains
pub fn host_matches(host: &str, domain: &str) -> bool {
    let host = host.to_ascii_lowercase();
    let domain = domain.to_ascii_lowercase();
    host == domain || host.ends_with(&format!(".{}", domain))
}
