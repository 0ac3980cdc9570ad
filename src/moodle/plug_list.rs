// Envelope of the pluglist.php response

use crate::error::DeserializationError;
use crate::moodle::coerce;
use crate::moodle::plugin::Plugin;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One snapshot of the whole catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlugListResponse {
    /// When the catalog was generated
    #[serde(deserialize_with = "coerce::epoch_seconds")]
    pub timestamp: DateTime<Utc>,
    pub plugins: Vec<Plugin>,
}

impl PlugListResponse {
    pub fn from_json(value: &serde_json::Value) -> Result<Self, DeserializationError> {
        Ok(PlugListResponse::deserialize(value)?)
    }

    /// Decode raw response bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DeserializationError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
