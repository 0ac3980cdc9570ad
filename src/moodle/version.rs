// A single release of a moodle.org plugin

use crate::error::DeserializationError;
use crate::moodle::coerce;
use crate::moodle::maturity::Maturity;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Source control details a release was published from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VcsInfo {
    pub system: Option<String>,
    /// Free-form system name when `system` is "other"
    pub system_other: Option<String>,
    pub repository_url: Option<String>,
    pub branch: Option<String>,
    pub tag: Option<String>,
}

/// Source provenance of a release: (type, url, reference)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance<'a> {
    pub kind: &'a str,
    pub url: &'a str,
    pub reference: &'a str,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl VcsInfo {
    /// Complete provenance, if the release has a system, a repository URL,
    /// and a tag or branch. Tags win over branches.
    pub fn provenance(&self) -> Option<Provenance<'_>> {
        let system = non_empty(&self.system)?;
        let url = non_empty(&self.repository_url)?;
        let reference = non_empty(&self.tag).or_else(|| non_empty(&self.branch))?;

        let kind = match non_empty(&self.system_other) {
            Some(other) if system.eq_ignore_ascii_case("other") => other,
            _ => system,
        };

        Some(Provenance {
            kind,
            url,
            reference,
        })
    }
}

/// One version of a [`crate::moodle::Plugin`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawVersion")]
pub struct PluginVersion {
    pub id: u64,
    /// Release identifier as published, normally YYYYMMDDNN
    pub version: String,
    pub release: Option<String>,
    pub maturity: Maturity,
    pub download_url: String,
    /// Hex MD5 of the distribution zip
    pub download_md5: String,
    pub vcs: VcsInfo,
    pub time_created: DateTime<Utc>,
}

impl PluginVersion {
    pub fn from_json(value: &serde_json::Value) -> Result<Self, DeserializationError> {
        Ok(PluginVersion::deserialize(value)?)
    }

    /// The release identifier as an integer, if it is made of digits only
    pub fn version_number(&self) -> Option<u64> {
        let digits = self.version.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

#[derive(Deserialize)]
struct RawVersion {
    #[serde(deserialize_with = "coerce::u64_lenient")]
    id: u64,
    #[serde(deserialize_with = "coerce::required_string")]
    version: String,
    #[serde(default, deserialize_with = "coerce::optional_string")]
    release: Option<String>,
    #[serde(default)]
    maturity: Maturity,
    #[serde(rename = "downloadurl", deserialize_with = "coerce::required_string")]
    download_url: String,
    #[serde(rename = "downloadmd5", deserialize_with = "coerce::required_string")]
    download_md5: String,
    #[serde(rename = "vcssystem", default, deserialize_with = "coerce::optional_string")]
    vcs_system: Option<String>,
    #[serde(
        rename = "vcssystemother",
        default,
        deserialize_with = "coerce::optional_string"
    )]
    vcs_system_other: Option<String>,
    #[serde(
        rename = "vcsrepositoryurl",
        default,
        deserialize_with = "coerce::optional_string"
    )]
    vcs_repository_url: Option<String>,
    #[serde(rename = "vcsbranch", default, deserialize_with = "coerce::optional_string")]
    vcs_branch: Option<String>,
    #[serde(rename = "vcstag", default, deserialize_with = "coerce::optional_string")]
    vcs_tag: Option<String>,
    #[serde(rename = "timecreated", deserialize_with = "coerce::epoch_seconds")]
    time_created: DateTime<Utc>,
}

impl From<RawVersion> for PluginVersion {
    fn from(raw: RawVersion) -> Self {
        Self {
            id: raw.id,
            version: raw.version,
            release: raw.release,
            maturity: raw.maturity,
            download_url: raw.download_url,
            download_md5: raw.download_md5,
            vcs: VcsInfo {
                system: raw.vcs_system,
                system_other: raw.vcs_system_other,
                repository_url: raw.vcs_repository_url,
                branch: raw.vcs_branch,
                tag: raw.vcs_tag,
            },
            time_created: raw.time_created,
        }
    }
}
