// Resolver-facing package records built from catalog entries

use crate::constants;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Where the distribution archive lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dist {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// Source control checkout the release was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub reference: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    GreaterOrEqual,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::GreaterOrEqual => f.write_str(">="),
        }
    }
}

/// A single version constraint, e.g. `>=2.0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub operator: Operator,
    pub version: String,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A required dependency of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Package that declares the requirement
    pub source: String,
    /// Package that is required
    pub name: String,
    pub constraint: Constraint,
    /// Constraint as a human would write it
    pub pretty_constraint: String,
}

impl Link {
    /// The requirement every moodle.org package has on the installer framework
    pub fn installer(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: constants::INSTALLER_PACKAGE.to_string(),
            constraint: Constraint {
                operator: Operator::GreaterOrEqual,
                version: constants::INSTALLER_MIN_VERSION.to_string(),
            },
            pretty_constraint: constants::INSTALLER_PRETTY_CONSTRAINT.to_string(),
        }
    }
}

/// A package version as handed to the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedPackage {
    pub name: String,
    pub version: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub dist: Dist,
    pub release_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    pub requires: Vec<Link>,
    pub extra: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl SynthesizedPackage {
    /// Checksum recorded for the distribution archive, if any
    pub fn dist_md5(&self) -> Option<&str> {
        self.extra.get(constants::EXTRA_DIST_MD5).map(String::as_str)
    }

    pub fn installer_name(&self) -> Option<&str> {
        self.extra
            .get(constants::EXTRA_INSTALLER_NAME)
            .map(String::as_str)
    }

    /// `name version`, as shown to users
    pub fn pretty_string(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
