// Plugin maturity levels (MATURITY_* on moodle.org)

use crate::error::DeserializationError;
use crate::moodle::coerce::Scalar;
use serde::de::{Deserializer, Error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stability classification of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Maturity {
    Alpha,
    Beta,
    Rc,
    /// Releases without a maturity field are treated as stable
    #[default]
    Stable,
}

impl Maturity {
    /// Map a moodle.org maturity code to a level
    pub fn from_code(code: u64) -> Result<Self, DeserializationError> {
        match code {
            0 | 50 => Ok(Maturity::Alpha),
            100 => Ok(Maturity::Beta),
            150 => Ok(Maturity::Rc),
            200 => Ok(Maturity::Stable),
            other => Err(DeserializationError::UnknownMaturity(other.to_string())),
        }
    }

    /// Decode a maturity from an untyped JSON value (number, numeric string, or null)
    pub fn from_json(value: &serde_json::Value) -> Result<Self, DeserializationError> {
        Ok(Maturity::deserialize(value)?)
    }

    /// Pre-release suffix used in synthesized version strings
    pub fn suffix(&self) -> &'static str {
        match self {
            Maturity::Alpha => "-alpha",
            Maturity::Beta => "-beta",
            Maturity::Rc => "-rc",
            Maturity::Stable => "",
        }
    }
}

impl fmt::Display for Maturity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Maturity::Alpha => "alpha",
            Maturity::Beta => "beta",
            Maturity::Rc => "rc",
            Maturity::Stable => "stable",
        };
        f.write_str(name)
    }
}

impl<'de> Deserialize<'de> for Maturity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<Scalar>::deserialize(deserializer)? else {
            return Ok(Maturity::default());
        };

        let shown = format!("{:?}", raw);
        let code = raw
            .into_u64()
            .map_err(|_| D::Error::custom(format!("Unknown plugin maturity {}", shown)))?;
        Maturity::from_code(code).map_err(D::Error::custom)
    }
}
