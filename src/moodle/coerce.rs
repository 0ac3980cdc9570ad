// Lenient field decoders for the moodle.org catalog
//
// The API is loose about types: ids and versions show up both as JSON numbers
// and as numeric strings, and most text fields may be null.

use chrono::{DateTime, Utc};
use serde::de::{Deserialize, Deserializer, Error};

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(true) => "1".to_string(),
            Scalar::Bool(false) => String::new(),
            Scalar::Text(s) => s,
        }
    }

    pub(crate) fn into_u64(self) -> Result<u64, String> {
        match self {
            Scalar::Unsigned(n) => Ok(n),
            Scalar::Signed(n) => Err(format!("expected a non-negative integer, got {}", n)),
            Scalar::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
                Ok(f as u64)
            }
            Scalar::Text(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("expected an integer, got \"{}\"", s)),
            other => Err(format!("expected an integer, got {:?}", other)),
        }
    }

    /// Integer value the way loose vendor data reads: leading digits of text,
    /// truncated floats, and 0 for anything else
    fn into_u64_truncating(self) -> u64 {
        match self {
            Scalar::Unsigned(n) => n,
            Scalar::Signed(_) => 0,
            Scalar::Float(f) if f.is_finite() && f >= 0.0 => f as u64,
            Scalar::Float(_) => 0,
            Scalar::Bool(b) => u64::from(b),
            Scalar::Text(s) => {
                let trimmed = s.trim_start();
                let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
                let end = digits
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(digits.len());
                digits[..end]
                    .bytes()
                    .fold(0u64, |n, d| n.saturating_mul(10).saturating_add(u64::from(d - b'0')))
            }
        }
    }

    fn into_epoch(self) -> Result<DateTime<Utc>, String> {
        let (secs, nanos) = match self {
            Scalar::Unsigned(n) => (
                i64::try_from(n).map_err(|_| format!("timestamp {} out of range", n))?,
                0,
            ),
            Scalar::Signed(n) => (n, 0),
            Scalar::Float(f) => split_float(f)?,
            Scalar::Text(s) => {
                let trimmed = s.trim();
                if let Ok(n) = trimmed.parse::<i64>() {
                    (n, 0)
                } else if let Ok(f) = trimmed.parse::<f64>() {
                    split_float(f)?
                } else {
                    return Err(format!("couldn't convert \"{}\" to a timestamp", s));
                }
            }
            Scalar::Bool(b) => return Err(format!("couldn't convert {} to a timestamp", b)),
        };

        DateTime::from_timestamp(secs, nanos)
            .ok_or_else(|| format!("timestamp {} out of range", secs))
    }
}

fn split_float(f: f64) -> Result<(i64, u32), String> {
    if !f.is_finite() || f.abs() >= i64::MAX as f64 {
        return Err(format!("timestamp {} out of range", f));
    }
    let secs = f.floor();
    let nanos = ((f - secs) * 1e9).round().min(999_999_999.0) as u32;
    Ok((secs as i64, nanos))
}

/// Required integer given as a number or a string
///
/// Text reads up to its first non-digit, so `"12abc"` is 12 and `"abc"` is 0.
pub fn u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        Some(value) => Ok(value.into_u64_truncating()),
        None => Err(D::Error::custom("expected an integer, got null")),
    }
}

/// Text field where null reads as the empty string
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_text)
        .unwrap_or_default())
}

/// Text field that must be present and non-null
pub fn required_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        Some(value) => Ok(value.into_text()),
        None => Err(D::Error::custom("expected a string, got null")),
    }
}

/// Nullable text field
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

/// Unix epoch seconds, interpreted as UTC
pub fn epoch_seconds<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        Some(value) => value.into_epoch().map_err(D::Error::custom),
        None => Err(D::Error::custom("couldn't convert null to a timestamp")),
    }
}
