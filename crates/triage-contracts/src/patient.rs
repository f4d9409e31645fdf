//! Patient records as served by the upstream provider.
//!
//! Vital-sign fields are kept in their raw upstream form (`Measurement`) so
//! that scoring and data-quality checks see exactly what was sent. Parsing is
//! the scorer's job, not deserialization's.
//!
//! The descriptive fields are decoded leniently too: a number where a string
//! was expected is kept as its text, and anything stranger becomes `None`.
//! One badly typed record never fails the page it arrived on.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw vital-sign value as it appeared in the upstream JSON.
///
/// The provider is inconsistent: ages and temperatures arrive as numbers or
/// numeric strings, and malformed records may carry anything else. A JSON
/// `null` or a missing field is `None` on the owning `Patient` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Number(f64),
    Text(String),
    /// Booleans, arrays, objects. Never a valid reading.
    Other(serde_json::Value),
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        Measurement::Number(value)
    }
}

impl From<&str> for Measurement {
    fn from(value: &str) -> Self {
        Measurement::Text(value.to_string())
    }
}

/// Administrative sex as reported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
    /// Any other value the provider sends.
    #[serde(other)]
    Unknown,
}

/// One patient record.
///
/// `risk_score` is never read from upstream. It stays `None` until the
/// collector's scoring pass, which replaces the record via [`Patient::scored`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(deserialize_with = "identifier")]
    pub patient_id: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<Measurement>,
    #[serde(default, deserialize_with = "lenient_gender")]
    pub gender: Option<Gender>,
    /// Expected as `"systolic/diastolic"`, e.g. `"120/80"`.
    #[serde(default)]
    pub blood_pressure: Option<Measurement>,
    /// Degrees Fahrenheit.
    #[serde(default)]
    pub temperature: Option<Measurement>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub visit_date: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub diagnosis: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub medications: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u8>,
}

impl Patient {
    /// A record carrying only an identifier. Handy for building fixtures.
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            name: None,
            age: None,
            gender: None,
            blood_pressure: None,
            temperature: None,
            visit_date: None,
            diagnosis: None,
            medications: None,
            risk_score: None,
        }
    }

    /// Consume the record and return it with its risk score fixed.
    pub fn scored(self, risk_score: u8) -> Self {
        Self {
            risk_score: Some(risk_score),
            ..self
        }
    }
}

// ── Lenient field decoding ───────────────────────────────────────────────────

/// Strings pass through; numbers and booleans keep their JSON text.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Ids may arrive as numbers. Only `null` is rejected: a record has to be
/// reportable by id.
fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Err(de::Error::custom("patient_id is null")),
        value => Ok(scalar_to_string(&value).unwrap_or_else(|| value.to_string())),
    }
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(&Value::deserialize(deserializer)?))
}

/// `"M"` and `"F"` are recognized; any other non-null value is `Unknown`.
fn lenient_gender<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) if s == "M" => Some(Gender::M),
        Value::String(s) if s == "F" => Some(Gender::F),
        _ => Some(Gender::Unknown),
    })
}
