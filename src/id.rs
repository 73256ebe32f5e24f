//! Identifier decoding that tolerates numbers and strings.
//!
//! The API returns the same identifier field as a JSON number on some
//! endpoints and as a JSON string on others. [`FlexibleId`] accepts both and
//! always holds the canonical decimal text; it always serializes back out as
//! a JSON string.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

/// An identifier that may arrive as a JSON number or a JSON string.
///
/// Wrap it in `Option` with `#[serde(default)]` to get the
/// "null or missing means absent" rule.
///
/// # Example
///
/// ```
/// use ccai::id::FlexibleId;
///
/// let from_number: FlexibleId = serde_json::from_str("9007199254740993").unwrap();
/// let from_string: FlexibleId = serde_json::from_str("\"9007199254740993\"").unwrap();
///
/// assert_eq!(from_number, from_string);
/// assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"9007199254740993\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlexibleId(String);

impl FlexibleId {
    /// Creates an identifier from its textual form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FlexibleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FlexibleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for FlexibleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for FlexibleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for FlexibleId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for FlexibleId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl PartialEq<str> for FlexibleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FlexibleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for FlexibleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FlexibleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        coerce_to_string(value)
            .map(Self)
            .ok_or_else(|| de::Error::invalid_type(de::Unexpected::Unit, &"an identifier"))
    }
}

/// Converts a JSON token to text, branching on its kind.
///
/// Strings are kept verbatim, integers use their base-10 form, `null`
/// is absent. Anything else is coerced on a best-effort basis.
#[must_use]
pub fn coerce_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(number_to_string(&n)),
        Value::Bool(b) => Some(b.to_string()),
        other @ (Value::Array(_) | Value::Object(_)) => Some(other.to_string()),
    }
}

#[allow(clippy::cast_possible_truncation)] // guarded by the range check
fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// `deserialize_with` helper for optional text fields that the API may send
/// as numbers (error codes, for example).
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce a JSON value.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(|v| v.and_then(coerce_to_string))
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
