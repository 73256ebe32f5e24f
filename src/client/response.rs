//! Side map for response fields the typed models do not declare.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Vendor fields preserved from a response body.
///
/// Response models flatten this in, so every key that the model does not
/// declare ends up here instead of being discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionData(Map<String, Value>);

impl ExtensionData {
    /// Decodes the field `key` into `T`.
    ///
    /// Returns `None` if the key is absent or does not fit `T`.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .and_then(|v| T::deserialize(v).ok())
    }

    /// Returns the raw JSON value for `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of preserved fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no undeclared fields were present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
