use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parsed user query as returned by the external extractor service: the
/// raw message plus a bag of recognized metadata keys
/// (`photo_location_country`, `year`, `photographer_username`, ...).
///
/// The extractor runs out of process; this type only models its JSON
/// contract. The ranking kernel reads `message`; the metadata bag drives
/// [`filter_photos`](crate::filter_photos).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl Query {
    /// Parses the extractor's JSON output.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// True when `key` is present with a non-null value.
    pub fn has(&self, key: &str) -> bool {
        matches!(self.metadata.get(key), Some(value) if !value.is_null())
    }

    /// String value for `key`, if present, non-null, and a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// Numeric value for `key`, if present and numeric. The extractor emits
    /// years and months as JSON numbers.
    pub fn num_field(&self, key: &str) -> Option<f64> {
        self.metadata.get(key).and_then(Value::as_f64)
    }
}

/// Overlays non-null values from `update` onto `base`, for follow-up
/// queries that refine an earlier one ("same but in winter").
pub fn merge_metadata(
    mut base: HashMap<String, Value>,
    update: HashMap<String, Value>,
) -> HashMap<String, Value> {
    for (key, value) in update {
        if !value.is_null() {
            base.insert(key, value);
        }
    }
    base
}
