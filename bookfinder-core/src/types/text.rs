//! Free-text fields that the catalog sends either bare or wrapped

use serde::{Deserialize, Serialize};

/// A catalog text value
///
/// Descriptions and biographies arrive either as a plain JSON string or as a
/// `{"type": "/type/text", "value": "..."}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Plain(String),
    Typed {
        #[serde(rename = "type", default)]
        kind: Option<String>,
        #[serde(default)]
        value: String,
    },
}

impl TextValue {
    /// Collapse either representation into the plain string
    pub fn into_text(self) -> String {
        match self {
            TextValue::Plain(text) => text,
            TextValue::Typed { value, .. } => value,
        }
    }
}

/// Normalize an optional text value, treating empty text as absent
pub fn normalize_text(value: Option<TextValue>) -> Option<String> {
    value.map(TextValue::into_text).filter(|text| !text.is_empty())
}
