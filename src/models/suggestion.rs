//! Suggestion records returned by the autocomplete service.

use serde::{Deserialize, Deserializer, Serialize};

use super::Token;

/// A single autocomplete candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Unique within one response. Accepts JSON strings or numbers.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display label
    pub name: String,
    /// Secondary classification text
    #[serde(default)]
    pub category: String,
    /// Opaque identifier that becomes the tag token's value
    pub value: String,
}

impl Suggestion {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            value: value.into(),
        }
    }

    /// The tag token produced when this suggestion is picked.
    pub fn to_tag(&self) -> Token {
        Token::tag(self.value.clone(), Some(self.name.clone()))
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
