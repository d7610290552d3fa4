//! Data model for extracted documentation, engine-agnostic.
//!
//! Everything here serializes to the same JSON shape templates see, so a
//! template can walk `comments[0].tags[0].name` regardless of engine.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One `/** ... */` documentation block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub tags: Vec<Tag>,
    pub description: Description,
    /// Set by `@private` or `@api private`
    pub is_private: bool,
    /// Set for `/*!` blocks
    pub ignore: bool,
    /// Source lines following the comment, trimmed
    pub code: String,
    pub ctx: Option<CodeContext>,
    /// 1-based line of the comment opener
    pub line: usize,
    /// Source file the comment came from (attached by the pipeline)
    pub file: String,
}

/// Comment text preceding the first tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    pub full: String,
    /// First paragraph
    pub summary: String,
    /// Remaining paragraphs
    pub body: String,
}

/// The code construct a comment documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeContext {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Signature-like rendering, e.g. `Circle.prototype.area()`
    pub string: String,
}

/// One annotation inside a comment.
///
/// Attributes depend on the tag kind; `type` is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(Map<String, Value>);

impl Tag {
    /// Create a tag of the given kind with its raw text.
    pub fn new(kind: &str, string: &str) -> Self {
        Tag::default().with("type", kind).with("string", string)
    }

    /// Builder-style attribute setter.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `type` discriminator (`param`, `return`, ...).
    pub fn kind(&self) -> &str {
        self.0.get("type").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Tag {
    fn from(map: Map<String, Value>) -> Self {
        Tag(map)
    }
}
