//! Tag and comment queries exposed to templates as `filterTags` and
//! `getCommentsByTag`.
//!
//! A tag matches a [`Filter`] when every key of the filter is present on the
//! tag with an equal value. Values compare with exact JSON equality, so the
//! string `"1"` never matches the number `1`. An empty filter matches every
//! tag.
//!
//! Both queries are generic over [`Attributes`] and [`Tagged`] so the same
//! code runs over the typed model and over the raw JSON values an engine
//! hands back to a helper.

use crate::model::{Comment, Tag};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Anything with named attributes a filter can be matched against.
pub trait Attributes {
    fn attribute(&self, key: &str) -> Option<&Value>;
}

impl Attributes for Tag {
    fn attribute(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl Attributes for Value {
    fn attribute(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

/// Anything carrying an ordered tag list.
pub trait Tagged {
    type Tag: Attributes;

    fn tags(&self) -> &[Self::Tag];
}

impl Tagged for Comment {
    type Tag = Tag;

    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

impl Tagged for Value {
    type Tag = Value;

    /// The `tags` array of a JSON comment; anything else has no tags.
    fn tags(&self) -> &[Value] {
        self.get("tags")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Attribute name → expected value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(BTreeMap<String, Value>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style key insertion.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Build a filter from a JSON object. `null` yields the empty filter.
    pub fn from_value(value: &Value) -> Result<Self, QueryError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(map
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()),
            other => Err(QueryError::InvalidFilter(json_kind(other))),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Filter(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Bad arguments passed to a query from a template.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum QueryError {
    #[error("filter must be an object, got {0}")]
    InvalidFilter(&'static str),
    #[error("{what} must be an array, got {got}")]
    ExpectedArray { what: &'static str, got: &'static str },
    #[error("`{0}` cannot be combined with keyword filters")]
    ConflictingFilter(&'static str),
}

/// True when every key of `filter` is present on `tag` with an equal value.
pub fn matches<T: Attributes + ?Sized>(tag: &T, filter: &Filter) -> bool {
    filter
        .iter()
        .all(|(key, expected)| tag.attribute(key) == Some(expected))
}

/// Tags satisfying `filter`, in their original order.
pub fn filter_tags<'a, T: Attributes>(tags: &'a [T], filter: &Filter) -> Vec<&'a T> {
    tags.iter().filter(|tag| matches(*tag, filter)).collect()
}

/// Comments with at least one tag satisfying `filter`, in their original order.
///
/// A comment without tags is never returned, not even for the empty filter.
pub fn get_comments_by_tag<'a, C: Tagged>(comments: &'a [C], filter: &Filter) -> Vec<&'a C> {
    comments
        .iter()
        .filter(|comment| {
            let tags = comment.tags();
            !tags.is_empty() && tags.iter().any(|tag| matches(tag, filter))
        })
        .collect()
}

/// [`filter_tags`] over a JSON array, as called from a template.
pub fn filter_tag_values(tags: &Value, filter: &Filter) -> Result<Value, QueryError> {
    let tags = expect_array("tags", tags)?;
    Ok(Value::Array(
        filter_tags(tags, filter).into_iter().cloned().collect(),
    ))
}

/// [`get_comments_by_tag`] over a JSON array, as called from a template.
pub fn comment_values_by_tag(comments: &Value, filter: &Filter) -> Result<Value, QueryError> {
    let comments = expect_array("comments", comments)?;
    Ok(Value::Array(
        get_comments_by_tag(comments, filter)
            .into_iter()
            .cloned()
            .collect(),
    ))
}

fn expect_array<'a>(what: &'static str, value: &'a Value) -> Result<&'a [Value], QueryError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(&[]),
        other => Err(QueryError::ExpectedArray {
            what,
            got: json_kind(other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
