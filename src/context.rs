//! Render context handed to an engine, and the query helpers every engine
//! binds into its templates.

use crate::model::Comment;
use crate::query::{self, Filter, QueryError};
use serde::Serialize;
use serde_json::Value;

/// Everything a template can see. Built fresh for each render.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderContext {
    pub comments: Vec<Comment>,
}

impl RenderContext {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self { comments }
    }
}

/// A query operation callable from templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Helper {
    GetCommentsByTag,
    FilterTags,
}

impl Helper {
    pub const ALL: [Helper; 2] = [Helper::GetCommentsByTag, Helper::FilterTags];

    /// Name the helper is bound under in templates.
    pub fn name(self) -> &'static str {
        match self {
            Helper::GetCommentsByTag => "getCommentsByTag",
            Helper::FilterTags => "filterTags",
        }
    }

    /// Name of the collection argument, for engines with keyword arguments.
    pub fn input_arg(self) -> &'static str {
        match self {
            Helper::GetCommentsByTag => "comments",
            Helper::FilterTags => "tags",
        }
    }

    /// Run the query over template values.
    pub fn call(self, input: &Value, filter: &Filter) -> Result<Value, QueryError> {
        match self {
            Helper::GetCommentsByTag => query::comment_values_by_tag(input, filter),
            Helper::FilterTags => query::filter_tag_values(input, filter),
        }
    }
}
