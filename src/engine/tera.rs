//! Tera engine (`.tera`). Helpers take keyword arguments:
//!
//! ```text
//! {% set fns = getCommentsByTag(comments=comments, type="function") %}
//! {% set params = filterTags(tags=c.tags, type="param") %}
//! ```
//!
//! Every keyword other than the collection becomes a filter key. A
//! `filter_by=` argument holding an object is the whole filter instead, and
//! passing it together with other filter keywords is an error.

use crate::context::{Helper, RenderContext};
use crate::engine::{Engine, Template};
use crate::error::{Error, Result};
use crate::query::{Filter, QueryError};
use ::tera::{Context, Tera, Value};
use std::collections::HashMap;

/// Keyword carrying a whole filter object.
const FILTER_ARG: &str = "filter_by";

pub struct TeraEngine;

impl Engine for TeraEngine {
    fn name(&self) -> &str {
        "tera"
    }

    fn extensions(&self) -> &[&str] {
        &["tera"]
    }

    fn render(&self, template: &Template, ctx: &RenderContext) -> Result<String> {
        let mut tera = Tera::default();
        for helper in Helper::ALL {
            tera.register_function(helper.name(), helper_function(helper));
        }
        tera.add_raw_template(&template.name, &template.source)
            .map_err(|e| Error::render(self.name(), &e))?;

        let mut context = Context::new();
        context.insert("comments", &ctx.comments);

        tera.render(&template.name, &context)
            .map_err(|e| Error::render(self.name(), &e))
    }
}

fn helper_function(helper: Helper) -> impl ::tera::Function {
    move |args: &HashMap<String, Value>| -> ::tera::Result<Value> {
        let input = args.get(helper.input_arg()).ok_or_else(|| {
            ::tera::Error::msg(format!(
                "{}: missing `{}` argument",
                helper.name(),
                helper.input_arg()
            ))
        })?;
        keyword_filter(helper, args)
            .and_then(|filter| helper.call(input, &filter))
            .map_err(|e| ::tera::Error::msg(format!("{}: {}", helper.name(), e)))
    }
}

fn keyword_filter(helper: Helper, args: &HashMap<String, Value>) -> Result<Filter, QueryError> {
    if let Some(filter) = args.get(FILTER_ARG) {
        if args
            .keys()
            .any(|key| key != FILTER_ARG && key != helper.input_arg())
        {
            return Err(QueryError::ConflictingFilter(FILTER_ARG));
        }
        return Filter::from_value(filter);
    }
    Ok(args
        .iter()
        .filter(|(key, _)| key.as_str() != helper.input_arg())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect())
}
