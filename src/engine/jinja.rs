//! MiniJinja engine (`.j2`, `.jinja`, `.jinja2`). Helpers are positional and
//! take the filter as a map literal:
//!
//! ```text
//! {% for c in getCommentsByTag(comments, {"type": "function"}) %}
//! ```

use crate::context::{Helper, RenderContext};
use crate::engine::{Engine, Template};
use crate::error::{Error, Result};
use crate::query::Filter;
use minijinja::{context, Environment, ErrorKind, Value};

pub struct JinjaEngine;

impl Engine for JinjaEngine {
    fn name(&self) -> &str {
        "minijinja"
    }

    fn extensions(&self) -> &[&str] {
        &["j2", "jinja", "jinja2"]
    }

    fn render(&self, template: &Template, ctx: &RenderContext) -> Result<String> {
        let mut env = Environment::new();
        for helper in Helper::ALL {
            env.add_function(helper.name(), move |input: Value, filter: Option<Value>| {
                call_helper(helper, &input, filter.as_ref())
            });
        }

        let tmpl = env
            .template_from_named_str(&template.name, &template.source)
            .map_err(|e| Error::render(self.name(), &e))?;
        tmpl.render(context! { comments => Value::from_serialize(&ctx.comments) })
            .map_err(|e| Error::render(self.name(), &e))
    }
}

fn call_helper(
    helper: Helper,
    input: &Value,
    filter: Option<&Value>,
) -> std::result::Result<Value, minijinja::Error> {
    let input = to_json(input)?;
    let filter = match filter {
        Some(filter) => Filter::from_value(&to_json(filter)?),
        None => Ok(Filter::new()),
    };
    let result = filter
        .and_then(|filter| helper.call(&input, &filter))
        .map_err(|e| {
            minijinja::Error::new(ErrorKind::InvalidOperation, format!("{}: {}", helper.name(), e))
        })?;
    Ok(Value::from_serialize(&result))
}

fn to_json(value: &Value) -> std::result::Result<serde_json::Value, minijinja::Error> {
    serde_json::to_value(value).map_err(|e| {
        minijinja::Error::new(ErrorKind::BadSerialization, "template value is not serializable")
            .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::parse_comments;

    const SOURCE: &str = r#"/**
 * Area of a circle.
 * @function
 * @param {number} r Radius.
 * @param {string} [unit] Unit label.
 */
function area(r, unit) {}

/**
 * No tags here.
 */
var RADIUS = 1;
"#;

    fn render(source: &str) -> Result<String> {
        let ctx = RenderContext::new(parse_comments(SOURCE).unwrap());
        let template = Template {
            name: "index.txt.j2".into(),
            source: source.into(),
        };
        JinjaEngine.render(&template, &ctx)
    }

    #[test]
    fn renders_comments_with_helpers() {
        let out = render(concat!(
            "{% for c in getCommentsByTag(comments, {\"type\": \"function\"}) %}",
            "<h2>{{ c.ctx.name }}</h2>",
            "{% for p in filterTags(c.tags, {\"type\": \"param\"}) %}[{{ p.name }}]{% endfor %}",
            "{% endfor %}"
        ))
        .unwrap();
        assert_eq!(out, "<h2>area</h2>[r][unit]");
    }

    #[test]
    fn multi_key_filter_and_booleans() {
        let out = render(concat!(
            "{% for p in filterTags(comments[0].tags, {\"type\": \"param\", \"optional\": true}) %}",
            "{{ p.name }}",
            "{% endfor %}"
        ))
        .unwrap();
        assert_eq!(out, "unit");
    }

    #[test]
    fn filter_argument_is_optional() {
        let out = render("{{ getCommentsByTag(comments) | length }}/{{ comments | length }}").unwrap();
        assert_eq!(out, "1/2");
    }

    #[test]
    fn non_map_filter_is_a_render_error() {
        let err = render("{{ filterTags(comments[0].tags, \"param\") }}").unwrap_err();
        match err {
            Error::Render { engine, message } => {
                assert_eq!(engine, "minijinja");
                assert!(message.contains("filter must be an object"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
