//! `@tag` parsing. Each tag kind gets its own attribute shape; unknown kinds
//! keep only `type` and `string`.

use super::describe;
use crate::model::Tag;

/// Parse one tag from its name (without `@`) and the text following it.
pub fn parse(kind: &str, text: &str) -> Tag {
    let tag = Tag::new(kind, text);
    match kind {
        "param" | "property" | "prop" | "template" => {
            let (mut types, rest) = split_types(text);
            let (name, description) = split_word(rest);
            let mut optional = false;
            if let Some(last) = types.last_mut() {
                if let Some(stripped) = last.strip_suffix('=') {
                    *last = stripped.to_string();
                    optional = true;
                }
            }
            let name = match name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
                Some(inner) => {
                    optional = true;
                    // [name=default]
                    inner.split('=').next().unwrap_or(inner)
                }
                None => name,
            };
            tag.with("types", types)
                .with("name", name)
                .with("description", description)
                .with("optional", optional)
        }
        "return" | "returns" | "throws" => {
            let (types, description) = split_types(text);
            tag.with("types", types).with("description", description)
        }
        "type" => tag.with("types", split_types(text).0),
        "see" => {
            let (target, title) = split_word(text);
            let key = if target.starts_with("http://") || target.starts_with("https://") {
                "url"
            } else {
                "local"
            };
            tag.with(key, target).with("title", title)
        }
        "api" => tag.with("visibility", split_word(text).0),
        "memberOf" | "memberof" | "lends" => tag.with("parent", split_word(text).0),
        "extends" | "implements" | "augments" => tag.with("otherClass", split_word(text).0),
        "borrows" => {
            let mut words = text.split_whitespace();
            let other = words.next().unwrap_or_default();
            let this = match words.next() {
                Some("as") => words.next().unwrap_or_default(),
                Some(word) => word,
                None => "",
            };
            tag.with("otherMemberName", other)
                .with("thisMemberName", this)
        }
        "description" => {
            let description = describe(text);
            tag.with("full", description.full)
                .with("summary", description.summary)
                .with("body", description.body)
        }
        _ => tag,
    }
}

/// Split a leading `{A|B}` type expression off `text`.
fn split_types(text: &str) -> (Vec<String>, &str) {
    let text = text.trim_start();
    if !text.starts_with('{') {
        return (Vec::new(), text);
    }

    let mut depth = 0usize;
    for (pos, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let types = text[1..pos]
                        .split('|')
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty())
                        .collect();
                    return (types, text[pos + 1..].trim_start());
                }
            }
            _ => {}
        }
    }

    // Unbalanced braces: treat as plain text
    (Vec::new(), text)
}

/// First whitespace-delimited word and the trimmed remainder.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.find(char::is_whitespace) {
        Some(pos) => (&text[..pos], text[pos..].trim_start()),
        None => (text, ""),
    }
}
