//! Comment extractor: JavaScript doc comments into the [`Comment`] model.
//!
//! Line-oriented scan. A block starts on a line whose first non-blank text
//! is `/**` (or `/*!`, collected with `ignore` set) and ends at the next
//! `*/`. The code after a block becomes `Comment::code`: the rest of the
//! closing line, then whole lines until the next doc comment or the first
//! blank line after code. Its first line is matched into a [`CodeContext`].
//!
//! Descriptions are markdown and are stored rendered to HTML.
//!
//! [`CodeContext`]: crate::model::CodeContext

pub mod context;
pub mod tags;

use crate::model::{Comment, Description};
use comrak::{markdown_to_html, Options};
use serde_json::Value;

/// Malformed comment input.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ExtractError {
    #[error("unterminated doc comment starting on line {line}")]
    Unterminated { line: usize },
}

/// Extract every doc comment from `source`, in source order.
pub fn parse_comments(source: &str) -> Result<Vec<Comment>, ExtractError> {
    let lines: Vec<&str> = source.lines().collect();
    let mut comments = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(ignore) = doc_opener(lines[i]) else {
            i += 1;
            continue;
        };

        let start = i;
        let (body, end, rest) = collect_block(&lines, start)?;
        let code = code_after(rest, &lines[end + 1..]);

        let mut comment = parse_body(&body);
        comment.ignore = ignore;
        comment.line = start + 1;
        comment.ctx = code
            .lines()
            .find(|l| !l.trim().is_empty())
            .and_then(context::parse);
        comment.code = code;
        comments.push(comment);

        i = end + 1;
    }

    Ok(comments)
}

/// `Some(ignore)` when the line opens a doc comment.
fn doc_opener(line: &str) -> Option<bool> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("/*!") {
        Some(true)
    } else if trimmed.starts_with("/**")
        && !trimmed.starts_with("/***")
        && !trimmed.starts_with("/**/")
    {
        Some(false)
    } else {
        None
    }
}

/// Gather the cleaned inner lines of the block opening at `start`.
/// Returns the lines, the index of the closing line and whatever follows
/// `*/` on it.
fn collect_block<'a>(
    lines: &[&'a str],
    start: usize,
) -> Result<(Vec<String>, usize, &'a str), ExtractError> {
    let opener = lines[start].trim_start();
    // Both openers are three bytes long
    let first = &opener[3..];

    if let Some(pos) = first.find("*/") {
        return Ok((vec![clean_line(&first[..pos])], start, &first[pos + 2..]));
    }

    let mut body = vec![clean_line(first)];
    for (offset, line) in lines[start + 1..].iter().enumerate() {
        if let Some(pos) = line.find("*/") {
            body.push(clean_line(&line[..pos]));
            return Ok((body, start + 1 + offset, &line[pos + 2..]));
        }
        body.push(clean_line(line));
    }

    Err(ExtractError::Unterminated { line: start + 1 })
}

/// Source documented by a comment: `rest` of the closing line, then the
/// following lines up to the next doc comment or a blank line after code.
/// Blank lines before the first code line are skipped.
fn code_after(rest: &str, lines: &[&str]) -> String {
    let mut code = Vec::new();
    if !rest.trim().is_empty() {
        code.push(rest);
    }

    for &line in lines {
        if doc_opener(line).is_some() {
            break;
        }
        if line.trim().is_empty() {
            if code.is_empty() {
                continue;
            }
            break;
        }
        code.push(line);
    }

    code.join("\n").trim().to_string()
}

/// Strip leading whitespace, one `*` and one following space.
fn clean_line(line: &str) -> String {
    let text = line.trim_start();
    let text = text.strip_prefix('*').unwrap_or(text);
    let text = text.strip_prefix(' ').unwrap_or(text);
    text.trim_end().to_string()
}

/// Split cleaned comment lines into description and tags.
fn parse_body(lines: &[String]) -> Comment {
    let mut description = Vec::new();
    let mut raw_tags: Vec<(String, String)> = Vec::new();

    for line in lines {
        if let Some(rest) = line.strip_prefix('@') {
            let (name, text) = match rest.find(char::is_whitespace) {
                Some(pos) => (&rest[..pos], rest[pos..].trim()),
                None => (rest, ""),
            };
            if !name.is_empty() {
                raw_tags.push((name.to_string(), text.to_string()));
                continue;
            }
        }
        match raw_tags.last_mut() {
            // Continuation of the previous tag
            Some((_, text)) => {
                if !line.is_empty() {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(line);
                }
            }
            None => description.push(line.as_str()),
        }
    }

    let mut comment = Comment {
        description: describe(&description.join("\n")),
        ..Default::default()
    };

    for (name, text) in raw_tags {
        let tag = tags::parse(&name, &text);
        match tag.kind() {
            "private" => comment.is_private = true,
            "api" if tag.get("visibility") == Some(&Value::from("private")) => {
                comment.is_private = true
            }
            "description" => comment.description = describe(&text),
            _ => {}
        }
        comment.tags.push(tag);
    }

    comment
}

/// Split markdown text into the full text, its first paragraph and the
/// rest, each rendered to HTML.
pub(crate) fn describe(text: &str) -> Description {
    // Only blank lines are trimmed; leading spaces can open a code block
    let full = text.trim_matches('\n');
    let (summary, body) = match full.split_once("\n\n") {
        Some((summary, body)) => (summary.trim_matches('\n'), body.trim_matches('\n')),
        None => (full, ""),
    };
    Description {
        full: to_html(full),
        summary: to_html(summary),
        body: to_html(body),
    }
}

fn to_html(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    markdown_to_html(markdown, &options).trim_end().to_string()
}
