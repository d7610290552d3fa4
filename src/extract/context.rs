//! Code context: what construct the line after a doc comment declares.
//!
//! Patterns are tried in order; the first match wins. Prototype patterns
//! come before the generic receiver patterns they would otherwise shadow.

use crate::model::CodeContext;
use regex::Regex;
use std::sync::LazyLock;

static RE_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*([\w$]+)\s*\(")
        .unwrap()
});

static RE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:export\s+)?(?:default\s+)?class\s+([\w$]+)(?:\s+extends\s+([\w$.]+))?")
        .unwrap()
});

static RE_PROTO_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w$]+)\.prototype\.([\w$]+)\s*=\s*(?:async\s+)?function\b").unwrap()
});

static RE_PROTO_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w$]+)\.prototype\.([\w$]+)\s*=\s*([^;]+)").unwrap());

static RE_PROTOTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w$]+)\.prototype\s*=\s*\{").unwrap());

static RE_RECEIVER_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w$.]+)\.([\w$]+)\s*=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*=>|[\w$]+\s*=>)")
        .unwrap()
});

static RE_RECEIVER_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w$.]+)\.([\w$]+)\s*=\s*([^;]+)").unwrap());

static RE_VAR_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:export\s+)?(?:var|let|const)\s+([\w$]+)\s*=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*=>|[\w$]+\s*=>)")
        .unwrap()
});

static RE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:export\s+)?(?:var|let|const)\s+([\w$]+)\s*=\s*([^;]+)").unwrap()
});

static RE_MEMBER_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w$]+)\s*:\s*(?:async\s+)?function\b").unwrap());

static RE_SHORTHAND_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:static\s+)?(?:async\s+)?([\w$]+)\s*\([^)]*\)\s*\{").unwrap()
});

static RE_MEMBER_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w$]+)\s*:\s*([^,]+)").unwrap());

/// Words that look like shorthand methods but open control flow.
const KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "function", "with"];

/// Match one line of code into a context, if it declares anything.
pub fn parse(line: &str) -> Option<CodeContext> {
    let line = line.trim();

    if let Some(caps) = RE_FUNCTION.captures(line) {
        return Some(named("function", &caps[1], format!("{}()", &caps[1])));
    }
    if let Some(caps) = RE_CLASS.captures(line) {
        let mut ctx = named("class", &caps[1], format!("new {}()", &caps[1]));
        ctx.value = caps.get(2).map(|m| m.as_str().to_string());
        return Some(ctx);
    }
    if let Some(caps) = RE_PROTO_METHOD.captures(line) {
        return Some(CodeContext {
            constructor: Some(caps[1].to_string()),
            ..named(
                "method",
                &caps[2],
                format!("{}.prototype.{}()", &caps[1], &caps[2]),
            )
        });
    }
    if let Some(caps) = RE_PROTO_PROPERTY.captures(line) {
        return Some(CodeContext {
            constructor: Some(caps[1].to_string()),
            value: Some(caps[3].trim().to_string()),
            ..named(
                "property",
                &caps[2],
                format!("{}.prototype.{}", &caps[1], &caps[2]),
            )
        });
    }
    if let Some(caps) = RE_PROTOTYPE.captures(line) {
        return Some(CodeContext {
            constructor: Some(caps[1].to_string()),
            ..named("prototype", &caps[1], format!("{}.prototype", &caps[1]))
        });
    }
    if let Some(caps) = RE_RECEIVER_METHOD.captures(line) {
        return Some(CodeContext {
            receiver: Some(caps[1].to_string()),
            ..named("method", &caps[2], format!("{}.{}()", &caps[1], &caps[2]))
        });
    }
    if let Some(caps) = RE_RECEIVER_PROPERTY.captures(line) {
        return Some(CodeContext {
            receiver: Some(caps[1].to_string()),
            value: Some(caps[3].trim().to_string()),
            ..named("property", &caps[2], format!("{}.{}", &caps[1], &caps[2]))
        });
    }
    if let Some(caps) = RE_VAR_FUNCTION.captures(line) {
        return Some(named("function", &caps[1], format!("{}()", &caps[1])));
    }
    if let Some(caps) = RE_DECLARATION.captures(line) {
        return Some(CodeContext {
            value: Some(caps[2].trim().to_string()),
            ..named("declaration", &caps[1], caps[1].to_string())
        });
    }
    if let Some(caps) = RE_MEMBER_FUNCTION.captures(line) {
        return Some(named("method", &caps[1], format!("{}()", &caps[1])));
    }
    if let Some(caps) = RE_SHORTHAND_METHOD.captures(line) {
        if !KEYWORDS.contains(&&caps[1]) {
            return Some(named("method", &caps[1], format!("{}()", &caps[1])));
        }
        return None;
    }
    if let Some(caps) = RE_MEMBER_PROPERTY.captures(line) {
        return Some(CodeContext {
            value: Some(caps[2].trim().to_string()),
            ..named("property", &caps[1], caps[1].to_string())
        });
    }

    None
}

fn named(kind: &str, name: &str, string: String) -> CodeContext {
    CodeContext {
        kind: kind.to_string(),
        name: name.to_string(),
        string,
        ..Default::default()
    }
}
