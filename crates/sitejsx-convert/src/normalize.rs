//! Tag-by-tag cleanup for JSX fragments that did not come through the
//! converter, e.g. markup rewritten upstream before it reached us.

use std::sync::LazyLock;

use regex::Regex;

use crate::attributes::{event_handler, jsx_attribute_name, JsxValue};
use crate::names::{event_prop_name, is_boolean_attribute, is_event_attribute};

static TAG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][\w.:-]*").expect("Invalid tag name regex"));

static ATTRIBUTE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^\s"'<>/={}]+"#).expect("Invalid attribute name regex")
});

/// An attribute value exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RawValue {
    /// Inner text of `"..."` or `'...'`
    Quoted(String),
    /// `{...}` including the braces
    Expression(String),
    Bare(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RawAttribute {
    name: String,
    value: Option<RawValue>,
}

#[derive(Debug)]
struct StartTag {
    name: String,
    attributes: Vec<RawAttribute>,
    self_closing: bool,
    /// Bytes consumed from the input, `<` through `>`
    len: usize,
}

/// Rewrite leftover HTML attribute spellings in every start tag.
///
/// `class` becomes `className`, inline `on*` handlers become arrow
/// functions, hyphenated names are camel-cased (`data-*` and `aria-*`
/// excepted) and `"true"`/`"false"` on boolean attributes become
/// expressions. Text and close tags are copied through untouched.
pub fn normalize_jsx(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match scan_start_tag(rest) {
            Some(tag) => {
                render_tag(&mut out, &tag);
                rest = &rest[tag.len..];
            }
            None => {
                out.push('<');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn render_tag(out: &mut String, tag: &StartTag) {
    out.push('<');
    out.push_str(&tag.name);

    for attribute in &tag.attributes {
        let (name, value) = rewrite_attribute(attribute);
        out.push(' ');
        out.push_str(&name);
        match value {
            // Single-quoted source values may hold double quotes.
            Some(RawValue::Quoted(text) | RawValue::Bare(text)) => {
                out.push_str("=\"");
                out.push_str(&text.replace('"', "&quot;"));
                out.push('"');
            }
            Some(RawValue::Expression(expr)) => {
                out.push('=');
                out.push_str(&expr);
            }
            None => {}
        }
    }

    out.push_str(if tag.self_closing { " />" } else { ">" });
}

fn rewrite_attribute(attribute: &RawAttribute) -> (String, Option<RawValue>) {
    let name = attribute.name.as_str();
    let lower = name.to_ascii_lowercase();

    let literal = match &attribute.value {
        Some(RawValue::Quoted(text) | RawValue::Bare(text)) => Some(text.as_str()),
        _ => None,
    };

    if lower == "class" {
        return ("className".to_string(), attribute.value.clone());
    }

    if let Some(script) = literal.filter(|_| is_event_attribute(name)) {
        let handler = match event_handler(script) {
            JsxValue::Expression(expr) => RawValue::Expression(format!("{{{expr}}}")),
            JsxValue::Literal(text) => RawValue::Quoted(text),
        };
        return (event_prop_name(name), Some(handler));
    }

    let renamed = if name.contains('-') && !lower.starts_with("data-") && !lower.starts_with("aria-")
    {
        jsx_attribute_name(&lower)
    } else {
        name.to_string()
    };

    let value = match literal {
        Some(text) if is_boolean_attribute(&lower) && matches!(text, "true" | "false") => {
            Some(RawValue::Expression(format!("{{{text}}}")))
        }
        _ => attribute.value.clone(),
    };

    (renamed, value)
}

/// Parse a start tag at the beginning of `input`. `None` when `input` does
/// not begin with one (close tags, fragments, stray `<`).
fn scan_start_tag(input: &str) -> Option<StartTag> {
    let after_lt = input.strip_prefix('<')?;
    let name = TAG_NAME_RE.find(after_lt)?.as_str();
    let mut pos = 1 + name.len();
    let mut attributes = Vec::new();

    loop {
        pos += leading_whitespace(&input[pos..]);
        let rest = &input[pos..];

        if rest.starts_with("/>") {
            return Some(StartTag {
                name: name.to_string(),
                attributes,
                self_closing: true,
                len: pos + 2,
            });
        }
        if rest.starts_with('>') {
            return Some(StartTag {
                name: name.to_string(),
                attributes,
                self_closing: false,
                len: pos + 1,
            });
        }

        let attribute_name = ATTRIBUTE_NAME_RE.find(rest)?.as_str();
        pos += attribute_name.len();

        let ws = leading_whitespace(&input[pos..]);
        let value = if input[pos + ws..].starts_with('=') {
            pos += ws + 1;
            pos += leading_whitespace(&input[pos..]);
            let (value, consumed) = scan_value(&input[pos..])?;
            pos += consumed;
            Some(value)
        } else {
            None
        };

        attributes.push(RawAttribute {
            name: attribute_name.to_string(),
            value,
        });
    }
}

fn scan_value(input: &str) -> Option<(RawValue, usize)> {
    let first = input.chars().next()?;
    match first {
        '"' | '\'' => {
            let end = input[1..].find(first)?;
            Some((RawValue::Quoted(input[1..1 + end].to_string()), end + 2))
        }
        '{' => {
            let len = balanced_expression_len(input)?;
            Some((RawValue::Expression(input[..len].to_string()), len))
        }
        _ => {
            let end = input
                .find(|c: char| c.is_whitespace() || c == '>')
                .unwrap_or(input.len());
            let end = if input[..end].ends_with('/') && input[end..].starts_with('>') {
                end - 1
            } else {
                end
            };
            (end > 0).then(|| (RawValue::Bare(input[..end].to_string()), end))
        }
    }
}

/// Length of a `{...}` expression, skipping braces inside string literals.
fn balanced_expression_len(input: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

fn leading_whitespace(input: &str) -> usize {
    input.len() - input.trim_start().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renames_class_and_camel_cases() {
        assert_eq!(
            normalize_jsx(r#"<div class="a" stroke-width="2" data-x="1" aria-hidden="true">x</div>"#),
            r#"<div className="a" strokeWidth="2" data-x="1" aria-hidden="true">x</div>"#
        );
    }

    #[test]
    fn converts_inline_handlers() {
        assert_eq!(
            normalize_jsx(r#"<button onclick="go()">Go</button>"#),
            "<button onClick={() => { go()\n}}>Go</button>"
        );
    }

    #[test]
    fn requotes_single_quoted_values_safely() {
        assert_eq!(
            normalize_jsx(r#"<p title='say "hi"' class='a'>x</p>"#),
            r#"<p title="say &quot;hi&quot;" className="a">x</p>"#
        );
    }

    #[test]
    fn coerces_quoted_booleans() {
        assert_eq!(
            normalize_jsx(r#"<input disabled="true" checked="false" value="true" />"#),
            r#"<input disabled={true} checked={false} value="true" />"#
        );
    }

    #[test]
    fn leaves_expressions_and_text_alone() {
        let source = r#"<><div style={{ content: '>' }} onClick={() => { a("class=\"x\"") }}>a &lt; b</div><br /></>"#;

        assert_eq!(normalize_jsx(source), source);
    }

    #[test]
    fn is_idempotent_on_converter_output() {
        let jsx = crate::convert_html_to_jsx(
            r#"<body class="app"><input type="checkbox" checked><svg viewBox="0 0 1 1"><path stroke-width="1"/></svg></body>"#,
            &crate::AssetMap::new(),
        )
        .jsx;

        assert_eq!(normalize_jsx(&jsx), jsx);
    }

    #[test]
    fn passes_through_unterminated_markup() {
        assert_eq!(normalize_jsx("<div class=\"a"), "<div class=\"a");
    }
}
