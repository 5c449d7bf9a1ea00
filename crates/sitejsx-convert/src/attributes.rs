//! HTML attribute map to JSX attribute string conversion.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::{AssetMap, ConvertOptions};
use crate::images::{resolve_image, ImageRef};
use crate::names::{
    camel_case, event_prop_name, is_boolean_attribute, is_event_attribute, known_rename,
    namespaced_name,
};
use crate::style::decompose_style;
use crate::tables::SideTables;

/// A JSX attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsxValue {
    /// Emitted as `name="..."`
    Literal(String),
    /// Emitted as `name={...}`
    Expression(String),
}

impl JsxValue {
    pub(crate) fn render(&self, name: &str) -> String {
        match self {
            JsxValue::Literal(value) => format!(r#" {name}="{}""#, quote_attribute(value)),
            JsxValue::Expression(expr) => format!(" {name}={{{expr}}}"),
        }
    }
}

/// Converts raw attribute maps for one document.
pub struct AttributeTransformer<'a> {
    pub assets: &'a AssetMap,
    pub options: &'a ConvertOptions,
}

impl AttributeTransformer<'_> {
    /// Convert the attributes of `tag` into a JSX attribute string.
    ///
    /// The result is empty or starts with a space. Image imports and custom
    /// property classes are recorded in `tables`.
    pub fn transform(
        &self,
        tag: &str,
        attrs: &[(String, String)],
        tables: &mut SideTables,
    ) -> String {
        let mut out = String::new();
        let mut classes: Vec<String> = Vec::new();

        for (raw_name, value) in attrs {
            let name = raw_name.to_ascii_lowercase();
            let boolean = is_boolean_attribute(&name);

            if is_absent(value, boolean) {
                continue;
            }

            if name == "class" || name == "classname" {
                push_classes(&mut classes, value);
                continue;
            }

            if name == "style" {
                let style = decompose_style(value);
                if let Some(object) = style.to_object_literal() {
                    out.push_str(&JsxValue::Expression(object).render("style"));
                }
                if !style.custom_properties.is_empty() {
                    let class_name = tables
                        .css_vars
                        .mint(&self.options.custom_var_prefix, style.custom_properties);
                    push_classes(&mut classes, &class_name);
                }
                continue;
            }

            if is_event_attribute(&name) {
                let handler = event_handler(value);
                out.push_str(&handler.render(&event_prop_name(&name)));
                continue;
            }

            let prop = jsx_attribute_name(&name);
            if !is_valid_jsx_name(&prop) {
                tracing::debug!(%tag, attribute = %raw_name, "dropping attribute with no JSX spelling");
                continue;
            }

            let jsx_value = if name.starts_with("data-") {
                data_value(value)
            } else if is_image_attribute(tag, &name) {
                match resolve_image(
                    value,
                    self.assets,
                    &self.options.images_dir,
                    &mut tables.images,
                ) {
                    ImageRef::Import(identifier) => JsxValue::Expression(identifier),
                    ImageRef::Path(path) => JsxValue::Literal(path),
                    ImageRef::Unchanged => JsxValue::Literal(value.clone()),
                }
            } else if let Some(expr) = expression_body(value) {
                JsxValue::Expression(expr.to_string())
            } else if boolean {
                boolean_value(&name, value)
            } else {
                JsxValue::Literal(value.clone())
            };

            out.push_str(&jsx_value.render(&prop));
        }

        if !classes.is_empty() {
            out.push_str(&JsxValue::Literal(classes.join(" ")).render("className"));
        }

        out
    }
}

/// Values that count as "attribute not present".
fn is_absent(value: &str, boolean: bool) -> bool {
    matches!(value.trim(), "{}" | "[]" | "null") || (value.is_empty() && !boolean)
}

fn push_classes(classes: &mut Vec<String>, value: &str) {
    for class in value.split_whitespace() {
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }
}

/// React prop name for a non-event, non-class, non-style attribute.
pub fn jsx_attribute_name(name: &str) -> String {
    if let Some(renamed) = known_rename(name) {
        return renamed.to_string();
    }
    if name.starts_with("data-") || name.starts_with("aria-") {
        return name.to_string();
    }
    if name.contains(':') {
        return namespaced_name(name);
    }
    if name.contains('-') {
        return camel_case(name);
    }
    name.to_string()
}

fn is_valid_jsx_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '$'))
}

fn is_image_attribute(tag: &str, name: &str) -> bool {
    name == "src" || (name == "poster" && tag == "video")
}

/// Wrap an inline script in a no-argument arrow function.
pub(crate) fn event_handler(script: &str) -> JsxValue {
    let script = script.trim();
    let script = script
        .strip_prefix("javascript:")
        .unwrap_or(script)
        .trim();
    // The script may end in a `//` comment.
    JsxValue::Expression(format!("() => {{ {script}\n}}"))
}

/// `data-*` values that hold JSON objects or arrays are normalized.
fn data_value(value: &str) -> JsxValue {
    match serde_json::from_str::<serde_json::Value>(value) {
        Ok(json) if json.is_object() || json.is_array() => {
            JsxValue::Literal(json.to_string())
        }
        _ => JsxValue::Literal(value.to_string()),
    }
}

/// The inside of a value already written as a JSX expression, `{...}`.
///
/// Only identifiers, member paths and literals qualify; anything else could
/// be a statement or an object body and is kept as a string.
fn expression_body(value: &str) -> Option<&str> {
    let inner = value.trim().strip_prefix('{')?.strip_suffix('}')?.trim();
    SIMPLE_EXPRESSION_RE.is_match(inner).then_some(inner)
}

static SIMPLE_EXPRESSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*|-?\d+(?:\.\d+)?)$")
        .expect("Invalid simple expression regex")
});

/// Coerce HTML boolean idioms; anything else stays a string.
pub fn boolean_value(name: &str, value: &str) -> JsxValue {
    let normalized = value.trim().to_ascii_lowercase();
    if normalized.is_empty() || normalized == name || normalized == "true" {
        JsxValue::Expression("true".to_string())
    } else if normalized == "false" {
        JsxValue::Expression("false".to_string())
    } else {
        JsxValue::Literal(value.to_string())
    }
}

fn quote_attribute(value: &str) -> String {
    value.replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn run(tag: &str, pairs: &[(&str, &str)]) -> (String, SideTables) {
        let assets: AssetMap = [("/front/assets/logo-abc.png", "_logo_abc.png")]
            .into_iter()
            .collect();
        let options = ConvertOptions::default();
        let transformer = AttributeTransformer {
            assets: &assets,
            options: &options,
        };
        let mut tables = SideTables::default();
        let out = transformer.transform(tag, &attrs(pairs), &mut tables);
        (out, tables)
    }

    #[test]
    fn coerces_boolean_attributes() {
        assert_eq!(run("input", &[("disabled", "")]).0, " disabled={true}");
        assert_eq!(run("input", &[("disabled", "false")]).0, " disabled={false}");
        assert_eq!(run("input", &[("checked", "checked")]).0, " checked={true}");
        assert_eq!(run("input", &[("readonly", "TRUE")]).0, " readOnly={true}");
        assert_eq!(run("input", &[("hidden", "until-found")]).0, r#" hidden="until-found""#);
    }

    #[test]
    fn skips_absent_values() {
        let (out, _) = run(
            "div",
            &[("id", ""), ("title", "null"), ("data-a", "{}"), ("data-b", "[]")],
        );
        assert_eq!(out, "");
    }

    #[test]
    fn merges_class_with_custom_var_class() {
        let (out, tables) = run("div", &[("class", "a b"), ("style", "--accent: #f00")]);

        assert_eq!(out, r#" className="a b custom-var-1""#);
        assert_eq!(
            tables.css_vars.get("custom-var-1"),
            Some(&[("--accent".to_string(), "#f00".to_string())][..])
        );
    }

    #[test]
    fn emits_style_object_before_class_name() {
        let (out, _) = run("div", &[("style", "color:red;--x:1px")]);

        assert_eq!(out, r#" style={{ color: 'red' }} className="custom-var-1""#);
    }

    #[test]
    fn renames_and_camel_cases() {
        let (out, _) = run(
            "label",
            &[
                ("for", "email"),
                ("tabindex", "0"),
                ("accept-charset", "utf-8"),
                ("aria-label", "Email"),
                ("some-thing", "x"),
            ],
        );

        assert_eq!(
            out,
            r#" htmlFor="email" tabIndex="0" acceptCharset="utf-8" aria-label="Email" someThing="x""#
        );
    }

    #[test]
    fn converts_svg_attributes() {
        let (out, _) = run(
            "svg",
            &[
                ("viewbox", "0 0 24 24"),
                ("xmlns:xlink", "http://www.w3.org/1999/xlink"),
                ("stroke-width", "2"),
                ("xlink:href", "#icon"),
                ("sodipodi:docname", "x.svg"),
            ],
        );

        assert_eq!(
            out,
            r##" viewBox="0 0 24 24" xmlnsXlink="http://www.w3.org/1999/xlink" strokeWidth="2" xlinkHref="#icon" sodipodiDocname="x.svg""##
        );
    }

    #[test]
    fn wraps_event_handlers_in_arrow_functions() {
        let (out, _) = run(
            "button",
            &[("onclick", "toggle(this); return false;"), ("onmouseover", "javascript:hover()")],
        );

        assert_eq!(
            out,
            " onClick={() => { toggle(this); return false;\n}} onMouseOver={() => { hover()\n}}"
        );
    }

    #[test]
    fn handler_ending_in_line_comment_stays_closed() {
        let (out, _) = run("a", &[("onclick", "track(); // analytics")]);

        assert_eq!(out, " onClick={() => { track(); // analytics\n}}");
    }

    #[test]
    fn normalizes_json_data_attributes() {
        let (out, _) = run(
            "div",
            &[("data-config", r#"{ "a": 1, "b": [true] }"#), ("data-id", "007"), ("data-q", r#"say "hi""#)],
        );

        assert_eq!(
            out,
            r#" data-config="{&quot;a&quot;:1,&quot;b&quot;:[true]}" data-id="007" data-q="say &quot;hi&quot;""#
        );
    }

    #[test]
    fn rewrites_image_sources() {
        let (out, tables) = run("img", &[("src", "/front/assets/logo-abc.png"), ("alt", "Logo")]);

        assert_eq!(out, r#" src={logoAbc} alt="Logo""#);
        assert_eq!(tables.images.get("_logo_abc.png"), Some("logoAbc"));
    }

    #[test]
    fn keeps_expression_shaped_values() {
        let (out, _) = run("div", &[("title", "{props.title}"), ("label", "{oops")]);

        assert_eq!(out, r#" title={props.title} label="{oops""#);

        let (out, _) = run("div", &[("data-n", "{count}"), ("x-data", "{ open: false }")]);
        assert_eq!(out, r#" data-n="{count}" xData="{ open: false }""#);
    }

    #[test]
    fn drops_attributes_without_jsx_spelling() {
        let (out, _) = run("div", &[("@click", "go()"), (":class", "c"), ("id", "main")]);

        assert_eq!(out, r#" id="main""#);
    }
}
