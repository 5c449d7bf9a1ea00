//! Inline `style` attribute decomposition.

use crate::names::{camel_case, capitalize};

/// An inline style split into a React style object and CSS custom properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecomposedStyle {
    /// (camelCased property, value) for the style object
    pub properties: Vec<(String, String)>,

    /// (`--name`, value) pairs that must live in a stylesheet
    pub custom_properties: Vec<(String, String)>,
}

impl DecomposedStyle {
    /// Render the JS object literal, e.g. `{ color: 'red' }`.
    pub fn to_object_literal(&self) -> Option<String> {
        if self.properties.is_empty() {
            return None;
        }

        let body = self
            .properties
            .iter()
            .map(|(key, value)| format!("{key}: {}", js_string(value)))
            .collect::<Vec<_>>()
            .join(", ");

        Some(format!("{{ {body} }}"))
    }
}

/// Parse a `prop: value; ...` declaration list.
pub fn decompose_style(raw: &str) -> DecomposedStyle {
    let mut style = DecomposedStyle::default();

    for declaration in split_declarations(raw) {
        let Some((property, value)) = declaration.split_once(':') else {
            tracing::debug!(%declaration, "skipping style declaration without a colon");
            continue;
        };

        let property = property.trim();
        let value = value.trim();
        if property.is_empty() || value.is_empty() {
            continue;
        }

        if property.starts_with("--") {
            if property.len() == 2 {
                continue;
            }
            upsert(&mut style.custom_properties, property.to_string(), value.to_string());
            continue;
        }

        if !property
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            tracing::debug!(%property, "skipping malformed style property");
            continue;
        }

        let value = strip_important(value);
        if value.is_empty() {
            continue;
        }

        let key = style_key(&property.to_ascii_lowercase());
        if !is_identifier(&key) {
            tracing::debug!(%property, "skipping style property with no object key");
            continue;
        }

        upsert(&mut style.properties, key, value.to_string());
    }

    style
}

/// `-webkit-transition` -> `WebkitTransition`, `-ms-flex` -> `msFlex`.
fn style_key(property: &str) -> String {
    if let Some(rest) = property.strip_prefix("-ms-") {
        camel_case(&format!("ms-{rest}"))
    } else if let Some(rest) = property.strip_prefix('-') {
        capitalize(&camel_case(rest))
    } else {
        camel_case(property)
    }
}

/// Keys are emitted unquoted, so they must be plain identifiers.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Later declarations of the same property win, in the first one's slot.
fn upsert(list: &mut Vec<(String, String)>, key: String, value: String) {
    match list.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => list.push((key, value)),
    }
}

fn strip_important(value: &str) -> &str {
    let trimmed = value.trim_end();
    let lower = trimmed.to_ascii_lowercase();
    match lower.strip_suffix("!important") {
        Some(rest) => trimmed[..rest.len()].trim_end(),
        None => trimmed,
    }
}

/// Split on `;` outside parentheses and quotes; data URLs contain `;`.
fn split_declarations(raw: &str) -> Vec<&str> {
    let mut declarations = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in raw.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                declarations.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    declarations.push(&raw[start..]);

    declarations
        .into_iter()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect()
}

/// Quote a CSS value as a JS string literal.
///
/// Values carrying a single quote (typically `url('...')`) are wrapped in
/// double quotes so they need no escaping.
pub fn js_string(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "");

    if escaped.contains('\'') && !escaped.contains('"') {
        format!("\"{escaped}\"")
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}
