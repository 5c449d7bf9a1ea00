//! React page component rendering.

use std::sync::LazyLock;

use sitejsx_convert::Conversion;

use crate::error::EmitError;
use crate::templates::{PageContext, TemplateEngine};

static ENGINE: LazyLock<TemplateEngine> = LazyLock::new(TemplateEngine::new);

/// Render a converted page as a default-exported function component.
///
/// `css_file` is the stylesheet written next to the module; it is imported
/// for its side effect.
pub fn render_page_component(
    name: &str,
    conversion: &Conversion,
    css_file: Option<&str>,
) -> Result<String, EmitError> {
    let imports = conversion
        .import_statements()
        .lines()
        .map(str::to_string)
        .collect();

    let page = PageContext {
        name: name.to_string(),
        imports,
        css_file: css_file.map(str::to_string),
        jsx: conversion.jsx.clone(),
    };

    let mut module = ENGINE.render_page(&page)?;
    module.push('\n');
    Ok(module)
}

/// Component name for a page path such as `blog/post-1`.
pub fn component_name(path: &str) -> String {
    let name = to_pascal_case(path);
    if name.is_empty() {
        "Page".to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Page{name}")
    } else {
        name
    }
}

fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
