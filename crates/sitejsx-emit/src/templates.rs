//! Templates for generated modules.

use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;

/// Values a page component template can reference.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    /// Component (function) name
    pub name: String,
    /// Complete `import` lines for images
    pub imports: Vec<String>,
    /// Stylesheet next to the module, if any
    pub css_file: Option<String>,
    /// Converted markup
    pub jsx: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);

        env.add_template_owned("page.jsx".to_string(), PAGE_TEMPLATE.to_string())
            .expect("Failed to add page template");

        Self { env }
    }

    /// Render a React page module.
    pub fn render_page(&self, page: &PageContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("page.jsx")?;

        tmpl.render(context! {
            name => &page.name,
            imports => &page.imports,
            css_file => &page.css_file,
            jsx => &page.jsx,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const PAGE_TEMPLATE: &str = r#"{% for line in imports %}{{ line }}
{% endfor %}{% if css_file %}import './{{ css_file }}';
{% endif %}{% if imports or css_file %}
{% endif %}export default function {{ name }}() {
  return (
    {{ jsx }}
  );
}
"#;
