//! Syntax check for generated modules.

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::EmitError;

/// Parse `source` as a JSX module and report every syntax error.
pub fn validate_jsx_module(source: &str) -> Result<(), EmitError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::jsx()).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let messages: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();
        return Err(EmitError::InvalidJsx(if messages.is_empty() {
            "parser aborted".to_string()
        } else {
            messages.join("; ")
        }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::render_page_component;
    use sitejsx_convert::{convert_html_to_jsx, AssetMap};

    #[test]
    fn accepts_valid_module() {
        let source = "import a from './a.png';\nexport default function A() {\n  return (<img src={a} />);\n}\n";
        assert!(validate_jsx_module(source).is_ok());
    }

    #[test]
    fn rejects_unbalanced_markup() {
        let source = "export default function A() {\n  return (<div><span></div>);\n}\n";
        assert!(matches!(
            validate_jsx_module(source),
            Err(EmitError::InvalidJsx(_))
        ));
    }

    #[test]
    fn converted_pages_parse() {
        let html = r#"<!DOCTYPE html>
<html><head><title>x</title></head>
<body class="page" onload="init()">
  <p>if (a < b) { c } &amp; more</p>
  <div style="background: url('a.png'); --gap: 2px" data-cfg='{"a": [1, 2]}' onclick="toggle(this); return false;">
    <input type="checkbox" checked><label for="x">X</label>
    <svg viewBox="0 0 4 4"><path stroke-width="1" d="M0 0"/></svg>
  </div>
  <ul><li>unclosed</ul>
</body></html>"#;

        let conversion = convert_html_to_jsx(html, &AssetMap::new());
        let module = render_page_component("Page", &conversion, None).unwrap();

        if let Err(err) = validate_jsx_module(&module) {
            panic!("{err}\n{module}");
        }
    }

    #[test]
    fn awkward_names_and_handlers_still_parse() {
        let html = r#"<body><img src="/icons/delete.svg"><img src="/icons/new.png"><a href="" onclick="track(); // analytics">x</a><p style="-: 1; 2x: 3; color: red">y</p></body>"#;

        let conversion = convert_html_to_jsx(html, &AssetMap::new());
        let module = render_page_component("Page", &conversion, None).unwrap();

        assert!(module.contains("import deleteImg from './images-flat/delete.svg';"));
        if let Err(err) = validate_jsx_module(&module) {
            panic!("{err}\n{module}");
        }
    }
}
