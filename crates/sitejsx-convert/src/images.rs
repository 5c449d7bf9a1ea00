//! Image reference resolution for `src`-style attributes.

use crate::context::AssetMap;
use crate::tables::ImageImports;

/// Extensions that are turned into module imports.
const IMAGE_EXTENSIONS: &[&str] = &["svg", "png", "jpg", "jpeg", "gif", "webp", "avif"];

/// Flat font directory; the image directory comes from the options.
const FONTS_DIR_MARKER: &str = "fonts-flat/";

/// Words that cannot be used as an import binding.
const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void", "while",
    "with", "yield",
];

/// What an image-bearing attribute value resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Reference an imported identifier: `src={logo}`
    Import(String),
    /// A relative path to a non-image asset
    Path(String),
    /// Leave the original value alone
    Unchanged,
}

/// Resolve an attribute value, registering image imports as a side effect.
///
/// `images_dir` is the flat image directory; unmapped references that
/// already point into it keep their path below it as the filename.
pub fn resolve_image(
    value: &str,
    assets: &AssetMap,
    images_dir: &str,
    imports: &mut ImageImports,
) -> ImageRef {
    let value = value.trim();
    if is_passthrough(value) {
        return ImageRef::Unchanged;
    }

    let (filename, mapped) = match assets.resolve(value) {
        Some(sanitized) => (sanitized.to_string(), true),
        None => match heuristic_filename(value, images_dir) {
            Some(name) => (name, false),
            None => return ImageRef::Unchanged,
        },
    };

    if has_image_extension(&filename) {
        let identifier = imports.register(&filename).to_string();
        tracing::debug!(%value, %filename, %identifier, "image import");
        ImageRef::Import(identifier)
    } else if mapped {
        ImageRef::Path(format!("./{filename}"))
    } else {
        ImageRef::Unchanged
    }
}

/// Data URLs and absolute URLs are never imported.
fn is_passthrough(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("data:")
        || lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
}

/// Guess the flat filename an unmapped reference was stored under.
fn heuristic_filename(value: &str, images_dir: &str) -> Option<String> {
    let path = value
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let images_marker = format!("{}/", images_dir.trim_matches('/'));
    let markers = [images_marker.as_str(), FONTS_DIR_MARKER];

    let name = if path.starts_with('/') {
        last_segment(path)
    } else if let Some(rest) = markers
        .iter()
        .filter(|marker| marker.len() > 1)
        .find_map(|marker| path.find(*marker).map(|pos| &path[pos + marker.len()..]))
    {
        rest
    } else {
        last_segment(path)
    };

    let name = name.trim();
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn has_image_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Derive a JavaScript identifier from a sanitized filename.
///
/// `_logo_abc.png` becomes `logoAbc`: the extension is dropped, the stem is
/// split on separators, the first segment is lowercased and the rest are
/// capitalized. Stems that would be a reserved word get an `Img` suffix.
pub fn identifier_for(filename: &str) -> String {
    let stem = match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    };

    let mut identifier = String::new();
    for segment in stem
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
    {
        if identifier.is_empty() {
            identifier.push_str(&segment.to_ascii_lowercase());
        } else {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                identifier.push(first.to_ascii_uppercase());
                identifier.push_str(chars.as_str());
            }
        }
    }

    if identifier.is_empty() {
        return "image".to_string();
    }
    if identifier.starts_with(|c: char| c.is_ascii_digit()) {
        identifier.insert_str(0, "img");
    }
    if RESERVED_WORDS.contains(&identifier.as_str()) {
        identifier.push_str("Img");
    }
    identifier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_identifiers_from_sanitized_names() {
        assert_eq!(identifier_for("_logo_abc.png"), "logoAbc");
        assert_eq!(identifier_for("hero_Banner_v2.webp"), "heroBannerV2");
        assert_eq!(identifier_for("Icon-Home.svg"), "iconHome");
        assert_eq!(identifier_for("404_bg.jpg"), "img404Bg");
        assert_eq!(identifier_for("___.png"), "image");
    }

    #[test]
    fn reserved_words_get_a_suffix() {
        assert_eq!(identifier_for("delete.svg"), "deleteImg");
        assert_eq!(identifier_for("_new.png"), "newImg");
        assert_eq!(identifier_for("Class.gif"), "classImg");
        assert_eq!(identifier_for("delete-icon.svg"), "deleteIcon");
    }

    #[test]
    fn heuristics_follow_the_configured_images_dir() {
        let assets = AssetMap::new();
        let mut imports = ImageImports::new();

        assert_eq!(
            resolve_image("./static/flat/icons/a.png", &assets, "static/flat", &mut imports),
            ImageRef::Import("iconsA".to_string())
        );
        assert_eq!(imports.get("icons/a.png"), Some("iconsA"));

        assert_eq!(
            resolve_image("./images-flat/icons/b.png", &assets, "static/flat", &mut imports),
            ImageRef::Import("b".to_string())
        );
        assert_eq!(
            resolve_image("../fonts-flat/sub/glyph.svg", &assets, "static/flat", &mut imports),
            ImageRef::Import("subGlyph".to_string())
        );
    }

    #[test]
    fn mapped_image_becomes_import() {
        let assets: AssetMap = [("/front/assets/logo-abc.png", "_logo_abc.png")]
            .into_iter()
            .collect();
        let mut imports = ImageImports::new();

        let resolved = resolve_image(
            "/front/assets/logo-abc.png",
            &assets,
            "images-flat",
            &mut imports,
        );

        assert_eq!(resolved, ImageRef::Import("logoAbc".to_string()));
        assert_eq!(imports.get("_logo_abc.png"), Some("logoAbc"));
    }

    #[test]
    fn absolute_and_data_urls_pass_through() {
        let assets = AssetMap::new();
        let mut imports = ImageImports::new();

        for value in [
            "https://cdn.example.com/a.png",
            "http://example.com/b.png",
            "//cdn.example.com/c.png",
            "data:image/png;base64,AAAA",
        ] {
            assert_eq!(
                resolve_image(value, &assets, "images-flat", &mut imports),
                ImageRef::Unchanged
            );
        }
        assert!(imports.is_empty());
    }

    #[test]
    fn unmapped_paths_use_heuristics() {
        let assets = AssetMap::new();
        let mut imports = ImageImports::new();

        assert_eq!(
            resolve_image("/static/img/photo.JPG?v=3", &assets, "images-flat", &mut imports),
            ImageRef::Import("photo".to_string())
        );
        assert_eq!(
            resolve_image("./images-flat/nested/thing.svg", &assets, "images-flat", &mut imports),
            ImageRef::Import("nestedThing".to_string())
        );
        assert_eq!(imports.get("nested/thing.svg"), Some("nestedThing"));
    }

    #[test]
    fn non_images_fall_back() {
        let assets: AssetMap = [("/media/clip.mp4", "_media_clip.mp4")]
            .into_iter()
            .collect();
        let mut imports = ImageImports::new();

        assert_eq!(
            resolve_image("/media/clip.mp4", &assets, "images-flat", &mut imports),
            ImageRef::Path("./_media_clip.mp4".to_string())
        );
        assert_eq!(
            resolve_image("/media/other.mp4", &assets, "images-flat", &mut imports),
            ImageRef::Unchanged
        );
        assert!(imports.is_empty());
    }
}
