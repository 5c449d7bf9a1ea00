//! Static name tables: attribute renames, event casing, SVG element casing.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// HTML attributes whose React name is not a plain hyphen-to-camel conversion.
const HTML_RENAMES: &[(&str, &str)] = &[
    ("for", "htmlFor"),
    ("class", "className"),
    ("accept-charset", "acceptCharset"),
    ("accesskey", "accessKey"),
    ("allowfullscreen", "allowFullScreen"),
    ("autocapitalize", "autoCapitalize"),
    ("autocomplete", "autoComplete"),
    ("autofocus", "autoFocus"),
    ("autoplay", "autoPlay"),
    ("cellpadding", "cellPadding"),
    ("cellspacing", "cellSpacing"),
    ("charset", "charSet"),
    ("classid", "classID"),
    ("colspan", "colSpan"),
    ("contenteditable", "contentEditable"),
    ("contextmenu", "contextMenu"),
    ("controlslist", "controlsList"),
    ("crossorigin", "crossOrigin"),
    ("datetime", "dateTime"),
    ("enctype", "encType"),
    ("enterkeyhint", "enterKeyHint"),
    ("fetchpriority", "fetchPriority"),
    ("formaction", "formAction"),
    ("formenctype", "formEncType"),
    ("formmethod", "formMethod"),
    ("formnovalidate", "formNoValidate"),
    ("formtarget", "formTarget"),
    ("frameborder", "frameBorder"),
    ("hreflang", "hrefLang"),
    ("http-equiv", "httpEquiv"),
    ("inputmode", "inputMode"),
    ("ismap", "isMap"),
    ("itemid", "itemID"),
    ("itemprop", "itemProp"),
    ("itemref", "itemRef"),
    ("itemscope", "itemScope"),
    ("itemtype", "itemType"),
    ("marginheight", "marginHeight"),
    ("marginwidth", "marginWidth"),
    ("maxlength", "maxLength"),
    ("mediagroup", "mediaGroup"),
    ("minlength", "minLength"),
    ("nomodule", "noModule"),
    ("novalidate", "noValidate"),
    ("playsinline", "playsInline"),
    ("popovertarget", "popoverTarget"),
    ("popovertargetaction", "popoverTargetAction"),
    ("radiogroup", "radioGroup"),
    ("readonly", "readOnly"),
    ("referrerpolicy", "referrerPolicy"),
    ("rowspan", "rowSpan"),
    ("spellcheck", "spellCheck"),
    ("srcdoc", "srcDoc"),
    ("srclang", "srcLang"),
    ("srcset", "srcSet"),
    ("tabindex", "tabIndex"),
    ("usemap", "useMap"),
];

/// SVG presentation and structural attributes. Keys are lowercase because
/// the tokenizer folds attribute names.
const SVG_RENAMES: &[(&str, &str)] = &[
    ("accent-height", "accentHeight"),
    ("alignment-baseline", "alignmentBaseline"),
    ("allowreorder", "allowReorder"),
    ("arabic-form", "arabicForm"),
    ("attributename", "attributeName"),
    ("attributetype", "attributeType"),
    ("autoreverse", "autoReverse"),
    ("basefrequency", "baseFrequency"),
    ("baseline-shift", "baselineShift"),
    ("baseprofile", "baseProfile"),
    ("calcmode", "calcMode"),
    ("cap-height", "capHeight"),
    ("clip-path", "clipPath"),
    ("clip-rule", "clipRule"),
    ("clippathunits", "clipPathUnits"),
    ("color-interpolation", "colorInterpolation"),
    ("color-interpolation-filters", "colorInterpolationFilters"),
    ("color-profile", "colorProfile"),
    ("color-rendering", "colorRendering"),
    ("contentscripttype", "contentScriptType"),
    ("contentstyletype", "contentStyleType"),
    ("diffuseconstant", "diffuseConstant"),
    ("dominant-baseline", "dominantBaseline"),
    ("edgemode", "edgeMode"),
    ("enable-background", "enableBackground"),
    ("externalresourcesrequired", "externalResourcesRequired"),
    ("fill-opacity", "fillOpacity"),
    ("fill-rule", "fillRule"),
    ("filterres", "filterRes"),
    ("filterunits", "filterUnits"),
    ("flood-color", "floodColor"),
    ("flood-opacity", "floodOpacity"),
    ("font-family", "fontFamily"),
    ("font-size", "fontSize"),
    ("font-size-adjust", "fontSizeAdjust"),
    ("font-stretch", "fontStretch"),
    ("font-style", "fontStyle"),
    ("font-variant", "fontVariant"),
    ("font-weight", "fontWeight"),
    ("glyph-name", "glyphName"),
    ("glyph-orientation-horizontal", "glyphOrientationHorizontal"),
    ("glyph-orientation-vertical", "glyphOrientationVertical"),
    ("glyphref", "glyphRef"),
    ("gradienttransform", "gradientTransform"),
    ("gradientunits", "gradientUnits"),
    ("horiz-adv-x", "horizAdvX"),
    ("horiz-origin-x", "horizOriginX"),
    ("image-rendering", "imageRendering"),
    ("kernelmatrix", "kernelMatrix"),
    ("kernelunitlength", "kernelUnitLength"),
    ("keypoints", "keyPoints"),
    ("keysplines", "keySplines"),
    ("keytimes", "keyTimes"),
    ("lengthadjust", "lengthAdjust"),
    ("letter-spacing", "letterSpacing"),
    ("lighting-color", "lightingColor"),
    ("limitingconeangle", "limitingConeAngle"),
    ("marker-end", "markerEnd"),
    ("marker-mid", "markerMid"),
    ("marker-start", "markerStart"),
    ("markerheight", "markerHeight"),
    ("markerunits", "markerUnits"),
    ("markerwidth", "markerWidth"),
    ("maskcontentunits", "maskContentUnits"),
    ("maskunits", "maskUnits"),
    ("numoctaves", "numOctaves"),
    ("overline-position", "overlinePosition"),
    ("overline-thickness", "overlineThickness"),
    ("paint-order", "paintOrder"),
    ("pathlength", "pathLength"),
    ("patterncontentunits", "patternContentUnits"),
    ("patterntransform", "patternTransform"),
    ("patternunits", "patternUnits"),
    ("pointer-events", "pointerEvents"),
    ("pointsatx", "pointsAtX"),
    ("pointsaty", "pointsAtY"),
    ("pointsatz", "pointsAtZ"),
    ("preservealpha", "preserveAlpha"),
    ("preserveaspectratio", "preserveAspectRatio"),
    ("primitiveunits", "primitiveUnits"),
    ("refx", "refX"),
    ("refy", "refY"),
    ("rendering-intent", "renderingIntent"),
    ("repeatcount", "repeatCount"),
    ("repeatdur", "repeatDur"),
    ("requiredextensions", "requiredExtensions"),
    ("requiredfeatures", "requiredFeatures"),
    ("shape-rendering", "shapeRendering"),
    ("specularconstant", "specularConstant"),
    ("specularexponent", "specularExponent"),
    ("spreadmethod", "spreadMethod"),
    ("startoffset", "startOffset"),
    ("stddeviation", "stdDeviation"),
    ("stitchtiles", "stitchTiles"),
    ("stop-color", "stopColor"),
    ("stop-opacity", "stopOpacity"),
    ("strikethrough-position", "strikethroughPosition"),
    ("strikethrough-thickness", "strikethroughThickness"),
    ("stroke-dasharray", "strokeDasharray"),
    ("stroke-dashoffset", "strokeDashoffset"),
    ("stroke-linecap", "strokeLinecap"),
    ("stroke-linejoin", "strokeLinejoin"),
    ("stroke-miterlimit", "strokeMiterlimit"),
    ("stroke-opacity", "strokeOpacity"),
    ("stroke-width", "strokeWidth"),
    ("surfacescale", "surfaceScale"),
    ("systemlanguage", "systemLanguage"),
    ("tablevalues", "tableValues"),
    ("targetx", "targetX"),
    ("targety", "targetY"),
    ("text-anchor", "textAnchor"),
    ("text-decoration", "textDecoration"),
    ("text-rendering", "textRendering"),
    ("textlength", "textLength"),
    ("underline-position", "underlinePosition"),
    ("underline-thickness", "underlineThickness"),
    ("unicode-bidi", "unicodeBidi"),
    ("unicode-range", "unicodeRange"),
    ("units-per-em", "unitsPerEm"),
    ("v-alphabetic", "vAlphabetic"),
    ("v-hanging", "vHanging"),
    ("v-ideographic", "vIdeographic"),
    ("v-mathematical", "vMathematical"),
    ("vector-effect", "vectorEffect"),
    ("vert-adv-y", "vertAdvY"),
    ("vert-origin-x", "vertOriginX"),
    ("vert-origin-y", "vertOriginY"),
    ("viewbox", "viewBox"),
    ("viewtarget", "viewTarget"),
    ("word-spacing", "wordSpacing"),
    ("writing-mode", "writingMode"),
    ("x-height", "xHeight"),
    ("xchannelselector", "xChannelSelector"),
    ("xlink:actuate", "xlinkActuate"),
    ("xlink:arcrole", "xlinkArcrole"),
    ("xlink:href", "xlinkHref"),
    ("xlink:role", "xlinkRole"),
    ("xlink:show", "xlinkShow"),
    ("xlink:title", "xlinkTitle"),
    ("xlink:type", "xlinkType"),
    ("xml:base", "xmlBase"),
    ("xml:lang", "xmlLang"),
    ("xml:space", "xmlSpace"),
    ("xmlns:xlink", "xmlnsXlink"),
    ("ychannelselector", "yChannelSelector"),
    ("zoomandpan", "zoomAndPan"),
];

/// DOM event handler attributes and their React prop names.
const EVENT_NAMES: &[(&str, &str)] = &[
    ("onabort", "onAbort"),
    ("onanimationend", "onAnimationEnd"),
    ("onanimationiteration", "onAnimationIteration"),
    ("onanimationstart", "onAnimationStart"),
    ("onbeforeinput", "onBeforeInput"),
    ("onblur", "onBlur"),
    ("oncanplay", "onCanPlay"),
    ("oncanplaythrough", "onCanPlayThrough"),
    ("onchange", "onChange"),
    ("onclick", "onClick"),
    ("oncontextmenu", "onContextMenu"),
    ("oncopy", "onCopy"),
    ("oncut", "onCut"),
    ("ondblclick", "onDoubleClick"),
    ("ondrag", "onDrag"),
    ("ondragend", "onDragEnd"),
    ("ondragenter", "onDragEnter"),
    ("ondragleave", "onDragLeave"),
    ("ondragover", "onDragOver"),
    ("ondragstart", "onDragStart"),
    ("ondrop", "onDrop"),
    ("ondurationchange", "onDurationChange"),
    ("onended", "onEnded"),
    ("onerror", "onError"),
    ("onfocus", "onFocus"),
    ("onfocusin", "onFocus"),
    ("onfocusout", "onBlur"),
    ("oninput", "onInput"),
    ("oninvalid", "onInvalid"),
    ("onkeydown", "onKeyDown"),
    ("onkeypress", "onKeyPress"),
    ("onkeyup", "onKeyUp"),
    ("onload", "onLoad"),
    ("onloadeddata", "onLoadedData"),
    ("onloadedmetadata", "onLoadedMetadata"),
    ("onloadstart", "onLoadStart"),
    ("onmousedown", "onMouseDown"),
    ("onmouseenter", "onMouseEnter"),
    ("onmouseleave", "onMouseLeave"),
    ("onmousemove", "onMouseMove"),
    ("onmouseout", "onMouseOut"),
    ("onmouseover", "onMouseOver"),
    ("onmouseup", "onMouseUp"),
    ("onpaste", "onPaste"),
    ("onpause", "onPause"),
    ("onplay", "onPlay"),
    ("onplaying", "onPlaying"),
    ("onpointercancel", "onPointerCancel"),
    ("onpointerdown", "onPointerDown"),
    ("onpointerenter", "onPointerEnter"),
    ("onpointerleave", "onPointerLeave"),
    ("onpointermove", "onPointerMove"),
    ("onpointerout", "onPointerOut"),
    ("onpointerover", "onPointerOver"),
    ("onpointerup", "onPointerUp"),
    ("onprogress", "onProgress"),
    ("onreset", "onReset"),
    ("onresize", "onResize"),
    ("onscroll", "onScroll"),
    ("onseeked", "onSeeked"),
    ("onseeking", "onSeeking"),
    ("onselect", "onSelect"),
    ("onsubmit", "onSubmit"),
    ("ontimeupdate", "onTimeUpdate"),
    ("ontoggle", "onToggle"),
    ("ontouchcancel", "onTouchCancel"),
    ("ontouchend", "onTouchEnd"),
    ("ontouchmove", "onTouchMove"),
    ("ontouchstart", "onTouchStart"),
    ("ontransitionend", "onTransitionEnd"),
    ("onvolumechange", "onVolumeChange"),
    ("onwaiting", "onWaiting"),
    ("onwheel", "onWheel"),
];

/// Attributes whose React prop is a boolean.
const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "hidden",
    "inert",
    "ismap",
    "itemscope",
    "loop",
    "multiple",
    "muted",
    "nomodule",
    "novalidate",
    "open",
    "playsinline",
    "readonly",
    "required",
    "reversed",
    "selected",
];

/// SVG elements whose canonical name is mixed case.
const SVG_TAG_NAMES: &[&str] = &[
    "altGlyph",
    "altGlyphDef",
    "altGlyphItem",
    "animateColor",
    "animateMotion",
    "animateTransform",
    "clipPath",
    "feBlend",
    "feColorMatrix",
    "feComponentTransfer",
    "feComposite",
    "feConvolveMatrix",
    "feDiffuseLighting",
    "feDisplacementMap",
    "feDistantLight",
    "feDropShadow",
    "feFlood",
    "feFuncA",
    "feFuncB",
    "feFuncG",
    "feFuncR",
    "feGaussianBlur",
    "feImage",
    "feMerge",
    "feMergeNode",
    "feMorphology",
    "feOffset",
    "fePointLight",
    "feSpecularLighting",
    "feSpotLight",
    "feTile",
    "feTurbulence",
    "foreignObject",
    "glyphRef",
    "linearGradient",
    "radialGradient",
    "textPath",
];

/// Elements that never have content or a close tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

static ATTRIBUTE_RENAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HTML_RENAMES
        .iter()
        .chain(SVG_RENAMES.iter())
        .copied()
        .collect()
});

static EVENTS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| EVENT_NAMES.iter().copied().collect());

static BOOLEANS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| BOOLEAN_ATTRIBUTES.iter().copied().collect());

static SVG_TAGS: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    SVG_TAG_NAMES
        .iter()
        .map(|name| (name.to_ascii_lowercase(), *name))
        .collect()
});

/// Explicit React name for an HTML or SVG attribute, if it has one.
pub fn known_rename(name: &str) -> Option<&'static str> {
    ATTRIBUTE_RENAMES.get(name).copied()
}

/// Whether the attribute is treated as a boolean prop.
pub fn is_boolean_attribute(name: &str) -> bool {
    BOOLEANS.contains(name.to_ascii_lowercase().as_str())
}

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// React prop name for an inline `on*` handler attribute.
pub fn event_prop_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    if let Some(known) = EVENTS.get(lower.as_str()) {
        return (*known).to_string();
    }
    match lower.strip_prefix("on") {
        Some(rest) => format!("on{}", capitalize(rest)),
        None => name.to_string(),
    }
}

/// Whether `name` looks like an inline event handler attribute.
pub fn is_event_attribute(name: &str) -> bool {
    match (name.get(..2), name.get(2..)) {
        (Some(prefix), Some(rest)) => {
            prefix.eq_ignore_ascii_case("on")
                && !rest.is_empty()
                && rest.chars().all(|c| c.is_ascii_alphabetic())
        }
        _ => false,
    }
}

/// Canonical element name, restoring SVG camel case lost to case folding.
pub fn canonical_tag_name(name: &str) -> String {
    let local = name.rsplit(':').next().unwrap_or(name);
    match SVG_TAGS.get(local) {
        Some(svg) => (*svg).to_string(),
        None => local.to_string(),
    }
}

/// `background-color` -> `backgroundColor`.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' || c == ':' || c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `prefix:local` -> `prefixLocal`; `xmlns:foo` -> `xmlnsFoo`.
///
/// Returns an empty string when either side of the colon is empty; such
/// names (`:class`, `v:`) have no JSX spelling.
pub fn namespaced_name(name: &str) -> String {
    match name.split_once(':') {
        Some((prefix, local)) if prefix.is_empty() || local.is_empty() => String::new(),
        Some((prefix, local)) => format!(
            "{}{}",
            prefix.to_ascii_lowercase(),
            capitalize(&camel_case(local))
        ),
        None => name.to_string(),
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_cases_hyphenated_names() {
        assert_eq!(camel_case("background-color"), "backgroundColor");
        assert_eq!(camel_case("stroke-width"), "strokeWidth");
        assert_eq!(camel_case("plain"), "plain");
        assert_eq!(camel_case("-leading"), "leading");
    }

    #[test]
    fn renames_take_priority() {
        assert_eq!(known_rename("for"), Some("htmlFor"));
        assert_eq!(known_rename("tabindex"), Some("tabIndex"));
        assert_eq!(known_rename("stroke-width"), Some("strokeWidth"));
        assert_eq!(known_rename("xlink:href"), Some("xlinkHref"));
        assert_eq!(known_rename("viewbox"), Some("viewBox"));
        assert_eq!(known_rename("id"), None);
    }

    #[test]
    fn handles_namespaces() {
        assert_eq!(namespaced_name("xmlns:dc"), "xmlnsDc");
        assert_eq!(namespaced_name("sodipodi:docname"), "sodipodiDocname");
        assert_eq!(namespaced_name("inkscape:label-text"), "inkscapeLabelText");
    }

    #[test]
    fn namespace_needs_both_parts() {
        assert_eq!(namespaced_name(":class"), "");
        assert_eq!(namespaced_name("v:"), "");
        assert_eq!(namespaced_name(":"), "");
    }

    #[test]
    fn event_names_follow_react_casing() {
        assert_eq!(event_prop_name("onclick"), "onClick");
        assert_eq!(event_prop_name("onmouseover"), "onMouseOver");
        assert_eq!(event_prop_name("ondblclick"), "onDoubleClick");
        assert_eq!(event_prop_name("oncustomthing"), "onCustomthing");
        assert!(is_event_attribute("onclick"));
        assert!(!is_event_attribute("one-thing"));
        assert!(!is_event_attribute("on"));
    }

    #[test]
    fn restores_svg_tag_case() {
        assert_eq!(canonical_tag_name("lineargradient"), "linearGradient");
        assert_eq!(canonical_tag_name("fegaussianblur"), "feGaussianBlur");
        assert_eq!(canonical_tag_name("svg:clippath"), "clipPath");
        assert_eq!(canonical_tag_name("div"), "div");
    }

    #[test]
    fn recognizes_booleans_and_voids() {
        assert!(is_boolean_attribute("disabled"));
        assert!(is_boolean_attribute("readonly"));
        assert!(!is_boolean_attribute("value"));
        assert!(is_void_element("img"));
        assert!(!is_void_element("div"));
    }
}
