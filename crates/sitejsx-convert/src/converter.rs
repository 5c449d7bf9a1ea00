//! Single-pass HTML to JSX conversion.
//!
//! The html5ever tokenizer feeds tag, text and comment events into a
//! [`TokenSink`] that decides per event whether content is emitted,
//! redirected to the body wrapper, or discarded, and writes JSX text as it
//! goes. Nothing is buffered beyond the output strings and the open-element
//! stack, and the input is never revisited.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use html5ever::interface::TokenizerResult;

use crate::attributes::AttributeTransformer;
use crate::context::{AssetMap, Conversion, ConvertError, ConvertOptions, Diagnostic, Markup};
use crate::names::{canonical_tag_name, is_void_element};
use crate::normalize::normalize_jsx;
use crate::tables::SideTables;

/// Elements whose whole subtree is dropped.
const DISCARDED_ELEMENTS: &[&str] = &["head", "script", "noscript", "iframe", "style"];

/// Elements that may appear in an open head; anything else ends it.
const HEAD_CONTENT: &[&str] = &[
    "base", "basefont", "bgsound", "link", "meta", "noscript", "script", "style", "template",
    "title",
];

/// Converts HTML documents to JSX with a fixed set of options.
#[derive(Debug, Clone)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter, rejecting unusable options up front.
    pub fn new(options: ConvertOptions) -> Result<Self, ConvertError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert one document with fresh side tables.
    pub fn convert(&self, html: &str, assets: &AssetMap) -> Conversion {
        let mut tables = SideTables::default();
        let markup = self.convert_with(html, assets, &mut tables);

        Conversion {
            jsx: markup.jsx,
            images: tables.images,
            css_vars: tables.css_vars,
            diagnostics: markup.diagnostics,
            images_dir: self.options.images_dir.clone(),
        }
    }

    /// Convert one document, recording imports and classes in caller-owned
    /// tables. Sharing tables across documents keeps class numbers unique.
    pub fn convert_with(&self, html: &str, assets: &AssetMap, tables: &mut SideTables) -> Markup {
        let pass = Pass {
            attributes: AttributeTransformer {
                assets,
                options: &self.options,
            },
            options: &self.options,
            tables,
            stack: Vec::new(),
            body_seen: false,
            body_open: false,
            body_attrs: None,
            main: String::new(),
            pre_body: String::new(),
            diagnostics: Vec::new(),
        };

        let sink = JsxSink {
            pass: RefCell::new(pass),
        };
        let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());

        let input = BufferQueue::default();
        input.push_back(StrTendril::from(html));
        while let TokenizerResult::Script(()) = tokenizer.feed(&input) {
            tracing::trace!("tokenizer paused at a script boundary; resuming");
        }
        tokenizer.end();

        let markup = tokenizer.sink.pass.into_inner().finish();
        tracing::debug!(
            bytes_in = html.len(),
            bytes_out = markup.jsx.len(),
            diagnostics = markup.diagnostics.len(),
            "converted document"
        );
        markup
    }
}

/// Convert with default options and fresh tables.
pub fn convert_html_to_jsx(html: &str, assets: &AssetMap) -> Conversion {
    Converter {
        options: ConvertOptions::default(),
    }
    .convert(html, assets)
}

/// Which output buffer an element was opened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Main,
    PreBody,
}

/// One entry of the open-element stack.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Frame {
    /// An element written to the output
    Element { name: String, target: Target },
    /// An element inside a discarded subtree (or the subtree root)
    Discarded { name: String },
    /// The body tag; its content goes to the main buffer
    Body,
    /// The html tag; transparent
    Document,
}

impl Frame {
    fn matches(&self, name: &str) -> bool {
        match self {
            Frame::Element { name: n, .. } | Frame::Discarded { name: n } => n == name,
            Frame::Body => name == "body",
            Frame::Document => name == "html",
        }
    }
}

/// Mutable state of one conversion pass.
struct Pass<'a> {
    attributes: AttributeTransformer<'a>,
    options: &'a ConvertOptions,
    tables: &'a mut SideTables,
    stack: Vec<Frame>,
    body_seen: bool,
    body_open: bool,
    body_attrs: Option<String>,
    main: String,
    pre_body: String,
    diagnostics: Vec<Diagnostic>,
}

impl Pass<'_> {
    fn discarding(&self) -> bool {
        matches!(self.stack.last(), Some(Frame::Discarded { .. }))
    }

    /// Close a head left open by the markup, as a browser does when body
    /// content shows up.
    fn leave_open_head(&mut self) {
        if matches!(self.stack.last(), Some(Frame::Discarded { name }) if name == "head") {
            tracing::debug!("implicitly closing <head>");
            self.stack.pop();
        }
    }

    fn in_foreign_content(&self) -> bool {
        self.stack.iter().any(|frame| {
            matches!(frame, Frame::Element { name, .. } if name == "svg" || name == "math")
        })
    }

    fn target(&self) -> Target {
        if self.body_open {
            Target::Main
        } else {
            Target::PreBody
        }
    }

    fn buffer(&mut self, target: Target) -> &mut String {
        match target {
            Target::Main => &mut self.main,
            Target::PreBody => &mut self.pre_body,
        }
    }

    fn open_tag(&mut self, tag: &Tag) {
        let name = canonical_tag_name(&tag.name);
        if !HEAD_CONTENT.contains(&name.as_str()) {
            self.leave_open_head();
        }
        let foreign = name == "svg" || name == "math" || self.in_foreign_content();
        let self_closing = is_void_element(&name) || (tag.self_closing && foreign);

        if self.discarding() {
            if !self_closing {
                self.stack.push(Frame::Discarded { name });
            }
            return;
        }

        if name == "html" {
            self.stack.push(Frame::Document);
            return;
        }

        if DISCARDED_ELEMENTS.contains(&name.as_str()) {
            if !tag.self_closing {
                self.stack.push(Frame::Discarded { name });
            }
            return;
        }

        let attrs: Vec<(String, String)> = tag
            .attrs
            .iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect();

        if name == "body" {
            if self.body_open {
                tracing::warn!("ignoring nested <body> tag");
                self.diagnostics.push(Diagnostic::DuplicateBody);
                return;
            }
            let wrapper = self.options.wrapper_tag.clone();
            self.body_attrs = Some(self.attributes.transform(&wrapper, &attrs, self.tables));
            self.body_seen = true;
            self.body_open = true;
            self.stack.push(Frame::Body);
            return;
        }

        let rendered = self.attributes.transform(&name, &attrs, self.tables);
        let target = self.target();
        let buffer = self.buffer(target);
        buffer.push('<');
        buffer.push_str(&name);
        buffer.push_str(&rendered);

        if self_closing {
            buffer.push_str(" />");
        } else {
            buffer.push('>');
            self.stack.push(Frame::Element { name, target });
        }
    }

    fn close_tag(&mut self, raw_name: &str) {
        let name = canonical_tag_name(raw_name);
        if is_void_element(&name) {
            return;
        }

        // Inside a discarded subtree only the discarded frames are candidates.
        let floor = if self.discarding() {
            self.stack
                .iter()
                .rposition(|frame| !matches!(frame, Frame::Discarded { .. }))
                .map_or(0, |pos| pos + 1)
        } else {
            0
        };

        let Some(position) = self.stack[floor..]
            .iter()
            .rposition(|frame| frame.matches(&name))
            .map(|pos| pos + floor)
        else {
            if !self.discarding() {
                tracing::warn!(tag = %name, "ignoring close tag with no open element");
                self.diagnostics.push(Diagnostic::StrayClose(name));
            }
            return;
        };

        while self.stack.len() > position + 1 {
            if let Some(frame) = self.stack.pop() {
                if let Frame::Element { name: open, .. } = &frame {
                    tracing::warn!(expected = %open, found = %name, "mismatched close tag");
                    self.diagnostics.push(Diagnostic::MismatchedClose {
                        expected: open.clone(),
                        found: name.clone(),
                    });
                }
                self.close_frame(frame);
            }
        }

        if let Some(frame) = self.stack.pop() {
            self.close_frame(frame);
        }
    }

    fn close_frame(&mut self, frame: Frame) {
        match frame {
            Frame::Element { name, target } => {
                let buffer = self.buffer(target);
                buffer.push_str("</");
                buffer.push_str(&name);
                buffer.push('>');
            }
            Frame::Body => self.body_open = false,
            Frame::Discarded { .. } | Frame::Document => {}
        }
    }

    fn text(&mut self, text: &str) {
        if !text.trim().is_empty() {
            self.leave_open_head();
        }
        if self.discarding() {
            return;
        }
        let target = self.target();
        escape_text_into(self.buffer(target), text);
    }

    fn comment(&mut self, text: &str) {
        if self.discarding() || !self.options.keep_comments {
            return;
        }
        let target = self.target();
        let comment = format!("{{/*{}*/}}", text.replace("*/", "* /"));
        self.buffer(target).push_str(&comment);
    }

    fn finish(mut self) -> Markup {
        while let Some(frame) = self.stack.pop() {
            if let Frame::Element { name, .. } = &frame {
                tracing::warn!(tag = %name, "closing element left open at end of input");
                self.diagnostics.push(Diagnostic::Unclosed(name.clone()));
            }
            self.close_frame(frame);
        }

        let content = if self.body_seen {
            self.main
        } else {
            tracing::warn!("no <body> tag found; using top-level content");
            self.diagnostics.push(Diagnostic::MissingBody);
            self.pre_body
        };

        let jsx = match self.body_attrs.filter(|attrs| !attrs.is_empty()) {
            Some(attrs) => {
                let wrapper = &self.options.wrapper_tag;
                format!("<{wrapper}{attrs}>{content}</{wrapper}>")
            }
            None => format!("<>{content}</>"),
        };

        let jsx = if self.options.normalize_output {
            normalize_jsx(&jsx)
        } else {
            jsx
        };

        Markup {
            jsx,
            diagnostics: self.diagnostics,
        }
    }
}

/// Escape text content. Ampersands go first so nothing is escaped twice;
/// braces become character references so text never opens an expression.
fn escape_text_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
}

/// Content model the tokenizer must switch to after a start tag.
fn raw_kind_for(name: &str) -> Option<RawKind> {
    match name {
        "script" => Some(RawKind::ScriptData),
        "style" | "noscript" | "iframe" | "xmp" | "noembed" | "noframes" => Some(RawKind::Rawtext),
        "title" | "textarea" => Some(RawKind::Rcdata),
        _ => None,
    }
}

struct JsxSink<'a> {
    pass: RefCell<Pass<'a>>,
}

impl TokenSink for JsxSink<'_> {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        let mut pass = self.pass.borrow_mut();
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => {
                    pass.open_tag(&tag);
                    if !tag.self_closing {
                        if let Some(kind) = raw_kind_for(&tag.name) {
                            return TokenSinkResult::RawData(kind);
                        }
                    }
                }
                TagKind::EndTag => pass.close_tag(&tag.name),
            },
            Token::CharacterTokens(text) => pass.text(&text),
            Token::CommentToken(text) => pass.comment(&text),
            Token::ParseError(error) => tracing::trace!(%error, "tokenizer parse error"),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}
