//! Markdown → document tree conversion using pulldown-cmark.
//!
//! Besides plain structure, the renderer adds:
//!
//! - `id` + permalink control on headings 1–4 (ids from [`slugify`])
//! - a copy control beside fenced and indented code blocks
//! - a horizontally scrollable wrapper around tables
//! - lazy loading and a preview action on images
//! - language-aware link rewriting (see [`super::link`])
//!
//! Raw HTML is shown as literal text. pulldown-cmark accepts any input, so
//! rendering never fails.

use std::ops::Range;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Parser, Tag, TagEnd};
use serde::Serialize;

use super::MarkdownOptions;
use super::link::{LinkTarget, rewrite_link};
use super::toc::{heading_text, parse_heading_line, slugify};
use crate::dom::{Element, Node};

// =============================================================================
// Public types
// =============================================================================

/// Heading depth as a tagged variant; selects the rendering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HeadingLevel {
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
    Level6,
}

impl HeadingLevel {
    pub const fn depth(self) -> u8 {
        match self {
            Self::Level1 => 1,
            Self::Level2 => 2,
            Self::Level3 => 3,
            Self::Level4 => 4,
            Self::Level5 => 5,
            Self::Level6 => 6,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Level1 => "h1",
            Self::Level2 => "h2",
            Self::Level3 => "h3",
            Self::Level4 => "h4",
            Self::Level5 => "h5",
            Self::Level6 => "h6",
        }
    }

    fn strategy(self) -> &'static dyn HeadingRenderer {
        match self {
            Self::Level1 | Self::Level2 | Self::Level3 | Self::Level4 => &AnchoredHeading,
            Self::Level5 | Self::Level6 => &PlainHeading,
        }
    }
}

impl From<pulldown_cmark::HeadingLevel> for HeadingLevel {
    fn from(level: pulldown_cmark::HeadingLevel) -> Self {
        use pulldown_cmark::HeadingLevel as H;
        match level {
            H::H1 => Self::Level1,
            H::H2 => Self::Level2,
            H::H3 => Self::Level3,
            H::H4 => Self::Level4,
            H::H5 => Self::Level5,
            H::H6 => Self::Level6,
        }
    }
}

/// A heading that carries an in-document anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingAnchor {
    pub id: String,
    pub text: String,
    pub level: HeadingLevel,
}

/// Literal content of one code block, indexed by its copy control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub text: String,
}

/// Output of [`render`].
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// `<article>` root.
    pub root: Element,
    /// Anchored headings in document order.
    pub headings: Vec<HeadingAnchor>,
    /// Code blocks in document order; `data-code-index` points here.
    pub code_blocks: Vec<CodeBlock>,
    /// Image sources in document order.
    pub images: Vec<String>,
}

impl RenderedDocument {
    pub fn to_html(&self) -> String {
        self.root.to_html()
    }

    /// Ids of the headings the scroll-sync controller watches (levels 1–3).
    pub fn observed_headings(&self) -> Vec<String> {
        self.headings
            .iter()
            .filter(|h| h.level <= HeadingLevel::Level3)
            .map(|h| h.id.clone())
            .collect()
    }

    /// Text the copy control of code block `index` puts on the clipboard.
    pub fn code_text(&self, index: usize) -> Option<&str> {
        self.code_blocks.get(index).map(|b| b.text.as_str())
    }
}

/// Per-document rendering inputs.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Language of the current route, used for internal links.
    pub language: &'a str,
    /// Content-file extension, without the dot.
    pub extension: &'a str,
    pub options: &'a MarkdownOptions,
}

/// Render normalized Markdown into a document tree.
pub fn render(normalized: &str, ctx: &RenderContext<'_>) -> RenderedDocument {
    Renderer::new(normalized, ctx).run()
}

// =============================================================================
// Heading strategies
// =============================================================================

struct HeadingParts {
    level: HeadingLevel,
    id: String,
    label: String,
    children: Vec<Node>,
}

trait HeadingRenderer: Sync {
    /// Build the heading element. Returns whether `id` was attached.
    fn render(&self, parts: HeadingParts) -> (Element, bool);
}

/// Heading with an id and a hover-revealed permalink.
struct AnchoredHeading;

impl HeadingRenderer for AnchoredHeading {
    fn render(&self, parts: HeadingParts) -> (Element, bool) {
        let permalink = Element::new("a")
            .with_attr("href", format!("#{}", parts.id))
            .with_attr("class", "heading-anchor")
            .with_attr("aria-label", format!("Link to {}", parts.label))
            .with_attr("data-action", "scroll-to")
            .with_child(Node::text("#"));

        let mut elem = Element::new(parts.level.tag())
            .with_attr("id", parts.id)
            .with_attr("class", "heading");
        elem.children = parts.children;
        elem.push(permalink);
        (elem, true)
    }
}

/// Default heading rendering, no anchor.
struct PlainHeading;

impl HeadingRenderer for PlainHeading {
    fn render(&self, parts: HeadingParts) -> (Element, bool) {
        let mut elem = Element::new(parts.level.tag());
        elem.children = parts.children;
        (elem, false)
    }
}

// =============================================================================
// Converter
// =============================================================================

enum FrameKind {
    Plain,
    Heading {
        level: HeadingLevel,
        /// Heading text taken from the source line, as the TOC sees it.
        source_text: Option<String>,
    },
    CodeBlock {
        language: Option<String>,
    },
    Image,
    Table,
    TableHead,
}

/// Stack frame for tracking nested elements
struct Frame {
    kind: FrameKind,
    element: Element,
}

struct Renderer<'a> {
    source: &'a str,
    ctx: &'a RenderContext<'a>,
    stack: Vec<Frame>,
    root_children: Vec<Node>,
    headings: Vec<HeadingAnchor>,
    code_blocks: Vec<CodeBlock>,
    images: Vec<String>,
    alignments: Vec<Alignment>,
    cell_index: usize,
    in_table_head: bool,
}

impl<'a> Renderer<'a> {
    fn new(source: &'a str, ctx: &'a RenderContext<'a>) -> Self {
        Self {
            source,
            ctx,
            stack: Vec::new(),
            root_children: Vec::new(),
            headings: Vec::new(),
            code_blocks: Vec::new(),
            images: Vec::new(),
            alignments: Vec::new(),
            cell_index: 0,
            in_table_head: false,
        }
    }

    fn run(mut self) -> RenderedDocument {
        let parser = Parser::new_ext(self.source, self.ctx.options.to_pulldown_options());

        for (event, range) in parser.into_offset_iter() {
            self.handle_event(event, range);
        }

        // Unbalanced input cannot happen with pulldown-cmark, but never drop content
        while let Some(frame) = self.stack.pop() {
            self.add_node(frame.element.into());
        }

        let mut root = Element::new("article");
        root.children = self.root_children;

        RenderedDocument {
            root,
            headings: self.headings,
            code_blocks: self.code_blocks,
            images: self.images,
        }
    }

    fn handle_event(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => self.start_tag(tag, range),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.add_text(&text),
            Event::Code(code) => self.add_inline_code(&code),
            // Raw HTML is not interpreted
            Event::Html(html) | Event::InlineHtml(html) => self.add_text(&html),
            Event::SoftBreak => self.add_text("\n"),
            Event::HardBreak => self.add_node(Element::new("br").into()),
            Event::Rule => self.add_node(Element::new("hr").into()),
            Event::FootnoteReference(name) => self.add_footnote_ref(&name),
            Event::TaskListMarker(checked) => self.add_task_marker(checked),
            Event::InlineMath(math) => self.add_text(&format!("${math}$")),
            Event::DisplayMath(math) => self.add_text(&format!("$${math}$$")),
        }
    }

    fn push(&mut self, kind: FrameKind, element: Element) {
        self.stack.push(Frame { kind, element });
    }

    fn push_plain(&mut self, element: Element) {
        self.push(FrameKind::Plain, element);
    }

    fn start_tag(&mut self, tag: Tag<'_>, range: Range<usize>) {
        match tag {
            Tag::Paragraph => self.push_plain(Element::new("p").with_attr("class", "pre-line")),
            Tag::Heading { level, .. } => {
                let level = HeadingLevel::from(level);
                let source_text = self.atx_heading_text(range);
                self.push(
                    FrameKind::Heading { level, source_text },
                    Element::new(level.tag()),
                );
            }
            Tag::BlockQuote(_) => self.push_plain(Element::new("blockquote")),
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                self.push(FrameKind::CodeBlock { language }, Element::new("code"));
            }
            Tag::List(Some(start)) => {
                let mut ol = Element::new("ol");
                if start != 1 {
                    ol.set_attr("start", start.to_string());
                }
                self.push_plain(ol);
            }
            Tag::List(None) => self.push_plain(Element::new("ul")),
            Tag::Item => self.push_plain(Element::new("li").with_attr("class", "pre-line")),
            Tag::FootnoteDefinition(name) => self.push_plain(
                Element::new("div")
                    .with_attr("class", "footnote")
                    .with_attr("id", format!("fn-{name}")),
            ),

            Tag::Table(alignments) => {
                self.alignments = alignments;
                self.push(FrameKind::Table, Element::new("table"));
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.cell_index = 0;
                self.push(FrameKind::TableHead, Element::new("tr"));
            }
            Tag::TableRow => {
                self.cell_index = 0;
                self.push_plain(Element::new("tr"));
            }
            Tag::TableCell => {
                let tag = if self.in_table_head { "th" } else { "td" };
                let mut cell = Element::new(tag);
                if let Some(align) = self.alignments.get(self.cell_index).and_then(align_css) {
                    cell.set_attr("style", format!("text-align: {align}"));
                }
                self.cell_index += 1;
                self.push_plain(cell);
            }

            Tag::Emphasis => self.push_plain(Element::new("em")),
            Tag::Strong => self.push_plain(Element::new("strong")),
            Tag::Strikethrough => self.push_plain(Element::new("del")),
            Tag::Superscript => self.push_plain(Element::new("sup")),
            Tag::Subscript => self.push_plain(Element::new("sub")),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut a = self.link_element(&dest_url);
                if !title.is_empty() {
                    a.set_attr("title", title.to_string());
                }
                self.push_plain(a);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let mut img = Element::new("img").with_attr("src", dest_url.to_string());
                if !title.is_empty() {
                    img.set_attr("title", title.to_string());
                }
                self.push(FrameKind::Image, img);
            }

            Tag::DefinitionList => self.push_plain(Element::new("dl")),
            Tag::DefinitionListTitle => self.push_plain(Element::new("dt")),
            Tag::DefinitionListDefinition => self.push_plain(Element::new("dd")),

            // Not enabled, and shown literally if they ever appear
            Tag::HtmlBlock | Tag::MetadataBlock(_) => {
                self.push_plain(Element::new("div").with_attr("class", "pre-line"))
            }
        }
    }

    fn end_tag(&mut self, _tag: TagEnd) {
        let Some(Frame { kind, element }) = self.stack.pop() else {
            return;
        };

        let node = match kind {
            FrameKind::Plain => element,
            FrameKind::Heading { level, source_text } => self.finish_heading(level, source_text, element),
            FrameKind::CodeBlock { language } => self.finish_code_block(language, element),
            FrameKind::Image => self.finish_image(element),
            FrameKind::Table => Element::new("div")
                .with_attr("class", "table-scroll")
                .with_child(element),
            FrameKind::TableHead => {
                self.in_table_head = false;
                Element::new("thead").with_child(element)
            }
        };

        self.add_node(node.into());
    }

    fn finish_heading(
        &mut self,
        level: HeadingLevel,
        source_text: Option<String>,
        element: Element,
    ) -> Element {
        let label = heading_text(&element.text_content());
        let id = slugify(source_text.as_deref().unwrap_or(&label));

        let (heading, anchored) = level.strategy().render(HeadingParts {
            level,
            id: id.clone(),
            label: label.clone(),
            children: element.children,
        });

        if anchored {
            self.headings.push(HeadingAnchor {
                id,
                text: label,
                level,
            });
        }
        heading
    }

    fn finish_code_block(&mut self, language: Option<String>, mut code: Element) -> Element {
        let text = code.text_content();
        let index = self.code_blocks.len();

        if let Some(lang) = &language {
            code.set_attr("class", format!("language-{lang}"));
        }
        self.code_blocks.push(CodeBlock { language, text });

        let copy = Element::new("button")
            .with_attr("type", "button")
            .with_attr("class", "copy-button")
            .with_attr("data-action", "copy")
            .with_attr("data-code-index", index.to_string())
            .with_child(Node::text("Copy"));

        Element::new("div")
            .with_attr("class", "code-block")
            .with_child(Element::new("pre").with_child(code))
            .with_child(copy)
    }

    fn finish_image(&mut self, mut img: Element) -> Element {
        let alt = img.text_content();
        img.children.clear();
        img.set_attr("alt", alt);
        img.set_attr("loading", "lazy");
        img.set_attr("data-action", "preview");
        if let Some(src) = img.attr("src") {
            self.images.push(src.to_string());
        }
        img
    }

    /// Heading text from an ATX source line; `None` for setext headings.
    fn atx_heading_text(&self, range: Range<usize>) -> Option<String> {
        let line = self.source.get(range)?.lines().next()?;
        let (_, raw) = parse_heading_line(line)?;
        Some(heading_text(raw))
    }

    fn link_element(&self, dest: &str) -> Element {
        let target = rewrite_link(dest, self.ctx.language, self.ctx.extension);
        let a = Element::new("a").with_attr("href", target.href());
        match target {
            LinkTarget::External(_) => a
                .with_attr("target", "_blank")
                .with_attr("rel", "noopener noreferrer"),
            LinkTarget::Internal(_) => a.with_attr("data-route", ""),
            LinkTarget::Plain(_) => a,
        }
    }

    fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        // Merge adjacent text so code blocks and alt text stay contiguous
        if let Some(Node::Text(last)) = self.current_children().last_mut() {
            last.push_str(text);
            return;
        }
        self.add_node(Node::text(text));
    }

    fn add_inline_code(&mut self, code: &str) {
        let elem = Element::new("code")
            .with_attr("class", "inline-code")
            .with_child(Node::text(code));
        self.add_node(elem.into());
    }

    fn add_footnote_ref(&mut self, name: &str) {
        let link = Element::new("a")
            .with_attr("href", format!("#fn-{name}"))
            .with_attr("id", format!("fnref-{name}"))
            .with_child(Node::text(format!("[{name}]")));
        let sup = Element::new("sup")
            .with_attr("class", "footnote-ref")
            .with_child(link);
        self.add_node(sup.into());
    }

    fn add_task_marker(&mut self, checked: bool) {
        let mut input = Element::new("input")
            .with_attr("type", "checkbox")
            .with_attr("disabled", "");
        if checked {
            input.set_attr("checked", "");
        }
        self.add_node(input.into());
    }

    fn current_children(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.element.children,
            None => &mut self.root_children,
        }
    }

    /// Add a node to current context (top of stack or root)
    fn add_node(&mut self, node: Node) {
        self.current_children().push(node);
    }
}

fn align_css(align: &Alignment) -> Option<&'static str> {
    match align {
        Alignment::None => None,
        Alignment::Left => Some("left"),
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
    }
}
