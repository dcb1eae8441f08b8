//! The structure accumulator: spans in, ordered containers out.
//!
//! [`ArticleBuilder`] consumes the scanner's span stream once, left to
//! right, tracking which container is currently open. Link offsets are
//! measured in the output text as it is being built, never in raw markup
//! coordinates, which is what keeps the anchor substring invariants true by
//! construction.

use crate::article::{Link, LinkKind, Section};
use crate::language::LanguageConfig;
use crate::link::{self, Resolved};
use crate::scanner::{self, Span};

/// Which output container is currently receiving text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    None,
    Paragraph,
    ListItem,
}

/// Accumulated page content, before classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    /// Full derived plain text in document order.
    pub clean_text: String,
    /// Body paragraphs; index is the `paragraphId` links refer to.
    pub paragraphs: Vec<String>,
    /// List blocks; outer index `listId`, inner index `listItem`.
    pub lists: Vec<Vec<String>>,
    /// Section headings in document order.
    pub sections: Vec<Section>,
    /// Category names in first-occurrence order, deduplicated.
    pub categories: Vec<String>,
    /// Links in document order.
    pub links: Vec<Link>,
    /// Redirect target in id form, when a redirect directive was seen.
    pub redirect: Option<String>,
}

/// State machine turning a [`Span`] stream into [`PageContent`].
pub struct ArticleBuilder<'c> {
    config: &'c LanguageConfig,
    content: PageContent,
    paragraph: String,
    item: String,
    open: Open,
    in_list: bool,
}

impl<'c> ArticleBuilder<'c> {
    /// Create a builder for one page.
    pub fn new(config: &'c LanguageConfig) -> Self {
        Self {
            config,
            content: PageContent::default(),
            paragraph: String::new(),
            item: String::new(),
            open: Open::None,
            in_list: false,
        }
    }

    /// Consume one span.
    pub fn push(&mut self, span: Span<'_>) {
        match span {
            Span::Text(text) => {
                self.ensure_flow_container();
                append(self.open_buffer(), &text);
            }
            Span::LineBreak => match self.open {
                Open::Paragraph => self.paragraph.push('\n'),
                Open::ListItem => self.flush_item(),
                Open::None => {}
            },
            Span::ParagraphBreak => {
                self.flush_paragraph();
                self.flush_item();
                self.in_list = false;
            }
            Span::ListItem { .. } => {
                self.flush_paragraph();
                self.flush_item();
                if !self.in_list {
                    self.content.lists.push(Vec::new());
                    self.in_list = true;
                }
                self.open = Open::ListItem;
            }
            Span::Heading { level, raw } => {
                self.flush_paragraph();
                self.flush_item();
                self.in_list = false;
                let title = scanner::reduce_fragment(raw, self.config);
                if !title.is_empty() {
                    self.content.clean_text.push_str(&title);
                    self.content.clean_text.push('\n');
                    self.content.sections.push(Section { title, level });
                }
            }
            Span::Link { raw } => match link::resolve(raw, self.config) {
                Resolved::Page { id, anchor } => self.record_link(id, anchor),
                Resolved::Category(name) => {
                    if !self.content.categories.contains(&name) {
                        self.content.categories.push(name);
                    }
                }
                Resolved::Discard => {}
            },
            Span::Redirect { raw } => {
                if self.content.redirect.is_none()
                    && let Resolved::Page { id, .. } = link::resolve(raw, self.config)
                {
                    self.content.redirect = Some(id);
                }
            }
        }
    }

    /// Flush any open container and return the accumulated content.
    pub fn finish(mut self) -> PageContent {
        self.flush_paragraph();
        self.flush_item();
        self.content
    }

    /// Open a body paragraph if nothing is open; a non-list span after list
    /// content also closes the list context.
    fn ensure_flow_container(&mut self) {
        if self.open == Open::None {
            self.in_list = false;
            self.open = Open::Paragraph;
        }
    }

    fn open_buffer(&mut self) -> &mut String {
        match self.open {
            Open::ListItem => &mut self.item,
            // `None` cannot reach here: callers open a container first.
            Open::Paragraph | Open::None => &mut self.paragraph,
        }
    }

    fn record_link(&mut self, id: String, anchor: String) {
        self.ensure_flow_container();
        let kind = match self.open {
            Open::ListItem => match self.content.lists.last() {
                Some(list) => LinkKind::List {
                    list: self.content.lists.len() - 1,
                    item: list.len(),
                },
                // A list item is only open once a list exists; fall back to
                // the paragraph rather than panic on a broken stream.
                None => {
                    self.open = Open::Paragraph;
                    LinkKind::Body {
                        paragraph: self.content.paragraphs.len(),
                    }
                }
            },
            Open::Paragraph | Open::None => LinkKind::Body {
                paragraph: self.content.paragraphs.len(),
            },
        };
        let buffer = self.open_buffer();
        let start = buffer.len();
        buffer.push_str(&anchor);
        let end = buffer.len();
        self.content.links.push(Link::new(id, anchor, start, end, kind));
    }

    fn flush_paragraph(&mut self) {
        if self.open == Open::Paragraph {
            self.open = Open::None;
        }
        trim_end_in_place(&mut self.paragraph);
        if !self.paragraph.is_empty() {
            self.content.clean_text.push_str(&self.paragraph);
            self.content.clean_text.push('\n');
            self.content.paragraphs.push(std::mem::take(&mut self.paragraph));
        }
    }

    fn flush_item(&mut self) {
        if self.open == Open::ListItem {
            self.open = Open::None;
        }
        trim_end_in_place(&mut self.item);
        if !self.item.is_empty() {
            self.content.clean_text.push_str(&self.item);
            self.content.clean_text.push('\n');
            if let Some(list) = self.content.lists.last_mut() {
                list.push(std::mem::take(&mut self.item));
            } else {
                self.item.clear();
            }
        }
    }
}

/// Append a text run, left-trimming when the container is still empty so
/// recorded offsets never start inside stripped indentation.
fn append(buffer: &mut String, text: &str) {
    if buffer.is_empty() {
        buffer.push_str(text.trim_start());
    } else {
        buffer.push_str(text);
    }
}

fn trim_end_in_place(buffer: &mut String) {
    let trimmed = buffer.trim_end().len();
    buffer.truncate(trimmed);
}
