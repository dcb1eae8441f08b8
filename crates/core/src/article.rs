//! The parse result: articles, links, and sections.
//!
//! An [`Article`] is immutable after construction. All offsets recorded in
//! [`Link`]s are byte offsets into the derived container strings, so
//! `&article.paragraphs()[p][start..end]` always equals the link's anchor.

use serde::{Deserialize, Serialize};

/// Container coordinates for a link, tagged by container kind.
///
/// Serialized with a `type` tag of `"BODY"` or `"LIST"`, matching the
/// coordinate fields the container kind makes meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum LinkKind {
    /// A link inside a body paragraph.
    Body {
        /// Index into [`Article::paragraphs`].
        #[serde(rename = "paragraphId")]
        paragraph: usize,
    },
    /// A link inside a list item.
    List {
        /// Index into [`Article::lists`].
        #[serde(rename = "listId")]
        list: usize,
        /// Index of the item within its list.
        #[serde(rename = "listItem")]
        item: usize,
    },
}

/// One cross-reference extracted from the markup.
///
/// `id` is the target page identifier (spaces normalized to underscores),
/// `anchor` the display text as it appears in the derived plain text. Both
/// are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    id: String,
    anchor: String,
    start: usize,
    end: usize,
    #[serde(flatten)]
    kind: LinkKind,
}

impl Link {
    pub(crate) fn new(id: String, anchor: String, start: usize, end: usize, kind: LinkKind) -> Self {
        Self {
            id,
            anchor,
            start,
            end,
            kind,
        }
    }

    /// Target page identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display text of the link in the derived text.
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// Byte offset where the anchor starts in its container.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset just past the anchor in its container.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Container coordinates.
    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    /// Paragraph index, when this is a body link.
    pub fn paragraph_id(&self) -> Option<usize> {
        match self.kind {
            LinkKind::Body { paragraph } => Some(paragraph),
            LinkKind::List { .. } => None,
        }
    }

    /// `(listId, listItem)` coordinates, when this is a list link.
    pub fn list_coordinates(&self) -> Option<(usize, usize)> {
        match self.kind {
            LinkKind::Body { .. } => None,
            LinkKind::List { list, item } => Some((list, item)),
        }
    }
}

/// A section heading encountered in the markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text with surrounding markup reduced.
    pub title: String,
    /// Heading marker count (`==` is 2), capped at 6.
    pub level: u8,
}

/// The structured result of parsing one page of wikitext.
///
/// Produced by [`crate::parser::ArticleParser::parse`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    clean_text: String,
    paragraphs: Vec<String>,
    lists: Vec<Vec<String>>,
    sections: Vec<Section>,
    categories: Vec<String>,
    links: Vec<Link>,
    redirect: Option<String>,
    disambiguation: bool,
}

impl Article {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        clean_text: String,
        paragraphs: Vec<String>,
        lists: Vec<Vec<String>>,
        sections: Vec<Section>,
        categories: Vec<String>,
        links: Vec<Link>,
        redirect: Option<String>,
        disambiguation: bool,
    ) -> Self {
        Self {
            clean_text,
            paragraphs,
            lists,
            sections,
            categories,
            links,
            redirect,
            disambiguation,
        }
    }

    /// Full derived plain text, in document order.
    pub fn clean_text(&self) -> &str {
        &self.clean_text
    }

    /// Body paragraphs; the index is the `paragraphId` links refer to.
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// List blocks; outer index is `listId`, inner index `listItem`.
    pub fn lists(&self) -> &[Vec<String>] {
        &self.lists
    }

    /// Section headings in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Category names in order of first occurrence, deduplicated.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Extracted links in document order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Whether the page is a redirect.
    pub fn is_redirect(&self) -> bool {
        self.redirect.is_some()
    }

    /// Redirect target in id form, when the page is a redirect.
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    /// Whether the page is a disambiguation page.
    pub fn is_disambiguation(&self) -> bool {
        self.disambiguation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article::new(
            "Hello world\n".to_string(),
            vec!["Hello world".to_string()],
            vec![],
            vec![],
            vec!["Greetings".to_string()],
            vec![Link::new(
                "world".to_string(),
                "world".to_string(),
                6,
                11,
                LinkKind::Body { paragraph: 0 },
            )],
            None,
            false,
        )
    }

    #[test]
    fn link_accessors_follow_kind() {
        let body = Link::new("a".into(), "a".into(), 0, 1, LinkKind::Body { paragraph: 3 });
        assert_eq!(body.paragraph_id(), Some(3));
        assert_eq!(body.list_coordinates(), None);

        let list = Link::new("a".into(), "a".into(), 0, 1, LinkKind::List { list: 1, item: 2 });
        assert_eq!(list.paragraph_id(), None);
        assert_eq!(list.list_coordinates(), Some((1, 2)));
    }

    #[test]
    fn serializes_with_container_tag() {
        let article = sample();
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["cleanText"], "Hello world\n");
        assert_eq!(json["links"][0]["type"], "BODY");
        assert_eq!(json["links"][0]["paragraphId"], 0);
        assert_eq!(json["links"][0]["start"], 6);
        assert!(json["links"][0].get("listId").is_none());
    }

    #[test]
    fn json_round_trip_preserves_equality() {
        let article = sample();
        let json = serde_json::to_string(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back, article);
    }
}
