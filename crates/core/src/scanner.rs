//! Markup scanning: discard-block stripping and span tokenization.
//!
//! Scanning runs in two phases, mirroring a preprocess-then-parse pipeline:
//!
//! 1. [`strip_markup`] removes discard blocks — comments, `{{ }}` templates
//!    (recording their names for the page classifier), `{| |}` tables, and
//!    extension-tag regions — as balanced regions, so their interior markup
//!    never leaks into emitted text.
//! 2. [`tokenize`] turns the stripped text into a flat [`Span`] stream in
//!    source order: text runs, line and paragraph breaks, headings, list
//!    markers, link spans, and the redirect directive.
//!
//! Both phases degrade rather than fail: an opener with no matching closer
//! is kept as literal text, and a lone `[[` never produces a link span.

use std::borrow::Cow;

use crate::language::LanguageConfig;
use crate::link::{self, Resolved};

/// Extension tags whose content is discarded wholesale.
const DISCARD_TAGS: &[&str] = &[
    "ref",
    "references",
    "gallery",
    "math",
    "chem",
    "source",
    "syntaxhighlight",
    "code",
    "pre",
    "nowiki",
    "timeline",
    "score",
    "imagemap",
    "hiero",
];

/// One semantic span of the stripped markup, in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Span<'a> {
    /// A plain text run. Owned only when entity decoding rewrote it.
    Text(Cow<'a, str>),
    /// End of a source line inside flowing content.
    LineBreak,
    /// A blank line; closes the open paragraph or list block.
    ParagraphBreak,
    /// A section heading; `raw` is the interior between the `=` runs.
    Heading {
        /// Marker count (`==` is 2), capped at 6.
        level: u8,
        /// Raw heading interior, markup not yet reduced.
        raw: &'a str,
    },
    /// A list-item marker at line start; the item text follows as spans.
    ListItem {
        /// Marker run length (`**` is 2).
        depth: u8,
    },
    /// The interior of a `[[...]]` span, nested brackets balanced.
    Link {
        /// Raw interior, e.g. `target|display`.
        raw: &'a str,
    },
    /// The target interior of a leading redirect directive.
    Redirect {
        /// Raw interior of the directive's `[[...]]`.
        raw: &'a str,
    },
}

/// Result of the discard-stripping phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedText {
    /// The markup with discard blocks removed.
    pub text: String,
    /// Lowercased names of the templates that were stripped, in order.
    pub templates: Vec<String>,
}

/// Strip discard blocks from raw wikitext.
///
/// Comments, templates, tables, and extension-tag regions are removed as
/// balanced regions. Template names are recorded for the page classifier.
/// Unbalanced openers are kept as literal text.
pub fn strip_markup(src: &str) -> StrippedText {
    let mut text = String::with_capacity(src.len());
    let mut templates = Vec::new();
    let mut rest = src;

    while let Some(idx) = rest.find(['<', '{']) {
        text.push_str(&rest[..idx]);
        let tail = &rest[idx..];

        if let Some(after) = tail.strip_prefix("<!--") {
            match after.find("-->") {
                Some(end) => rest = &after[end + 3..],
                None => {
                    log::debug!("unterminated comment, keeping remainder as text");
                    text.push_str("<!--");
                    rest = after;
                }
            }
        } else if tail.starts_with("{{") {
            match find_balanced(tail, "{{", "}}") {
                Some(end) => {
                    record_template_name(&tail[2..end - 2], &mut templates);
                    rest = &tail[end..];
                }
                None => {
                    log::debug!("unbalanced template opener, keeping as text");
                    text.push_str("{{");
                    rest = &tail[2..];
                }
            }
        } else if tail.starts_with("{|") {
            match find_balanced(tail, "{|", "|}") {
                Some(end) => rest = &tail[end..],
                None => {
                    log::debug!("unbalanced table opener, keeping as text");
                    text.push_str("{|");
                    rest = &tail[2..];
                }
            }
        } else if tail.starts_with('<') {
            match parse_open_tag(tail) {
                Some((name, open_len, self_closing))
                    if DISCARD_TAGS.contains(&name.as_str()) =>
                {
                    let after_open = &tail[open_len..];
                    if self_closing {
                        rest = after_open;
                    } else if let Some(end) = find_close_tag(after_open, &name) {
                        rest = &after_open[end..];
                    } else {
                        log::debug!("unclosed <{name}> block, keeping as text");
                        text.push('<');
                        rest = &tail[1..];
                    }
                }
                // Generic HTML tags survive this phase; the inline scanner
                // strips them while keeping their content.
                _ => {
                    text.push('<');
                    rest = &tail[1..];
                }
            }
        } else {
            text.push('{');
            rest = &tail[1..];
        }
    }

    text.push_str(rest);
    StrippedText { text, templates }
}

fn record_template_name(interior: &str, templates: &mut Vec<String>) {
    let name = interior
        .split(['|', ':', '\n'])
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    if !name.is_empty() {
        templates.push(name);
    }
}

/// Find the end of a balanced region, given `s` starting with `open`.
///
/// Returns the byte index just past the matching closer, or `None` when the
/// region never closes.
fn find_balanced(s: &str, open: &str, close: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = open.len();
    while depth > 0 {
        let next_close = s[pos..].find(close)?;
        match s[pos..].find(open) {
            Some(next_open) if next_open < next_close => {
                depth += 1;
                pos += next_open + open.len();
            }
            _ => {
                depth -= 1;
                pos += next_close + close.len();
            }
        }
    }
    Some(pos)
}

/// Parse an opening tag at the start of `s`.
///
/// Returns `(lowercase name, opening tag length, self_closing)`. Closing
/// tags (`</...`) and non-tags return `None`.
fn parse_open_tag(s: &str) -> Option<(String, usize, bool)> {
    let rest = s.strip_prefix('<')?;
    let first = rest.chars().next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    let gt = rest.find('>')?;
    let self_closing = rest[..gt].trim_end().ends_with('/');
    Some((name, gt + 2, self_closing))
}

/// Find the end of `</name>` (case-insensitive, optional inner whitespace).
///
/// Returns the byte index just past the closing `>`.
fn find_close_tag(s: &str, name: &str) -> Option<usize> {
    let mut pos = 0;
    while let Some(i) = s[pos..].find('<') {
        let at = pos + i;
        if let Some(after_slash) = s[at + 1..].strip_prefix('/')
            && after_slash.len() >= name.len()
            && after_slash.is_char_boundary(name.len())
            && after_slash[..name.len()].eq_ignore_ascii_case(name)
            && let Some(after_gt) = after_slash[name.len()..].trim_start().strip_prefix('>')
        {
            return Some(s.len() - after_gt.len());
        }
        pos = at + 1;
    }
    None
}

/// Tokenize stripped wikitext into a span stream.
pub fn tokenize<'a>(text: &'a str, config: &LanguageConfig) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    let mut seen_content = false;

    for raw_line in text.lines() {
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            spans.push(Span::ParagraphBreak);
            continue;
        }

        if !seen_content {
            seen_content = true;
            if let Some(raw) = redirect_target(line, config) {
                spans.push(Span::Redirect { raw });
                continue;
            }
        }

        if let Some((level, raw)) = heading_of(line) {
            spans.push(Span::Heading { level, raw });
            continue;
        }

        let marker = line
            .bytes()
            .take_while(|b| matches!(b, b'*' | b'#' | b';' | b':'))
            .count();
        if marker > 0 {
            spans.push(Span::ListItem {
                depth: marker.min(u8::MAX as usize) as u8,
            });
            scan_inline(line[marker..].trim_start(), &mut spans);
            spans.push(Span::LineBreak);
            continue;
        }

        scan_inline(line, &mut spans);
        spans.push(Span::LineBreak);
    }

    spans
}

/// Recognize a heading line: `=` runs of matching length on both ends.
///
/// Requires at least two markers per side; mismatched runs use the shorter
/// side; the level is capped at 6.
fn heading_of(line: &str) -> Option<(u8, &str)> {
    let s = line.trim();
    if !s.starts_with('=') {
        return None;
    }
    let lead = s.bytes().take_while(|b| *b == b'=').count();
    if lead == s.len() {
        return None;
    }
    let trail = s.bytes().rev().take_while(|b| *b == b'=').count();
    let run = lead.min(trail);
    if run < 2 || s.len() <= run * 2 {
        return None;
    }
    let interior = s[run..s.len() - run].trim();
    if interior.is_empty() {
        return None;
    }
    Some((run.min(6) as u8, interior))
}

/// Recognize a redirect directive on the first content line.
///
/// Matches `#KEYWORD [[target]]` with an optional colon after the keyword,
/// case-insensitively against the locale's redirect keywords.
fn redirect_target<'a>(line: &'a str, config: &LanguageConfig) -> Option<&'a str> {
    let after_hash = line.trim_start().strip_prefix('#')?;
    for keyword in config.redirect_keywords {
        if let Some(after) = strip_prefix_ci(after_hash, keyword) {
            // Keyword must end at a word boundary.
            if after.chars().next().is_some_and(|c| c.is_alphanumeric()) {
                continue;
            }
            let at = after.find("[[")?;
            let tail = &after[at..];
            let end = find_balanced(tail, "[[", "]]")?;
            return Some(&tail[2..end - 2]);
        }
    }
    None
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let mut rest = s;
    for expected in prefix.chars() {
        let c = rest.chars().next()?;
        if !c.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        rest = &rest[c.len_utf8()..];
    }
    Some(rest)
}

/// Scan the inline content of one line, pushing text and link spans.
///
/// Handles `[[...]]` with nested brackets, external `[url label]` links
/// (reduced to their label), `''`/`'''` quote runs (stripped), residual
/// HTML tags (stripped, content kept), and a small entity table.
pub fn scan_inline<'a>(line: &'a str, out: &mut Vec<Span<'a>>) {
    let mut rest = line;
    loop {
        let Some(i) = rest.find(['[', '\'', '<', '&']) else {
            if !rest.is_empty() {
                out.push(Span::Text(Cow::Borrowed(rest)));
            }
            return;
        };
        if i > 0 {
            out.push(Span::Text(Cow::Borrowed(&rest[..i])));
        }
        let tail = &rest[i..];

        if tail.starts_with("[[") {
            match find_balanced(tail, "[[", "]]") {
                Some(end) => {
                    out.push(Span::Link {
                        raw: &tail[2..end - 2],
                    });
                    rest = &tail[end..];
                }
                None => {
                    out.push(Span::Text(Cow::Borrowed("[[")));
                    rest = &tail[2..];
                }
            }
        } else if tail.starts_with('[') {
            match external_link(tail) {
                Some((label, len)) => {
                    if let Some(label) = label {
                        out.push(Span::Text(Cow::Borrowed(label)));
                    }
                    rest = &tail[len..];
                }
                None => {
                    out.push(Span::Text(Cow::Borrowed("[")));
                    rest = &tail[1..];
                }
            }
        } else if tail.starts_with('\'') {
            let run = tail.bytes().take_while(|b| *b == b'\'').count();
            if run >= 2 {
                rest = &tail[run..];
            } else {
                out.push(Span::Text(Cow::Borrowed("'")));
                rest = &tail[1..];
            }
        } else if tail.starts_with('&') {
            match decode_entity(tail) {
                Some((decoded, len)) => {
                    out.push(Span::Text(Cow::Borrowed(decoded)));
                    rest = &tail[len..];
                }
                None => {
                    out.push(Span::Text(Cow::Borrowed("&")));
                    rest = &tail[1..];
                }
            }
        } else {
            match html_tag_len(tail) {
                Some(len) => rest = &tail[len..],
                None => {
                    out.push(Span::Text(Cow::Borrowed("<")));
                    rest = &tail[1..];
                }
            }
        }
    }
}

/// Recognize an external link `[protocol... label]` at the start of `tail`.
///
/// Returns `(label, total length)`; the label is `None` for bare URLs.
fn external_link(tail: &str) -> Option<(Option<&str>, usize)> {
    const PROTOCOLS: &[&str] = &[
        "http://", "https://", "ftp://", "ftps://", "//", "mailto:", "news:", "irc://",
    ];
    let close = tail.find(']')?;
    let interior = &tail[1..close];
    if !PROTOCOLS.iter().any(|p| {
        interior.is_char_boundary(p.len()) && interior[..p.len()].eq_ignore_ascii_case(p)
    }) {
        return None;
    }
    let label = interior
        .split_once(char::is_whitespace)
        .map(|(_, label)| label.trim())
        .filter(|label| !label.is_empty());
    Some((label, close + 1))
}

/// Decode an HTML entity at the start of `tail`.
fn decode_entity(tail: &str) -> Option<(&'static str, usize)> {
    const ENTITIES: &[(&str, &str)] = &[
        ("&amp;", "&"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&apos;", "'"),
        ("&nbsp;", " "),
        ("&ndash;", "\u{2013}"),
        ("&mdash;", "\u{2014}"),
    ];
    ENTITIES
        .iter()
        .find(|(entity, _)| tail.starts_with(entity))
        .map(|(entity, decoded)| (*decoded, entity.len()))
}

/// Length of a residual HTML tag at the start of `tail`, if any.
fn html_tag_len(tail: &str) -> Option<usize> {
    let rest = tail.strip_prefix('<')?;
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    if !rest.chars().next()?.is_ascii_alphabetic() {
        return None;
    }
    tail.find('>').map(|gt| gt + 1)
}

/// Reduce a markup fragment (e.g. a heading interior) to plain text.
///
/// Links collapse to their anchor text; quote runs, tags, and entities are
/// handled as in [`scan_inline`]. No link records are produced.
pub fn reduce_fragment(raw: &str, config: &LanguageConfig) -> String {
    let mut spans = Vec::new();
    scan_inline(raw, &mut spans);
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text(text) => out.push_str(&text),
            Span::Link { raw } => {
                if let Resolved::Page { anchor, .. } = link::resolve(raw, config) {
                    out.push_str(&anchor);
                }
            }
            _ => {}
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn en() -> &'static LanguageConfig {
        Language::En.config()
    }

    #[test]
    fn strips_comments_templates_and_tables() {
        let stripped = strip_markup("a <!-- hidden --> b {{Infobox|x=1}} c {| class=\"t\"\n|cell\n|} d");
        assert_eq!(stripped.text, "a  b  c  d");
        assert_eq!(stripped.templates, vec!["infobox".to_string()]);
    }

    #[test]
    fn strips_nested_templates_once() {
        let stripped = strip_markup("x {{outer|{{inner}}}} y");
        assert_eq!(stripped.text, "x  y");
        assert_eq!(stripped.templates, vec!["outer".to_string()]);
    }

    #[test]
    fn unbalanced_template_degrades_to_text() {
        let stripped = strip_markup("before {{never closed");
        assert_eq!(stripped.text, "before {{never closed");
        assert!(stripped.templates.is_empty());
    }

    #[test]
    fn strips_ref_blocks_and_self_closing_refs() {
        let stripped = strip_markup("a<ref>some citation</ref> b<ref name=\"x\"/> c");
        assert_eq!(stripped.text, "a b c");
    }

    #[test]
    fn unclosed_ref_degrades_to_text() {
        let stripped = strip_markup("a <ref>dangling");
        assert_eq!(stripped.text, "a <ref>dangling");
    }

    #[test]
    fn keeps_generic_html_for_inline_pass() {
        let stripped = strip_markup("a <b>bold</b> c");
        assert_eq!(stripped.text, "a <b>bold</b> c");
    }

    #[test]
    fn close_tag_search_is_case_insensitive() {
        let stripped = strip_markup("a<REF>cite</Ref>b");
        assert_eq!(stripped.text, "ab");
    }

    #[test]
    fn heading_detection() {
        assert_eq!(heading_of("== Title =="), Some((2, "Title")));
        assert_eq!(heading_of("=== T ==="), Some((3, "T")));
        // Mismatched runs use the shorter side; the surplus marker stays.
        assert_eq!(heading_of("== T ==="), Some((2, "T =")));
        assert_eq!(heading_of("= not a heading ="), None);
        assert_eq!(heading_of("===="), None);
        assert_eq!(heading_of("plain text"), None);
    }

    #[test]
    fn tokenizes_paragraphs_and_lists() {
        let spans = tokenize("First line.\n\n* item one\n* item two", en());
        assert!(spans.contains(&Span::ParagraphBreak));
        let markers = spans
            .iter()
            .filter(|s| matches!(s, Span::ListItem { .. }))
            .count();
        assert_eq!(markers, 2);
    }

    #[test]
    fn redirect_only_matches_first_content_line() {
        let spans = tokenize("#REDIRECT [[Other page]]", en());
        assert_eq!(spans, vec![Span::Redirect { raw: "Other page" }]);

        // Later in the document the same text is a numbered list item.
        let spans = tokenize("Intro.\n#REDIRECT [[Other page]]", en());
        assert!(!spans.iter().any(|s| matches!(s, Span::Redirect { .. })));
    }

    #[test]
    fn redirect_keyword_is_case_insensitive_and_allows_colon() {
        let spans = tokenize("#redirect: [[Target]]", en());
        assert_eq!(spans, vec![Span::Redirect { raw: "Target" }]);
    }

    #[test]
    fn inline_links_and_text_runs() {
        let mut spans = Vec::new();
        scan_inline("Lorem [[document|document]] ipsum", &mut spans);
        assert_eq!(
            spans,
            vec![
                Span::Text(Cow::Borrowed("Lorem ")),
                Span::Link {
                    raw: "document|document"
                },
                Span::Text(Cow::Borrowed(" ipsum")),
            ]
        );
    }

    #[test]
    fn nested_brackets_stay_in_one_link_span() {
        let mut spans = Vec::new();
        scan_inline("[[File:x.jpg|a [[cat]] photo]] end", &mut spans);
        assert_eq!(
            spans,
            vec![
                Span::Link {
                    raw: "File:x.jpg|a [[cat]] photo"
                },
                Span::Text(Cow::Borrowed(" end")),
            ]
        );
    }

    #[test]
    fn lone_open_bracket_is_literal_text() {
        let mut spans = Vec::new();
        scan_inline("a [[ b", &mut spans);
        assert_eq!(
            spans,
            vec![
                Span::Text(Cow::Borrowed("a ")),
                Span::Text(Cow::Borrowed("[[")),
                Span::Text(Cow::Borrowed(" b")),
            ]
        );
    }

    #[test]
    fn external_links_reduce_to_label() {
        let mut spans = Vec::new();
        scan_inline("see [http://example.com the site] here", &mut spans);
        assert_eq!(
            spans,
            vec![
                Span::Text(Cow::Borrowed("see ")),
                Span::Text(Cow::Borrowed("the site")),
                Span::Text(Cow::Borrowed(" here")),
            ]
        );

        // Bare URLs disappear entirely.
        let mut spans = Vec::new();
        scan_inline("a [https://example.com] b", &mut spans);
        assert_eq!(
            spans,
            vec![
                Span::Text(Cow::Borrowed("a ")),
                Span::Text(Cow::Borrowed(" b")),
            ]
        );
    }

    #[test]
    fn quote_runs_are_stripped() {
        let mut spans = Vec::new();
        scan_inline("'''bold''' and ''italic''", &mut spans);
        let flat: String = spans
            .iter()
            .map(|s| match s {
                Span::Text(t) => t.as_ref(),
                _ => "",
            })
            .collect();
        assert_eq!(flat, "bold and italic");
    }

    #[test]
    fn entities_are_decoded() {
        let mut spans = Vec::new();
        scan_inline("Tom &amp; Jerry&nbsp;show", &mut spans);
        let flat: String = spans
            .iter()
            .map(|s| match s {
                Span::Text(t) => t.as_ref(),
                _ => "",
            })
            .collect();
        assert_eq!(flat, "Tom & Jerry show");
    }

    #[test]
    fn residual_html_tags_are_stripped_inline() {
        let mut spans = Vec::new();
        scan_inline("a <b>bold</b> c, 1 < 2", &mut spans);
        let flat: String = spans
            .iter()
            .map(|s| match s {
                Span::Text(t) => t.as_ref(),
                _ => "",
            })
            .collect();
        assert_eq!(flat, "a bold c, 1 < 2");
    }

    #[test]
    fn reduce_fragment_collapses_links_to_anchors() {
        assert_eq!(
            reduce_fragment(" The [[Sun|sun]] and ''moon'' ", en()),
            "The sun and moon"
        );
    }
}
