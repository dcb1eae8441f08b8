//! The parse entry point tying scanner, resolver, accumulator, and
//! classifier together.

use crate::article::Article;
use crate::builder::ArticleBuilder;
use crate::classifier;
use crate::error::LanguageError;
use crate::language::{Language, LanguageConfig};
use crate::scanner;

/// Parses raw wikitext into [`Article`]s for one configured language.
///
/// The parser holds only the immutable locale tables, so a single instance
/// can be shared freely across threads; every call to [`parse`] is an
/// independent, synchronous, single-pass transformation.
///
/// [`parse`]: ArticleParser::parse
///
/// # Examples
///
/// ```
/// use wikitext_core::{ArticleParser, Language};
///
/// let parser = ArticleParser::new(Language::En);
/// let article = parser.parse("Lorem [[document|document]] ipsum");
/// assert_eq!(article.links().len(), 1);
/// assert_eq!(article.paragraphs()[0], "Lorem document ipsum");
/// ```
#[derive(Debug, Clone)]
pub struct ArticleParser {
    language: Language,
    config: &'static LanguageConfig,
}

impl ArticleParser {
    /// Create a parser for a known language.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            config: language.config(),
        }
    }

    /// Create a parser from a language tag such as `"en"`.
    ///
    /// This is the crate's only failure surface: an unknown tag errors
    /// here, before any parsing happens.
    pub fn from_tag(tag: &str) -> Result<Self, LanguageError> {
        Ok(Self::new(Language::from_tag(tag)?))
    }

    /// The language this parser was built for.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Parse one page of wikitext into an [`Article`].
    ///
    /// Never fails: malformed markup degrades by omission (fewer links,
    /// fewer categories), and garbled input yields a best-effort article.
    pub fn parse(&self, wikitext: &str) -> Article {
        let stripped = scanner::strip_markup(wikitext);
        let mut builder = ArticleBuilder::new(self.config);
        for span in scanner::tokenize(&stripped.text, self.config) {
            builder.push(span);
        }
        let content = builder.finish();
        let disambiguation =
            classifier::is_disambiguation(&stripped.templates, &content.categories, self.config);

        log::debug!(
            "parsed {} bytes: {} paragraphs, {} lists, {} sections, {} links, {} categories",
            wikitext.len(),
            content.paragraphs.len(),
            content.lists.len(),
            content.sections.len(),
            content.links.len(),
            content.categories.len(),
        );

        Article::new(
            content.clean_text,
            content.paragraphs,
            content.lists,
            content.sections,
            content.categories,
            content.links,
            content.redirect,
            disambiguation,
        )
    }
}
