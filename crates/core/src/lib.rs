#![deny(missing_docs)]
//! Wikitext core: markup scanning, link extraction, and article assembly.
//!
//! Raw MediaWiki-style markup goes in, a structured [`Article`] comes out:
//! clean text, paragraphs, lists, section headings, categories, links with
//! exact byte offsets into the derived text, and redirect/disambiguation
//! classification. Malformed markup never fails a parse; it degrades by
//! omission.

/// The Article aggregate and link/section types.
pub mod article;
/// Span-stream accumulation into ordered containers.
pub mod builder;
/// Redirect and disambiguation classification.
pub mod classifier;
/// Configuration error types.
pub mod error;
/// Locale keyword tables.
pub mod language;
/// Link resolution from raw `[[...]]` interiors.
pub mod link;
/// The parse entry point.
pub mod parser;
/// Discard stripping and span tokenization.
pub mod scanner;

pub use article::{Article, Link, LinkKind, Section};
pub use error::LanguageError;
pub use language::{Language, LanguageConfig};
pub use parser::ArticleParser;

pub use builder::{ArticleBuilder, PageContent};
pub use link::{Resolved, resolve};
pub use scanner::{Span, StrippedText, scan_inline, strip_markup, tokenize};
