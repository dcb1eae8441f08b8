//! Locale keyword tables for wikitext parsing.
//!
//! Everything locale-specific lives here as plain data: redirect keyword
//! spellings, category and file namespace prefixes, and the template and
//! category markers that flag disambiguation pages. The parser itself never
//! branches on a language, it only consults these tables, so adding a locale
//! is additive.

use crate::error::LanguageError;
use serde::{Deserialize, Serialize};

/// Supported wiki languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English Wikipedia.
    En,
    /// Simple English Wikipedia.
    Simple,
    /// Italian Wikipedia.
    It,
    /// German Wikipedia.
    De,
    /// Spanish Wikipedia.
    Es,
    /// French Wikipedia.
    Fr,
}

impl Language {
    /// Resolve a language tag (`"en"`, `"simple"`, `"it"`, ...).
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use wikitext_core::language::Language;
    ///
    /// assert_eq!(Language::from_tag("en").unwrap(), Language::En);
    /// assert!(Language::from_tag("zz").is_err());
    /// ```
    pub fn from_tag(tag: &str) -> Result<Language, LanguageError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(LanguageError::EmptyTag);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "simple" => Ok(Language::Simple),
            "it" => Ok(Language::It),
            "de" => Ok(Language::De),
            "es" => Ok(Language::Es),
            "fr" => Ok(Language::Fr),
            _ => Err(LanguageError::UnknownTag(trimmed.to_string())),
        }
    }

    /// The canonical tag for this language.
    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Simple => "simple",
            Language::It => "it",
            Language::De => "de",
            Language::Es => "es",
            Language::Fr => "fr",
        }
    }

    /// The keyword tables for this language.
    pub fn config(self) -> &'static LanguageConfig {
        match self {
            // Simple English uses the English tables.
            Language::En | Language::Simple => &EN,
            Language::It => &IT,
            Language::De => &DE,
            Language::Es => &ES,
            Language::Fr => &FR,
        }
    }
}

/// Keyword tables consulted by the scanner, resolver, and classifier.
///
/// All entries are stored lowercase except `redirect_keywords`, which are
/// matched case-insensitively against the source anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Redirect directive keywords (`#REDIRECT [[...]]` spellings).
    pub redirect_keywords: &'static [&'static str],
    /// Namespace prefixes that route a link to the category list.
    pub category_prefixes: &'static [&'static str],
    /// Namespace prefixes whose links are dropped entirely (media inclusions).
    pub file_prefixes: &'static [&'static str],
    /// Template names that mark a page as a disambiguation page.
    pub disambiguation_templates: &'static [&'static str],
    /// Substrings of category names that mark a disambiguation page.
    pub disambiguation_categories: &'static [&'static str],
}

static EN: LanguageConfig = LanguageConfig {
    redirect_keywords: &["REDIRECT"],
    category_prefixes: &["category"],
    file_prefixes: &["file", "image", "media"],
    disambiguation_templates: &[
        "disambiguation",
        "disambig",
        "disamb",
        "dab",
        "hndis",
        "geodis",
        "numberdis",
        "mathdab",
        "roaddis",
        "schooldis",
        "shipindex",
        "mountainindex",
        "surname",
        "given name",
    ],
    disambiguation_categories: &["disambiguation"],
};

static IT: LanguageConfig = LanguageConfig {
    redirect_keywords: &["REDIRECT", "RINVIA"],
    category_prefixes: &["categoria", "category"],
    file_prefixes: &["file", "immagine", "image", "media"],
    disambiguation_templates: &["disambigua", "disambiguazione"],
    disambiguation_categories: &["disambigua"],
};

static DE: LanguageConfig = LanguageConfig {
    redirect_keywords: &["REDIRECT", "WEITERLEITUNG"],
    category_prefixes: &["kategorie", "category"],
    file_prefixes: &["datei", "bild", "file", "image", "media"],
    disambiguation_templates: &["begriffsklärung", "begriffsklaerung"],
    disambiguation_categories: &["begriffsklärung"],
};

static ES: LanguageConfig = LanguageConfig {
    redirect_keywords: &["REDIRECT", "REDIRECCIÓN", "REDIRECCION"],
    category_prefixes: &["categoría", "categoria", "category"],
    file_prefixes: &["archivo", "imagen", "file", "image", "media"],
    disambiguation_templates: &["desambiguación", "desambiguacion"],
    disambiguation_categories: &["desambiguación"],
};

static FR: LanguageConfig = LanguageConfig {
    redirect_keywords: &["REDIRECT", "REDIRECTION"],
    category_prefixes: &["catégorie", "categorie", "category"],
    file_prefixes: &["fichier", "image", "file", "media"],
    disambiguation_templates: &["homonymie", "homonyme"],
    disambiguation_categories: &["homonymie"],
};
