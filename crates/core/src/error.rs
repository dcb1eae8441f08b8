use thiserror::Error;

/// Errors raised while selecting a language configuration.
///
/// This is the only caller-visible failure surface of the crate: parser
/// construction can fail on a bad language tag, parsing itself never does.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LanguageError {
    /// The supplied tag does not name a supported language.
    #[error("unknown language tag: {0:?}")]
    UnknownTag(String),
    /// The supplied tag was empty after trimming.
    #[error("empty language tag")]
    EmptyTag,
}
