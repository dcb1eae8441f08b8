//! Page classification from scanned directives and markers.
//!
//! Redirect status comes straight from the accumulator (the redirect
//! directive is a scanner concern); disambiguation status is a lookup
//! against the locale's configured template and category markers.

use crate::language::LanguageConfig;

/// Decide whether a page is a disambiguation page.
///
/// `template_names` are the lowercased names recorded while stripping
/// discard blocks; `categories` the accumulated category names. A match on
/// either marker table flags the page.
pub fn is_disambiguation(
    template_names: &[String],
    categories: &[String],
    config: &LanguageConfig,
) -> bool {
    if template_names
        .iter()
        .any(|name| config.disambiguation_templates.contains(&name.as_str()))
    {
        return true;
    }
    categories.iter().any(|category| {
        let lowered = category.to_lowercase();
        config
            .disambiguation_categories
            .iter()
            .any(|marker| lowered.contains(marker))
    })
}
