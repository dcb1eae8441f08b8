//! Link resolution: from the raw interior of `[[...]]` to an outcome.

use crate::language::LanguageConfig;

/// Outcome of resolving the raw interior of a link span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// A cross-reference to another page.
    Page {
        /// Target page identifier, spaces normalized to underscores.
        id: String,
        /// Display text, never empty.
        anchor: String,
    },
    /// A category directive; the value is the category name.
    Category(String),
    /// Malformed, empty, or media link; nothing is emitted.
    Discard,
}

/// Resolve the raw interior of a `[[...]]` span.
///
/// `raw` is everything between the brackets, e.g. `target` or
/// `target|display`. Empty targets and anchors are discarded, category
/// namespace targets are routed to [`Resolved::Category`], and file/image
/// namespace targets are dropped.
///
/// # Examples
///
/// ```
/// use wikitext_core::language::Language;
/// use wikitext_core::link::{resolve, Resolved};
///
/// let config = Language::En.config();
/// assert_eq!(
///     resolve("HTMS Chakri Naruebet", config),
///     Resolved::Page {
///         id: "HTMS_Chakri_Naruebet".to_string(),
///         anchor: "HTMS Chakri Naruebet".to_string(),
///     }
/// );
/// assert_eq!(resolve(" ", config), Resolved::Discard);
/// ```
pub fn resolve(raw: &str, config: &LanguageConfig) -> Resolved {
    let (target, display) = match raw.split_once('|') {
        Some((target, display)) => (target.trim(), Some(display.trim())),
        None => (raw.trim(), None),
    };

    // A leading colon forces a plain link in wiki syntax; strip it before
    // namespace routing.
    let target = target.strip_prefix(':').unwrap_or(target).trim();
    if target.is_empty() {
        return Resolved::Discard;
    }

    // Residual brackets mean the span never balanced cleanly.
    if target.contains('[') || target.contains(']') {
        return Resolved::Discard;
    }

    if let Some((namespace, rest)) = target.split_once(':') {
        let namespace = namespace.trim().to_lowercase();
        if config.category_prefixes.contains(&namespace.as_str()) {
            let name = rest.trim();
            return if name.is_empty() {
                Resolved::Discard
            } else {
                Resolved::Category(name.to_string())
            };
        }
        if config.file_prefixes.contains(&namespace.as_str()) {
            return Resolved::Discard;
        }
    }

    let (page, fragment) = match target.split_once('#') {
        Some((page, fragment)) => (page.trim(), Some(fragment.trim())),
        None => (target, None),
    };
    if page.is_empty() {
        // Same-page section link; there is no target id to record.
        return Resolved::Discard;
    }

    let anchor = match display {
        Some(display) if !display.is_empty() => display.to_string(),
        // No usable display text: fall back to the fragment when the target
        // carries one, otherwise to the page name itself.
        _ => match fragment {
            Some(fragment) if !fragment.is_empty() => fragment.to_string(),
            _ => page.to_string(),
        },
    };
    if anchor.is_empty() {
        return Resolved::Discard;
    }

    Resolved::Page {
        id: page.replace(' ', "_"),
        anchor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn en() -> &'static LanguageConfig {
        Language::En.config()
    }

    fn page(raw: &str) -> (String, String) {
        match resolve(raw, en()) {
            Resolved::Page { id, anchor } => (id, anchor),
            other => panic!("expected page link for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn plain_target_is_its_own_anchor() {
        let (id, anchor) = page("document");
        assert_eq!(id, "document");
        assert_eq!(anchor, "document");
    }

    #[test]
    fn display_text_overrides_anchor() {
        let (id, anchor) = page("Actual page|shown text");
        assert_eq!(id, "Actual_page");
        assert_eq!(anchor, "shown text");
    }

    #[test]
    fn spaces_become_underscores_in_id_only() {
        let (id, anchor) = page("HTMS Chakri Naruebet");
        assert_eq!(id, "HTMS_Chakri_Naruebet");
        assert_eq!(anchor, "HTMS Chakri Naruebet");
    }

    #[test]
    fn empty_interiors_are_discarded() {
        assert_eq!(resolve("", en()), Resolved::Discard);
        assert_eq!(resolve(" ", en()), Resolved::Discard);
        assert_eq!(resolve(" | ", en()), Resolved::Discard);
    }

    #[test]
    fn empty_display_falls_back_to_target() {
        let (id, anchor) = page("Kingdom|");
        assert_eq!(id, "Kingdom");
        assert_eq!(anchor, "Kingdom");
    }

    #[test]
    fn fragment_becomes_default_anchor() {
        let (id, anchor) = page("Physics#Optics");
        assert_eq!(id, "Physics");
        assert_eq!(anchor, "Optics");
    }

    #[test]
    fn fragment_only_target_is_discarded() {
        assert_eq!(resolve("#Optics", en()), Resolved::Discard);
    }

    #[test]
    fn category_namespace_routes_to_category() {
        assert_eq!(
            resolve("Category:Lakes of Italy", en()),
            Resolved::Category("Lakes of Italy".to_string())
        );
        assert_eq!(
            resolve("category:Lakes|sort key", en()),
            Resolved::Category("Lakes".to_string())
        );
        assert_eq!(resolve("Category:", en()), Resolved::Discard);
    }

    #[test]
    fn colon_prefixed_category_still_routes() {
        assert_eq!(
            resolve(":Category:Lakes", en()),
            Resolved::Category("Lakes".to_string())
        );
    }

    #[test]
    fn file_namespace_is_dropped() {
        assert_eq!(resolve("File:Photo.jpg|thumb|caption", en()), Resolved::Discard);
        assert_eq!(resolve("Image:Photo.jpg", en()), Resolved::Discard);
    }

    #[test]
    fn unknown_namespace_is_a_plain_link() {
        let (id, anchor) = page("Wikipedia:Manual of Style");
        assert_eq!(id, "Wikipedia:Manual_of_Style");
        assert_eq!(anchor, "Wikipedia:Manual of Style");
    }

    #[test]
    fn localized_category_prefix() {
        assert_eq!(
            resolve("Categoria:Laghi", Language::It.config()),
            Resolved::Category("Laghi".to_string())
        );
    }

    #[test]
    fn bracket_residue_is_discarded() {
        assert_eq!(resolve("[broken", en()), Resolved::Discard);
    }
}
