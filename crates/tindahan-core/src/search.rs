//! # Search Matching
//!
//! Case-insensitive substring matching used by the catalog and ledger
//! search projections. Lowercasing uses Unicode rules, so "ñ" matches "Ñ".
//!
//! Also holds the collation key for name sorting: accents and case are
//! folded away, so "Éclair" sorts between "Donut" and "Flour" as a
//! shopper would expect.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A lowercased, trimmed search needle.
///
/// Built once per search call and tested against many fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Normalizes free text from a search box.
    pub fn new(query: &str) -> Self {
        SearchQuery {
            needle: query.trim().to_lowercase(),
        }
    }

    /// True when the box is empty; an empty query matches everything.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Tests one field.
    pub fn matches(&self, haystack: &str) -> bool {
        self.is_empty() || haystack.to_lowercase().contains(&self.needle)
    }

    /// Tests an optional field; an absent field never matches a non-empty query.
    pub fn matches_opt(&self, haystack: Option<&str>) -> bool {
        match haystack {
            Some(text) => self.matches(text),
            None => self.is_empty(),
        }
    }

    /// The normalized needle.
    pub fn as_str(&self) -> &str {
        &self.needle
    }
}

/// Primary sort key for a display name: NFD-decomposed, combining marks
/// dropped, lowercased.
///
/// ```rust
/// use tindahan_core::search::collation_key;
///
/// assert_eq!(collation_key("Éclair"), "eclair");
/// assert_eq!(collation_key("PIÑA"), "pina");
/// ```
pub fn collation_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Orders two names alphabetically ignoring accents and case.
///
/// Names that fold to the same key fall back to their lowercased form
/// (unaccented before accented) and then to the exact text, so the order
/// is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_substring() {
        let q = SearchQuery::new("  COFFEE ");
        assert_eq!(q.as_str(), "coffee");
        assert!(q.matches("Premium Coffee Beans"));
        assert!(!q.matches("Organic Green Tea"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let q = SearchQuery::new("   ");
        assert!(q.is_empty());
        assert!(q.matches("anything"));
        assert!(q.matches_opt(None));
    }

    #[test]
    fn test_optional_fields() {
        let q = SearchQuery::new("maria");
        assert!(q.matches_opt(Some("Maria Santos")));
        assert!(!q.matches_opt(None));
    }

    #[test]
    fn test_unicode_lowercasing() {
        assert!(SearchQuery::new("PIÑA").matches("piña juice"));
    }

    #[test]
    fn test_collation_key_folds_accents_and_case() {
        assert_eq!(collation_key("Éclair"), "eclair");
        assert_eq!(collation_key("Ñame"), "name");
        assert_eq!(collation_key("Crème Brûlée"), "creme brulee");
    }

    #[test]
    fn test_compare_names_sorts_accented_with_base_letter() {
        let mut names = vec!["Zucchini", "Éclair", "Flour", "ñame", "Mango", "Oil"];
        names.sort_by(|a, b| compare_names(a, b));
        assert_eq!(names, vec!["Éclair", "Flour", "Mango", "ñame", "Oil", "Zucchini"]);
    }

    #[test]
    fn test_compare_names_total_on_folded_ties() {
        assert_eq!(compare_names("Eclair", "eclair"), Ordering::Less);
        assert_eq!(compare_names("Eclair", "Éclair"), Ordering::Less);
        assert_eq!(compare_names("Tea", "Tea"), Ordering::Equal);
    }
}
