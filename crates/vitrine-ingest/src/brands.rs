//! Brand inference from free-text product descriptions.
//!
//! The ERP report has no brand column, so the brand is recovered from the
//! description ("Racao Golden Special Dog 15kg") and then stripped out so the
//! stored name does not repeat it.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use vitrine_core::FALLBACK_BRAND;

/// Known brands in detection order. When several match, the earliest wins.
pub const KNOWN_BRANDS: &[&str] = &[
    "Royal Canin",
    "Premier",
    "Purina",
    "Golden",
    "Whiskas",
    "Pedigree",
    "GranPlus",
    "Pro Plan",
    "Farmina",
    "Biofresh",
    "Hills",
    "N&D",
    "Magnus",
    "Origens",
    "Bayer",
    "Bravecto",
    "NexGard",
    "Simparic",
    "Frontline",
    "Advocate",
    "Zoetis",
];

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static HYPHEN_SPACING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\s*").expect("valid hyphen regex"));

static DEFAULT_MATCHER: LazyLock<BrandMatcher> =
    LazyLock::new(|| BrandMatcher::new(KNOWN_BRANDS));

/// A brand list with its removal patterns compiled once.
pub struct BrandMatcher {
    brands: Vec<CompiledBrand>,
}

struct CompiledBrand {
    name: String,
    lowercase: String,
    pattern: Regex,
}

impl BrandMatcher {
    /// Compiles removal patterns for `brands`, keeping their order.
    #[must_use]
    pub fn new(brands: &[&str]) -> Self {
        let brands = brands
            .iter()
            .filter_map(|&name| {
                let pattern = brand_pattern(name)?;
                Some(CompiledBrand {
                    name: name.to_owned(),
                    lowercase: name.to_lowercase(),
                    pattern,
                })
            })
            .collect();
        Self { brands }
    }

    /// The shared matcher over [`KNOWN_BRANDS`].
    #[must_use]
    pub fn known() -> &'static Self {
        &DEFAULT_MATCHER
    }

    /// Returns the first brand whose name appears in `description`,
    /// case-insensitively, scanning in list order.
    #[must_use]
    pub fn detect(&self, description: &str) -> Option<&str> {
        let haystack = description.to_lowercase();
        self.brands
            .iter()
            .find(|b| haystack.contains(&b.lowercase))
            .map(|b| b.name.as_str())
    }

    /// Replaces every whole-word occurrence of `brand` with a single space.
    ///
    /// Brands outside the list (e.g. a value from the row's `brand` column)
    /// get a pattern compiled on the spot. The fallback brand and blank brands
    /// leave the description untouched.
    #[must_use]
    pub fn remove(&self, description: &str, brand: &str) -> String {
        if brand.trim().is_empty() || brand == FALLBACK_BRAND {
            return description.to_owned();
        }

        if let Some(known) = self.brands.iter().find(|b| b.name == brand) {
            return known.pattern.replace_all(description, " ").into_owned();
        }

        match brand_pattern(brand) {
            Some(pattern) => pattern.replace_all(description, " ").into_owned(),
            None => description.to_owned(),
        }
    }
}

/// Detects a known brand in `description` using [`KNOWN_BRANDS`].
#[must_use]
pub fn detect_brand(description: &str) -> Option<&'static str> {
    BrandMatcher::known().detect(description)
}

/// Removes `brand` from `description` using the shared matcher.
#[must_use]
pub fn remove_brand(description: &str, brand: &str) -> String {
    BrandMatcher::known().remove(description, brand)
}

/// Collapses whitespace runs, tightens `"- "` to `"-"`, and trims.
///
/// Idempotent: cleaning an already-clean name returns it unchanged.
#[must_use]
pub fn clean_name(value: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(value, " ");
    let hyphenated = HYPHEN_SPACING_RE.replace_all(&collapsed, "-");
    hyphenated.trim().to_owned()
}

/// Builds `\bword1\s+word2\b` (case-insensitive) from the words of `brand`.
fn brand_pattern(brand: &str) -> Option<Regex> {
    let words: Vec<String> = brand.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    let source = format!(r"\b{}\b", words.join(r"\s+"));
    match RegexBuilder::new(&source).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(brand, error = %e, "skipping brand — removal pattern did not compile");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // detect_brand
    // -----------------------------------------------------------------------

    #[test]
    fn detects_brand_case_insensitively() {
        assert_eq!(detect_brand("RACAO GOLDEN ADULTO 15KG"), Some("Golden"));
        assert_eq!(detect_brand("racao royal canin mini"), Some("Royal Canin"));
    }

    #[test]
    fn detects_every_known_brand() {
        for &brand in KNOWN_BRANDS {
            let description = format!("Item {} 1kg", brand.to_uppercase());
            assert_eq!(
                BrandMatcher::known().detect(&description),
                Some(brand),
                "{description}"
            );
        }
    }

    #[test]
    fn detection_matches_inside_words() {
        assert_eq!(detect_brand("Racao Premiere Cookies"), Some("Premier"));
    }

    #[test]
    fn earliest_brand_in_list_wins() {
        // "Purina" precedes "Pro Plan" in the list regardless of text position.
        assert_eq!(detect_brand("Pro Plan by Purina Filhote"), Some("Purina"));
    }

    #[test]
    fn no_known_brand_returns_none() {
        assert_eq!(detect_brand("Areia Higienica Pipicat 4kg"), None);
        assert_eq!(detect_brand(""), None);
    }

    // -----------------------------------------------------------------------
    // remove_brand
    // -----------------------------------------------------------------------

    #[test]
    fn removes_brand_with_space() {
        assert_eq!(
            remove_brand("Racao Golden Special Dog 15kg", "Golden"),
            "Racao   Special Dog 15kg"
        );
    }

    #[test]
    fn removes_multi_word_brand_with_irregular_spacing() {
        assert_eq!(
            remove_brand("Racao ROYAL   canin Mini Adult", "Royal Canin"),
            "Racao   Mini Adult"
        );
    }

    #[test]
    fn removes_every_occurrence() {
        assert_eq!(remove_brand("Golden x golden", "Golden"), "  x  ");
    }

    #[test]
    fn does_not_remove_partial_words() {
        assert_eq!(
            remove_brand("Racao Premiere Cookies", "Premier"),
            "Racao Premiere Cookies"
        );
    }

    #[test]
    fn fallback_brand_is_never_stripped() {
        assert_eq!(
            remove_brand("Other Brand Toy", FALLBACK_BRAND),
            "Other Brand Toy"
        );
    }

    #[test]
    fn removes_row_supplied_brand_not_in_list() {
        assert_eq!(
            remove_brand("Areia Pipicat Classic 4kg", "Pipicat"),
            "Areia   Classic 4kg"
        );
    }

    #[test]
    fn escapes_regex_metacharacters_in_brand() {
        assert_eq!(remove_brand("Brinquedo C++ Toy", "C++"), "Brinquedo C++ Toy");
        assert_eq!(remove_brand("Brinquedo (Kong) Toy", "(Kong)"), "Brinquedo (Kong) Toy");
    }

    #[test]
    fn blank_brand_leaves_text() {
        assert_eq!(remove_brand("Coleira", "  "), "Coleira");
    }

    // -----------------------------------------------------------------------
    // clean_name
    // -----------------------------------------------------------------------

    #[test]
    fn clean_name_collapses_whitespace_and_trims() {
        assert_eq!(clean_name("  Racao   Special\tDog 15kg "), "Racao Special Dog 15kg");
    }

    #[test]
    fn clean_name_tightens_hyphens() {
        assert_eq!(clean_name("Racao - Filhote"), "Racao -Filhote");
        assert_eq!(clean_name("Anti-  pulgas"), "Anti-pulgas");
    }

    #[test]
    fn clean_name_is_idempotent() {
        for raw in [
            "  Racao   Golden  ",
            "A -  B - C",
            "Tapete\n\nHigienico",
            "",
            "Already clean",
        ] {
            let once = clean_name(raw);
            assert_eq!(clean_name(&once), once, "{raw:?}");
        }
    }

    #[test]
    fn clean_name_of_whitespace_is_empty() {
        assert_eq!(clean_name("   "), "");
    }
}
