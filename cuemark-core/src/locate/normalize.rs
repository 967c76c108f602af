//! Text normalization applied before any phrase/transcript comparison.
//!
//! ## Steps
//!
//! 1. Lowercase.
//! 2. NFKD decomposition, so accented/composed characters compare equal to
//!    their base forms (`é` → `e` + combining mark, `ﬁ` → `fi`).
//! 3. Keep only Unicode letters, digits, and whitespace. Punctuation,
//!    symbols, and the combining marks left over from decomposition are
//!    dropped outright.
//! 4. Collapse whitespace runs to single spaces and trim the ends.
//!
//! The same function runs over the phrase and over every transcript word,
//! so scores are always computed on one consistent representation. An
//! empty result is valid: it means the input had no alphanumeric content.

use unicode_normalization::UnicodeNormalization;

/// Normalize `text` for matching. May return an empty string.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut kept = String::with_capacity(lowered.len());
    for c in lowered.nfkd() {
        if c.is_alphanumeric() {
            kept.push(c);
        } else if c.is_whitespace() {
            kept.push(' ');
        }
    }
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize and split into tokens. Empty inputs yield an empty vec.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize_text(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(normalize_text("The Quick, Brown Fox!"), "the quick brown fox");
    }

    #[test]
    fn decomposes_diacritics_to_base_letters() {
        // Combining marks vanish with the other non-alphanumerics; the
        // hyphen is removed, not spaced, fusing the words around it.
        assert_eq!(normalize_text("Café Déjà-Vu"), "cafe dejavu");
        assert_eq!(normalize_text("naïve résumé"), "naive resume");
    }

    #[test]
    fn expands_compatibility_forms() {
        // NFKD maps the ligature and fullwidth digits to plain ASCII.
        assert_eq!(normalize_text("ﬁre ４２"), "fire 42");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize_text("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn punctuation_only_input_normalizes_to_empty() {
        assert_eq!(normalize_text("!!! … —"), "");
        assert!(tokenize("?!").is_empty());
    }

    #[test]
    fn tokenize_splits_on_whitespace() {
        assert_eq!(tokenize("One, two... THREE"), ["one", "two", "three"]);
    }

    #[test]
    fn apostrophes_are_removed_not_spaced() {
        // Interior punctuation is dropped, fusing the surrounding letters.
        assert_eq!(normalize_text("don't"), "dont");
    }
}
