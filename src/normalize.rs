//! Canonical key derivation.
//!
//! One normalization rule serves every comparison in the crate: building
//! delete keys, looking up candidates, matching protected terms, and
//! deduplicating dictionary rows at load. The rule is Unicode simple
//! (one-to-one) lowercasing followed by whitespace elision, applied to raw
//! code points (no NFC/NFD). Punctuation is preserved: `"IL-6"` keys as
//! `"il-6"`, not `"il6"`.

/// Derive the normalized matching key for `text`.
///
/// Lowercases, then drops every code point with the Unicode `White_Space`
/// property, so `"New York"` and `"newyork"` share the key `"newyork"`.
///
/// May return an empty string (e.g. for all-whitespace input); callers must
/// treat empty as "no key".
pub fn key(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    key_into(text, &mut out);
    out
}

/// Like [`key`], but writes into an existing `String`.
///
/// `out` is cleared first. Useful when deriving keys in a loop.
pub fn key_into(text: &str, out: &mut String) {
    out.clear();
    out.reserve(text.len());
    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        out.push(simple_lower(c));
    }
}

/// Plain Unicode lowercase of the whole string, whitespace preserved.
///
/// This is the "lowercased raw token" form the guard's protected set is
/// checked against alongside [`key`].
pub fn fold_lower(text: &str) -> String {
    text.to_lowercase()
}

/// Unicode simple (one code point to one code point) lowercase mapping.
///
/// `char::to_lowercase` is the full mapping; its only multi-code-point
/// expansion ('İ' U+0130 → "i\u{307}") simple-maps to the expansion's
/// first code point, so taking the first is exactly the simple mapping.
fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_key_folds_case() {
        assert_eq!(key("NASA"), "nasa");
        assert_eq!(key("iPhone"), "iphone");
    }

    #[test]
    fn test_key_elides_whitespace() {
        assert_eq!(key("New York"), "newyork");
        assert_eq!(key("  New\tYork \u{00A0} "), "newyork");
    }

    #[test]
    fn test_key_preserves_punctuation() {
        assert_eq!(key("IL-6"), "il-6");
        assert_eq!(key("#123"), "#123");
    }

    #[test]
    fn test_key_empty_for_whitespace_only() {
        assert_eq!(key(""), "");
        assert_eq!(key(" \t\n\u{2009}"), "");
    }

    #[test]
    fn test_key_unicode_lowercase() {
        assert_eq!(key("MÜLLER"), "müller");
        assert_eq!(key("ΣΟΦΟΣ"), "σοφοσ");
    }

    #[test]
    fn test_key_simple_mapping_stays_one_to_one() {
        // Full lowercasing would expand 'İ' to "i\u{307}"; the simple
        // mapping keeps one code point per input code point.
        assert_eq!(key("İstanbul"), "istanbul");
        assert_eq!(key("İ").chars().count(), 1);
    }

    #[test]
    fn test_fold_lower_keeps_whitespace() {
        assert_eq!(fold_lower("New York"), "new york");
        assert_eq!(fold_lower("IL-6"), "il-6");
    }

    #[test]
    fn test_key_into_matches() {
        let mut out = String::new();
        key_into("New York", &mut out);
        assert_eq!(out, key("New York"));
    }

    proptest! {
        #[test]
        fn prop_key_has_no_whitespace(s in ".*") {
            prop_assert!(!key(&s).contains(char::is_whitespace));
        }

        #[test]
        fn prop_key_is_idempotent(s in ".*") {
            let once = key(&s);
            prop_assert_eq!(key(&once), once);
        }

        #[test]
        fn prop_key_into_equivalent(s in ".*") {
            let mut out = String::from("stale");
            key_into(&s, &mut out);
            prop_assert_eq!(out, key(&s));
        }

        #[test]
        fn prop_key_ascii_case_insensitive(s in "[ a-zA-Z0-9.-]*") {
            prop_assert_eq!(key(&s.to_ascii_uppercase()), key(&s.to_ascii_lowercase()));
        }

        #[test]
        fn prop_key_maps_one_code_point_per_input(s in ".*") {
            let non_whitespace = s.chars().filter(|c| !c.is_whitespace()).count();
            prop_assert_eq!(key(&s).chars().count(), non_whitespace);
        }
    }
}
