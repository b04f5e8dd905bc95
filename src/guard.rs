//! Domain-protection predicate.
//!
//! Some tokens must never be rewritten no matter how close the lexicon
//! gets: gene symbols, URLs, code identifiers, version numbers. The guard
//! answers "is this token protected" from an explicit term set and a list
//! of compiled patterns, and is consulted before any correction is
//! attempted.
//!
//! Patterns are evaluated against the **raw** token: URL and identifier
//! shapes depend on case and punctuation the normalizer would erase. The
//! term set is checked under both the whitespace-elided normalized key and
//! plain lowercasing, so a protected `"IL-6"` covers `"il-6"` as well as
//! `"il6"` without the user thinking about normalization policy.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};
use crate::normalize;

/// A caller-supplied protection pattern with explicit regex flags.
///
/// A bare pattern string defaults to case-sensitive, single-line,
/// non-extended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternSpec {
    pub source: String,
    pub case_insensitive: bool,
    pub multiline: bool,
    /// Ignore whitespace and `#` comments in the pattern (extended mode).
    pub extended: bool,
}

impl PatternSpec {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            case_insensitive: false,
            multiline: false,
            extended: false,
        }
    }

    fn compile(&self) -> Result<Regex> {
        RegexBuilder::new(&self.source)
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multiline)
            .ignore_whitespace(self.extended)
            .build()
            .map_err(|source| Error::MalformedPattern {
                pattern: self.source.clone(),
                source,
            })
    }
}

/// Which built-in skip-pattern groups to enable. All default off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkipRules {
    pub urls: bool,
    pub emails: bool,
    pub hostnames: bool,
    pub code_patterns: bool,
    pub numbers: bool,
}

static URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^https?://\S+$").expect("invalid URL pattern"),
        Regex::new(r"(?i)^www\.\S+$").expect("invalid www pattern"),
    ]
});

static EMAIL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(r"(?i)^[\w.+-]+@[\w.-]+\.\w+$").expect("invalid email pattern")]
});

static HOSTNAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)+$")
            .expect("invalid hostname pattern"),
    ]
});

static CODE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // camelCase
        Regex::new(r"^[a-z]+[A-Z][a-zA-Z0-9]*$").expect("invalid camelCase pattern"),
        // PascalCase
        Regex::new(r"^[A-Z][a-z]+[A-Z][a-zA-Z0-9]*$").expect("invalid PascalCase pattern"),
        // snake_case
        Regex::new(r"(?i)^[a-z]+_[a-z0-9_]+$").expect("invalid snake_case pattern"),
        // SCREAMING_SNAKE
        Regex::new(r"^[A-Z]+_[A-Z0-9_]+$").expect("invalid screaming-snake pattern"),
        // dotted.path
        Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*\.[a-zA-Z_][a-zA-Z0-9_.]*$")
            .expect("invalid dotted-path pattern"),
    ]
});

static NUMBER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // version strings: 1.2, 1.2.3, 1.2.3.4
        Regex::new(r"^\d+\.\d+(\.\d+)?(\.\d+)?$").expect("invalid version pattern"),
        // issue/ticket ids: #123
        Regex::new(r"^#\d+$").expect("invalid hash-id pattern"),
        // measurements: 10kg, 2.5mb
        Regex::new(r"(?i)^\d+(\.\d+)?(kg|g|mg|lb|oz|km|m|cm|mm|mi|ft|in|gb|mb|kb|tb|pb|px|pt|em|rem)$")
            .expect("invalid measurement pattern"),
        // anything starting with a digit
        Regex::new(r"^\d").expect("invalid leading-digit pattern"),
    ]
});

/// The protection predicate for one published snapshot.
#[derive(Default, Debug)]
pub struct Guard {
    terms: HashSet<String>,
    patterns: Vec<Regex>,
}

impl Guard {
    /// Compile the guard from protected terms, caller patterns, and the
    /// built-in skip groups.
    ///
    /// Each term is inserted under both its normalized key and its plain
    /// lowercase form. Caller patterns precede built-in groups in
    /// evaluation order; a pattern that fails to compile fails the build,
    /// naming its source.
    pub fn build(terms: &[String], patterns: &[PatternSpec], skips: SkipRules) -> Result<Self> {
        let mut set = HashSet::new();
        for term in terms {
            let lowered = normalize::fold_lower(term.trim());
            if lowered.is_empty() {
                continue;
            }
            let key = normalize::key(&lowered);
            if !key.is_empty() {
                set.insert(key);
            }
            set.insert(lowered);
        }

        let mut compiled = Vec::with_capacity(patterns.len());
        for spec in patterns {
            compiled.push(spec.compile()?);
        }
        // `Regex` clones share the compiled program, so enabling a group is
        // a pointer copy, not a recompile.
        if skips.urls {
            compiled.extend(URL_PATTERNS.iter().cloned());
        }
        if skips.emails {
            compiled.extend(EMAIL_PATTERNS.iter().cloned());
        }
        if skips.hostnames {
            compiled.extend(HOSTNAME_PATTERNS.iter().cloned());
        }
        if skips.code_patterns {
            compiled.extend(CODE_PATTERNS.iter().cloned());
        }
        if skips.numbers {
            compiled.extend(NUMBER_PATTERNS.iter().cloned());
        }

        Ok(Self {
            terms: set,
            patterns: compiled,
        })
    }

    /// True iff `raw` must pass through correction unchanged.
    ///
    /// Patterns are tried first (against the raw token), then set
    /// membership of the normalized key and the plain-lowercased token.
    pub fn is_protected(&self, raw: &str) -> bool {
        if raw.is_empty() {
            return false;
        }
        if self.patterns.iter().any(|p| p.is_match(raw)) {
            return true;
        }
        if self.terms.is_empty() {
            return false;
        }
        if self.terms.contains(&normalize::fold_lower(raw)) {
            return true;
        }
        let key = normalize::key(raw);
        !key.is_empty() && self.terms.contains(&key)
    }

    /// Number of distinct protected-set entries (both insertion forms
    /// counted once each).
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}
