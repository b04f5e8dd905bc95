//! # spellkit
//!
//! Fast, safe fuzzy spelling correction over a frequency-weighted lexicon.
//!
//! Provides a symmetric-delete (SymSpell) index for candidate lookup,
//! ranked correction with a frequency-threshold accept policy, domain
//! protection for tokens that must never be rewritten (identifiers, codes,
//! URLs), and atomic hot reload under concurrent readers.
//!
//! ```no_run
//! use spellkit::{Corrector, SpellkitConfig};
//!
//! let corrector = Corrector::new();
//! corrector.load(&SpellkitConfig::new("dictionary.tsv"))?;
//!
//! assert_eq!(corrector.correct("helo", true)?, "hello");
//! # Ok::<(), spellkit::Error>(())
//! ```

pub mod dictionary;
pub mod distance;
pub mod engine;
pub mod error;
pub mod guard;
pub mod index;
pub mod normalize;
pub mod state;

use std::path::PathBuf;

use once_cell::sync::Lazy;

pub use engine::{Corrector, DictionaryStats};
pub use error::{Error, Result};
pub use guard::{Guard, PatternSpec, SkipRules};
pub use index::{Candidate, Lexicon, LexiconBuilder, LoadStats};

/// What to load and how to correct.
///
/// The intent is to make the correction policy explicit: which file feeds
/// the lexicon, how far a typo may drift (`edit_distance`), how common a
/// candidate must be before a fuzzy rewrite is trusted
/// (`frequency_threshold`), and which token shapes are off-limits entirely.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellkitConfig {
    /// Frequency dictionary: one `term frequency` pair per line.
    pub dictionary_path: PathBuf,
    /// Optional protected-terms file: one term per line.
    pub protected_path: Option<PathBuf>,
    /// Caller protection patterns, evaluated before the built-in skips.
    pub protected_patterns: Vec<PatternSpec>,
    /// Maximum edit distance for candidates; 1 or 2.
    pub edit_distance: u8,
    /// Minimum frequency a fuzzy (distance ≥ 1) candidate needs to be
    /// accepted as a rewrite. Exact matches are never thresholded.
    pub frequency_threshold: f64,
    pub skip_urls: bool,
    pub skip_emails: bool,
    pub skip_hostnames: bool,
    pub skip_code_patterns: bool,
    pub skip_numbers: bool,
}

impl SpellkitConfig {
    /// Defaults: edit distance 1, frequency threshold 10.0, no protected
    /// terms, every skip group off.
    pub fn new(dictionary_path: impl Into<PathBuf>) -> Self {
        Self {
            dictionary_path: dictionary_path.into(),
            protected_path: None,
            protected_patterns: Vec::new(),
            edit_distance: 1,
            frequency_threshold: 10.0,
            skip_urls: false,
            skip_emails: false,
            skip_hostnames: false,
            skip_code_patterns: false,
            skip_numbers: false,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !matches!(self.edit_distance, 1 | 2) {
            return Err(Error::InvalidArgument(format!(
                "edit_distance must be 1 or 2, got {}",
                self.edit_distance
            )));
        }
        if !self.frequency_threshold.is_finite() || self.frequency_threshold < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "frequency_threshold must be finite and non-negative, got {}",
                self.frequency_threshold
            )));
        }
        Ok(())
    }
}

static GLOBAL: Lazy<Corrector> = Lazy::new(Corrector::new);

/// The process-default corrector.
///
/// Independent [`Corrector`] instances are cheap to create; this one exists
/// for callers that want a single shared dictionary without threading a
/// handle through their call stack.
pub fn global() -> &'static Corrector {
    &GLOBAL
}

/// Load (or reload) the process-default corrector. See [`Corrector::load`].
pub fn load(config: &SpellkitConfig) -> Result<()> {
    global().load(config)
}

/// See [`Corrector::correct`].
pub fn correct(word: &str, use_guard: bool) -> Result<String> {
    global().correct(word, use_guard)
}

/// See [`Corrector::correct_exact`].
pub fn correct_exact(word: &str) -> Result<bool> {
    global().correct_exact(word)
}

/// See [`Corrector::suggestions`].
pub fn suggestions(word: &str, max_results: usize) -> Result<Vec<Candidate>> {
    global().suggestions(word, max_results)
}

/// See [`Corrector::correct_tokens`].
pub fn correct_tokens<S: AsRef<str>>(tokens: &[S], use_guard: bool) -> Result<Vec<String>> {
    global().correct_tokens(tokens, use_guard)
}

/// See [`Corrector::stats`].
pub fn stats() -> Result<DictionaryStats> {
    global().stats()
}

/// See [`Corrector::healthcheck`].
pub fn healthcheck() -> Result<()> {
    global().healthcheck()
}
