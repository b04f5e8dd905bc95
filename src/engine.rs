//! The correction engine.
//!
//! Composes the lexicon index, the guard, and the snapshot cell into the
//! public correction operations. One [`Corrector`] owns one snapshot cell;
//! `load` builds a complete new snapshot off to the side and publishes it
//! atomically, so queries racing a reload see either the old dictionary or
//! the new one, never a mix.

use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tracing::info;

use crate::dictionary::{self, LineClass};
use crate::error::{Error, Result};
use crate::guard::{Guard, SkipRules};
use crate::index::{Candidate, Lexicon, LexiconBuilder};
use crate::state::SnapshotCell;
use crate::SpellkitConfig;

/// One immutable generation of loaded state.
struct Snapshot {
    lexicon: Lexicon,
    guard: Guard,
    frequency_threshold: f64,
    loaded_at: u64,
}

impl Snapshot {
    /// The single-token rewrite policy.
    ///
    /// Protected tokens and tokens with no candidate echo verbatim. A
    /// distance-0 hit always projects to the entry's canonical form. A
    /// fuzzy hit is accepted only when its frequency clears the threshold.
    fn correct_one(&self, word: &str, use_guard: bool) -> String {
        if use_guard && self.guard.is_protected(word) {
            return word.to_string();
        }
        match self.lexicon.lookup(word, 1).into_iter().next() {
            None => word.to_string(),
            Some(top) if top.distance == 0 => top.term,
            Some(top) if top.frequency as f64 >= self.frequency_threshold => top.term,
            Some(_) => word.to_string(),
        }
    }
}

/// Point-in-time view of the loaded dictionary.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DictionaryStats {
    /// True in every value this crate produces: statistics only exist for
    /// a published snapshot. Carried for consumers that key on the field.
    pub loaded: bool,
    /// Entry count after duplicate merging.
    pub dictionary_size: usize,
    pub edit_distance: usize,
    /// Unix seconds at which the current snapshot was published; 0 when
    /// unloaded.
    pub loaded_at: u64,
    pub skipped_malformed: u64,
    pub skipped_multiword: u64,
    pub skipped_invalid_freq: u64,
    pub skipped_duplicates: u64,
}

/// Fuzzy spelling corrector over a hot-reloadable lexicon.
///
/// Starts unloaded: every query fails with [`Error::NotLoaded`] until the
/// first successful [`load`](Corrector::load). Reloading replaces the whole
/// dictionary atomically; a failed reload leaves the previous dictionary
/// serving.
///
/// All query methods take `&self` and are safe to call from many threads
/// concurrently with a reload.
pub struct Corrector {
    state: SnapshotCell<Snapshot>,
}

impl Corrector {
    /// A corrector with no dictionary loaded.
    pub fn new() -> Self {
        Self {
            state: SnapshotCell::new(),
        }
    }

    /// Build a snapshot from `config` and publish it.
    ///
    /// Reads the dictionary (and protected-terms file, when configured),
    /// builds the delete index and the guard, then swaps the finished
    /// snapshot in. On any error nothing is published.
    pub fn load(&self, config: &SpellkitConfig) -> Result<()> {
        config.validate()?;
        let started = Instant::now();

        let text = dictionary::read_file(&config.dictionary_path)?;
        let mut builder = LexiconBuilder::new(usize::from(config.edit_distance));
        for line in text.lines() {
            match dictionary::classify_line(line) {
                LineClass::Entry { term, frequency } => builder.push(&term, frequency),
                LineClass::Blank => {}
                LineClass::Malformed => builder.note_malformed(),
                LineClass::InvalidFrequency => builder.note_invalid_frequency(),
            }
        }
        let lexicon = builder.finish();

        let protected = match &config.protected_path {
            Some(path) => dictionary::parse_protected(&dictionary::read_file(path)?),
            None => Vec::new(),
        };
        let guard = Guard::build(&protected, &config.protected_patterns, SkipRules::from(config))?;

        let stats = lexicon.stats();
        info!(
            entries = lexicon.len(),
            protected_terms = guard.term_count(),
            patterns = guard.pattern_count(),
            skipped_malformed = stats.skipped_malformed,
            skipped_invalid_freq = stats.skipped_invalid_freq,
            skipped_duplicates = stats.skipped_duplicates,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dictionary loaded"
        );

        self.state.publish(Arc::new(Snapshot {
            lexicon,
            guard,
            frequency_threshold: config.frequency_threshold,
            loaded_at: unix_now(),
        }));
        Ok(())
    }

    /// True iff `word` is in the lexicon (normalized comparison). Does not
    /// consult the guard.
    pub fn correct_exact(&self, word: &str) -> Result<bool> {
        let snapshot = self.acquire()?;
        Ok(snapshot.lexicon.contains(word))
    }

    /// Ranked candidates for `word`, up to `max_results`.
    ///
    /// The guard is not consulted: callers asking for suggestions want the
    /// raw ranked list.
    pub fn suggestions(&self, word: &str, max_results: usize) -> Result<Vec<Candidate>> {
        require_word(word)?;
        let snapshot = self.acquire()?;
        Ok(snapshot.lexicon.lookup(word, max_results))
    }

    /// Rewrite `word`, or echo it verbatim when no high-confidence
    /// correction exists (or the guard protects it).
    pub fn correct(&self, word: &str, use_guard: bool) -> Result<String> {
        require_word(word)?;
        let snapshot = self.acquire()?;
        Ok(snapshot.correct_one(word, use_guard))
    }

    /// Batch [`correct`](Corrector::correct): acquires the snapshot once
    /// and applies the single-token policy to each token in order.
    pub fn correct_tokens<S: AsRef<str>>(
        &self,
        tokens: &[S],
        use_guard: bool,
    ) -> Result<Vec<String>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        let snapshot = self.acquire()?;
        tokens
            .iter()
            .map(|token| {
                let token = token.as_ref();
                require_word(token)?;
                Ok(snapshot.correct_one(token, use_guard))
            })
            .collect()
    }

    /// Statistics for the currently published snapshot.
    pub fn stats(&self) -> Result<DictionaryStats> {
        let snapshot = self.acquire()?;
        let skips = snapshot.lexicon.stats();
        Ok(DictionaryStats {
            loaded: true,
            dictionary_size: snapshot.lexicon.len(),
            edit_distance: snapshot.lexicon.max_edit_distance(),
            loaded_at: snapshot.loaded_at,
            skipped_malformed: skips.skipped_malformed,
            skipped_multiword: skips.skipped_multiword,
            skipped_invalid_freq: skips.skipped_invalid_freq,
            skipped_duplicates: skips.skipped_duplicates,
        })
    }

    /// Fails with [`Error::NotLoaded`] until a snapshot is published.
    pub fn healthcheck(&self) -> Result<()> {
        self.acquire().map(|_| ())
    }

    fn acquire(&self) -> Result<Arc<Snapshot>> {
        self.state.acquire().ok_or(Error::NotLoaded)
    }
}

impl Default for Corrector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&SpellkitConfig> for SkipRules {
    fn from(config: &SpellkitConfig) -> Self {
        Self {
            urls: config.skip_urls,
            emails: config.skip_emails,
            hostnames: config.skip_hostnames,
            code_patterns: config.skip_code_patterns,
            numbers: config.skip_numbers,
        }
    }
}

fn require_word(word: &str) -> Result<()> {
    if word.is_empty() {
        return Err(Error::InvalidArgument("word must not be empty".to_string()));
    }
    Ok(())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
