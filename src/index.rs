//! Symmetric-delete lexicon index.
//!
//! Build time stores every string obtainable by deleting up to
//! `max_edit_distance` characters from each normalized entry. Query time
//! applies the same deletions to the query; any bucket collision is a
//! candidate, verified with the true Damerau-Levenshtein distance. This
//! turns fuzzy lookup into a handful of hash probes plus a few distance
//! computations, independent of lexicon size.

use std::collections::hash_map::Entry as MapEntry;
use std::collections::{HashMap, HashSet};

use crate::distance::damerau_levenshtein;
use crate::normalize;

/// A ranked correction candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Display form exactly as loaded from the dictionary.
    pub term: String,
    /// Damerau-Levenshtein distance from the normalized query to this
    /// entry's normalized form.
    pub distance: usize,
    /// Merged frequency of the entry.
    pub frequency: u64,
}

/// Per-load accounting of rows that did not become entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadStats {
    /// Structurally bad rows: missing fields, empty terms, terms that
    /// normalize to the empty string.
    pub skipped_malformed: u64,
    /// Always 0: multi-word terms are indexed via whitespace elision rather
    /// than skipped. Kept in the surface so consumers see an explicit zero.
    pub skipped_multiword: u64,
    /// Rows whose frequency field did not parse as a non-negative integer.
    pub skipped_invalid_freq: u64,
    /// Rows merged into an earlier entry with the same normalized key.
    pub skipped_duplicates: u64,
}

#[derive(Debug, Clone)]
struct IndexedEntry {
    canonical: String,
    normalized: String,
    /// Char length of `normalized`, precomputed for the lookup length gate.
    key_len: usize,
    frequency: u64,
    /// Highest individual pre-merge frequency seen for this key; decides
    /// which row's canonical survives a merge.
    top_frequency: u64,
}

/// Incremental [`Lexicon`] construction with skip accounting.
///
/// Rows are merged by normalized key as they arrive: frequencies sum, and
/// the canonical of the row with the highest individual frequency wins
/// (first seen wins ties). Call [`finish`](LexiconBuilder::finish) to seal
/// the delete index.
pub struct LexiconBuilder {
    max_edit_distance: usize,
    entries: Vec<IndexedEntry>,
    by_key: HashMap<String, u32>,
    stats: LoadStats,
}

impl LexiconBuilder {
    pub fn new(max_edit_distance: usize) -> Self {
        Self {
            max_edit_distance,
            entries: Vec::new(),
            by_key: HashMap::new(),
            stats: LoadStats::default(),
        }
    }

    /// Add one `(canonical, frequency)` row.
    pub fn push(&mut self, canonical: &str, frequency: u64) {
        let canonical = canonical.trim();
        let key = normalize::key(canonical);
        if canonical.is_empty() || key.is_empty() {
            self.stats.skipped_malformed += 1;
            return;
        }

        match self.by_key.entry(key) {
            MapEntry::Occupied(slot) => {
                let entry = &mut self.entries[*slot.get() as usize];
                entry.frequency = entry.frequency.saturating_add(frequency);
                if frequency > entry.top_frequency {
                    entry.top_frequency = frequency;
                    entry.canonical = canonical.to_string();
                }
                self.stats.skipped_duplicates += 1;
            }
            MapEntry::Vacant(slot) => {
                let id = self.entries.len() as u32;
                self.entries.push(IndexedEntry {
                    canonical: canonical.to_string(),
                    key_len: slot.key().chars().count(),
                    normalized: slot.key().clone(),
                    frequency,
                    top_frequency: frequency,
                });
                slot.insert(id);
            }
        }
    }

    /// Tally a row that failed structural parsing upstream.
    pub fn note_malformed(&mut self) {
        self.stats.skipped_malformed += 1;
    }

    /// Tally a row whose frequency field did not parse upstream.
    pub fn note_invalid_frequency(&mut self) {
        self.stats.skipped_invalid_freq += 1;
    }

    /// Seal the builder: generate delete keys for every entry and produce
    /// the immutable index.
    pub fn finish(self) -> Lexicon {
        let mut deletes: HashMap<String, Vec<u32>> = HashMap::new();
        for (id, entry) in self.entries.iter().enumerate() {
            for variant in delete_variants(&entry.normalized, self.max_edit_distance) {
                deletes.entry(variant).or_default().push(id as u32);
            }
        }

        Lexicon {
            max_edit_distance: self.max_edit_distance,
            entries: self.entries,
            by_key: self.by_key,
            deletes,
            stats: self.stats,
        }
    }
}

/// Immutable fuzzy-match index over a frequency-weighted lexicon.
///
/// Never mutated after [`LexiconBuilder::finish`]; share it freely across
/// threads.
pub struct Lexicon {
    max_edit_distance: usize,
    entries: Vec<IndexedEntry>,
    /// Normalized form → entry id; the exact-match fast path.
    by_key: HashMap<String, u32>,
    /// Delete variant → ids of entries that produce it.
    deletes: HashMap<String, Vec<u32>>,
    stats: LoadStats,
}

impl Lexicon {
    /// Build directly from `(canonical, frequency)` pairs.
    pub fn from_pairs<I, S>(max_edit_distance: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut builder = LexiconBuilder::new(max_edit_distance);
        for (canonical, frequency) in pairs {
            builder.push(canonical.as_ref(), frequency);
        }
        builder.finish()
    }

    /// True iff `word` normalizes to the key of some entry.
    pub fn contains(&self, word: &str) -> bool {
        let key = normalize::key(word);
        !key.is_empty() && self.by_key.contains_key(&key)
    }

    /// Ranked candidates within `max_edit_distance` of `word`.
    ///
    /// Ordering: distance ascending, then frequency descending, then
    /// canonical ascending as a stable tiebreak. An exact match
    /// short-circuits the delete expansion and is returned alone.
    pub fn lookup(&self, word: &str, max_results: usize) -> Vec<Candidate> {
        let query = normalize::key(word);
        if query.is_empty() || max_results == 0 {
            return Vec::new();
        }

        if let Some(&id) = self.by_key.get(&query) {
            let entry = &self.entries[id as usize];
            return vec![Candidate {
                term: entry.canonical.clone(),
                distance: 0,
                frequency: entry.frequency,
            }];
        }

        let query_len = query.chars().count();
        let mut seen: HashSet<u32> = HashSet::new();
        let mut candidates: Vec<Candidate> = Vec::new();

        for variant in delete_variants(&query, self.max_edit_distance) {
            let Some(ids) = self.deletes.get(&variant) else {
                continue;
            };
            for &id in ids {
                if !seen.insert(id) {
                    continue;
                }
                let entry = &self.entries[id as usize];
                // Length gap alone bounds the distance from below; skip the
                // DP for entries that cannot qualify.
                if query_len.abs_diff(entry.key_len) > self.max_edit_distance {
                    continue;
                }
                let distance = damerau_levenshtein(&query, &entry.normalized);
                if distance <= self.max_edit_distance {
                    candidates.push(Candidate {
                        term: entry.canonical.clone(),
                        distance,
                        frequency: entry.frequency,
                    });
                }
            }
        }

        candidates.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| b.frequency.cmp(&a.frequency))
                .then_with(|| a.term.cmp(&b.term))
        });
        candidates.truncate(max_results);
        candidates
    }

    /// Number of entries after merging.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The edit-distance cap this index was built for.
    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }

    /// Skip accounting from the load that built this index.
    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

/// Every distinct string reachable from `word` by deleting up to
/// `max_deletes` characters, including `word` itself (the zero-deletion
/// case).
///
/// Deletion operates on chars, so multibyte text stays well-formed. A
/// single-character word contributes the empty string at one deletion;
/// that empty bucket is what makes one-character queries correctable.
fn delete_variants(word: &str, max_deletes: usize) -> HashSet<String> {
    let mut variants = HashSet::new();
    variants.insert(word.to_string());

    let mut frontier = vec![word.to_string()];
    for _ in 0..max_deletes {
        let mut next = Vec::new();
        for current in &frontier {
            if current.is_empty() {
                continue;
            }
            let chars: Vec<char> = current.chars().collect();
            for i in 0..chars.len() {
                let shorter: String = chars[..i].iter().chain(&chars[i + 1..]).collect();
                if variants.insert(shorter.clone()) {
                    next.push(shorter);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Lexicon {
        Lexicon::from_pairs(
            1,
            [("hello", 10000u64), ("help", 3000), ("world", 8000)],
        )
    }

    #[test]
    fn test_delete_variants_include_original() {
        let variants = delete_variants("abc", 1);
        assert!(variants.contains("abc"));
        assert!(variants.contains("bc"));
        assert!(variants.contains("ac"));
        assert!(variants.contains("ab"));
        assert_eq!(variants.len(), 4);
    }

    #[test]
    fn test_delete_variants_two_levels() {
        let variants = delete_variants("abc", 2);
        assert!(variants.contains("a"));
        assert!(variants.contains("b"));
        assert!(variants.contains("c"));
        assert_eq!(variants.len(), 7);
    }

    #[test]
    fn test_single_char_word_reaches_empty_bucket() {
        let variants = delete_variants("a", 1);
        assert!(variants.contains(""));
    }

    #[test]
    fn test_contains_uses_normalized_key() {
        let lex = Lexicon::from_pairs(1, [("New York", 5000u64)]);
        assert!(lex.contains("newyork"));
        assert!(lex.contains("NEW YORK"));
        assert!(!lex.contains("newark"));
    }

    #[test]
    fn test_exact_match_short_circuits() {
        let lex = sample();
        let cands = lex.lookup("hello", 3);
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0], Candidate { term: "hello".to_string(), distance: 0, frequency: 10000 });
    }

    #[test]
    fn test_ranked_by_distance_then_frequency() {
        let lex = sample();
        let cands = lex.lookup("helo", 3);
        let terms: Vec<&str> = cands.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(terms, vec!["hello", "help"]);
        assert_eq!(cands[0].distance, 1);
        assert_eq!(cands[1].distance, 1);
    }

    #[test]
    fn test_max_results_truncates() {
        let lex = sample();
        assert_eq!(lex.lookup("helo", 1).len(), 1);
    }

    #[test]
    fn test_distance_cap_respected() {
        let lex = sample();
        // "heo" is distance 2 from "hello"; unreachable at cap 1.
        assert!(lex.lookup("heo", 3).is_empty());

        let lex2 = Lexicon::from_pairs(2, [("hello", 10000u64)]);
        let cands = lex2.lookup("heo", 3);
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0].distance, 2);
    }

    #[test]
    fn test_single_char_query_gets_suggestions() {
        let lex = Lexicon::from_pairs(1, [("a", 100u64), ("b", 50)]);
        let cands = lex.lookup("c", 5);
        let terms: Vec<&str> = cands.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(terms, vec!["a", "b"]);
        assert!(cands.iter().all(|c| c.distance == 1));
    }

    #[test]
    fn test_duplicate_merge_sums_and_keeps_top_canonical() {
        let mut builder = LexiconBuilder::new(1);
        builder.push("hello", 1000);
        builder.push("HELLO", 2000);
        builder.push("Hello", 500);
        let lex = builder.finish();

        assert_eq!(lex.len(), 1);
        assert_eq!(lex.stats().skipped_duplicates, 2);
        let cands = lex.lookup("hello", 1);
        assert_eq!(cands[0].term, "HELLO");
        assert_eq!(cands[0].frequency, 3500);
    }

    #[test]
    fn test_duplicate_merge_tie_keeps_first_seen() {
        let lex = Lexicon::from_pairs(1, [("Hello", 1000u64), ("HELLO", 1000)]);
        assert_eq!(lex.lookup("hello", 1)[0].term, "Hello");
    }

    #[test]
    fn test_empty_normalized_key_is_malformed() {
        let mut builder = LexiconBuilder::new(1);
        builder.push("   ", 100);
        builder.push("", 100);
        let lex = builder.finish();
        assert_eq!(lex.len(), 0);
        assert_eq!(lex.stats().skipped_malformed, 2);
    }

    #[test]
    fn test_zero_frequency_ranks_last_among_ties() {
        let lex = Lexicon::from_pairs(1, [("cat", 0u64), ("car", 100)]);
        let cands = lex.lookup("caw", 2);
        assert_eq!(cands[0].term, "car");
        assert_eq!(cands[1].term, "cat");
    }

    #[test]
    fn test_canonical_tiebreak_is_stable() {
        let lex = Lexicon::from_pairs(1, [("bat", 100u64), ("bad", 100)]);
        let cands = lex.lookup("baz", 2);
        // Same distance, same frequency: canonical ascending.
        assert_eq!(cands[0].term, "bad");
        assert_eq!(cands[1].term, "bat");
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let lex = sample();
        assert!(lex.lookup("", 3).is_empty());
        assert!(lex.lookup("   ", 3).is_empty());
    }

    #[test]
    fn test_multiword_entry_matches_elided_query() {
        let lex = Lexicon::from_pairs(1, [("New York", 5000u64)]);
        let cands = lex.lookup("newyrok", 1);
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0].term, "New York");
        assert_eq!(cands[0].distance, 1);
    }
}
