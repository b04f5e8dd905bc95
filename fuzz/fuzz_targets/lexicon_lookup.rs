#![no_main]

use libfuzzer_sys::fuzz_target;

use spellkit::Lexicon;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut lines = text.lines();

    // First line is the query; the rest become dictionary entries.
    let Some(query) = lines.next() else {
        return;
    };
    let pairs: Vec<(String, u64)> = lines
        .take(32)
        .enumerate()
        .map(|(i, term)| (term.chars().take(16).collect(), i as u64))
        .collect();

    for max_edit in [1usize, 2] {
        let lex = Lexicon::from_pairs(max_edit, pairs.clone());
        let query: String = query.chars().take(16).collect();
        let cands = lex.lookup(&query, 8);

        debug_assert!(cands.len() <= 8);
        for c in &cands {
            debug_assert!(c.distance <= max_edit);
        }
        for pair in cands.windows(2) {
            debug_assert!(
                pair[0].distance < pair[1].distance
                    || (pair[0].distance == pair[1].distance
                        && pair[0].frequency >= pair[1].frequency)
            );
        }

        // Exact membership must agree with a distance-0 lookup result.
        if lex.contains(&query) {
            debug_assert_eq!(cands[0].distance, 0);
        }
    }
});
