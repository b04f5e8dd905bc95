#![no_main]

use libfuzzer_sys::fuzz_target;

use spellkit::dictionary::{classify_line, parse_protected, LineClass};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    for line in text.lines() {
        match classify_line(line) {
            LineClass::Entry { term, .. } => {
                // An accepted term is trimmed and non-empty.
                debug_assert!(!term.is_empty());
                debug_assert_eq!(term, term.trim());
            }
            LineClass::Blank => {
                let trimmed = line.trim();
                debug_assert!(trimmed.is_empty() || trimmed.starts_with('#'));
            }
            LineClass::Malformed | LineClass::InvalidFrequency => {}
        }
    }

    for term in parse_protected(&text) {
        debug_assert!(!term.is_empty());
        debug_assert!(!term.starts_with('#'));
    }
});
