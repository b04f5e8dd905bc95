#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let key = spellkit::normalize::key(&s);

    // No whitespace ever survives normalization.
    debug_assert!(!key.contains(char::is_whitespace));

    // Idempotence: a key normalizes to itself.
    debug_assert_eq!(spellkit::normalize::key(&key), key);

    // Equivalence to the *_into variant.
    let mut out = String::from("stale");
    spellkit::normalize::key_into(&s, &mut out);
    debug_assert_eq!(out, key);
});
