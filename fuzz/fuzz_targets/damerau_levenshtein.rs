#![no_main]

use libfuzzer_sys::fuzz_target;

use spellkit::distance::damerau_levenshtein;

fuzz_target!(|data: &[u8]| {
    // Keep inputs bounded: the DP is quadratic.
    if data.len() > 128 {
        return;
    }
    let mid = data.len() / 2;
    let a = String::from_utf8_lossy(&data[..mid]);
    let b = String::from_utf8_lossy(&data[mid..]);

    let d = damerau_levenshtein(&a, &b);
    let (la, lb) = (a.chars().count(), b.chars().count());

    debug_assert!(d >= la.abs_diff(lb));
    debug_assert!(d <= la.max(lb));
    debug_assert_eq!(d == 0, a == b);
    debug_assert_eq!(d, damerau_levenshtein(&b, &a));
});
