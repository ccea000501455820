#![no_main]
use libfuzzer_sys::fuzz_target;
use certchain::matching::{normalize, similarity};

/// Fuzz normalization and the similarity ratio.
fuzz_target!(|data: (&str, &str)| {
    let (a, b) = data;
    let na = normalize(a);
    assert_eq!(normalize(&na), na);
    assert!(na.bytes().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

    let score = similarity(&na, &normalize(b));
    assert!((0.0..=1.0).contains(&score));
});
