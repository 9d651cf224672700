//! Fuzz target for name dictionary loading.
//!
//! A valid header followed by arbitrary rows: loading must either succeed
//! or return an error, and every loaded variant must look itself up.

#![no_main]

use fio_curate::dictionary::NameDictionary;
use libfuzzer_sys::fuzz_target;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok(mut file) = tempfile::NamedTempFile::new() else {
        return;
    };
    let header = b"canonical,variant,enabled,note,source\n";
    if file.write_all(header).is_err() || file.write_all(data).is_err() || file.flush().is_err() {
        return;
    }

    if let Ok(dictionary) = NameDictionary::load(file.path()) {
        for (variant, canonical) in dictionary.iter() {
            assert_eq!(dictionary.lookup(variant), Some(canonical));
        }
    }
});
