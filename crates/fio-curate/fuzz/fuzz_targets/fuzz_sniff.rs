//! Fuzz target for dialect sniffing and CSV reading.
//!
//! Arbitrary bytes are written to a file, sniffed, and read back with the
//! detected encoding and delimiter. Errors are fine; panics are not.

#![no_main]

use fio_curate::input::sniff;
use fio_curate::suggestion::Selection;
use fio_curate::Curator;
use libfuzzer_sys::fuzz_target;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    if data.len() > 20_000 {
        return;
    }

    let Ok(mut file) = tempfile::NamedTempFile::with_suffix(".csv") else {
        return;
    };
    if file.write_all(data).is_err() || file.flush().is_err() {
        return;
    }

    let Ok(sniffed) = sniff(file.path()) else {
        return;
    };
    let source = sniffed.source(file.path());

    if let Ok(table) = source.read_head(20) {
        if let Some(first) = table.headers.first() {
            let _ = Curator::new().preview(&source, &Selection::single(first.as_str()));
        }
    }
});
