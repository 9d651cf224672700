//! CSV input: encodings, dialect sniffing and streaming rows.

mod encoding;
mod sniff;
mod source;

pub use encoding::{resolve_encoding, sniff_encoding, DecodingReader, DEFAULT_ENCODING};
pub use sniff::{sniff, Sniffed, SNIFF_BYTES};
pub use source::{is_csv_path, CsvRows, CsvSource, DataTable};
