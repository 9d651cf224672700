//! Text encodings of CSV sources.

use std::collections::VecDeque;
use std::io::{self, Read};

use encoding_rs::{Decoder, Encoding, UTF_8};
use tracing::warn;

use crate::error::{CurateError, Result};

/// Encoding assumed when none is declared.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Resolve an encoding label (`utf-8`, `utf-8-sig`, `cp1251`, `windows-1251`, ...).
pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    let label = label.unwrap_or(DEFAULT_ENCODING).trim();
    match label.to_ascii_lowercase().as_str() {
        "utf-8-sig" | "utf8-sig" => Ok(UTF_8),
        other => Encoding::for_label(other.as_bytes())
            .ok_or_else(|| CurateError::Encoding(format!("Unknown encoding: {}", label))),
    }
}

/// Guess the encoding of a leading byte sample.
///
/// UTF-8 is preferred (reported as `utf-8-sig` when a BOM is present);
/// anything that is not valid UTF-8 is read as Windows-1251, the usual
/// encoding of Russian spreadsheet exports.
pub fn sniff_encoding(sample: &[u8]) -> &'static str {
    if sample.starts_with(b"\xEF\xBB\xBF") {
        return "utf-8-sig";
    }
    match std::str::from_utf8(sample) {
        Ok(_) => "utf-8",
        // A multi-byte character cut off by the end of the sample.
        Err(e) if e.error_len().is_none() => "utf-8",
        Err(_) => "cp1251",
    }
}

/// Decode a byte sample with the given encoding, dropping a BOM.
pub(crate) fn decode_sample(sample: &[u8], encoding: &'static Encoding) -> String {
    let (text, _) = encoding.decode_with_bom_removal(sample);
    text.into_owned()
}

/// Streams bytes of any supported encoding out as UTF-8.
///
/// Malformed input is replaced with U+FFFD; a leading BOM is removed.
///
/// The reader also remembers the output offset where each line break
/// (`\r\n`, `\r` or `\n`) starts, so callers can count the blank lines a
/// CSV parser skips.
pub struct DecodingReader<R> {
    inner: R,
    decoder: Decoder,
    in_buf: Vec<u8>,
    out_buf: Vec<u8>,
    out_pos: usize,
    out_len: usize,
    finished: bool,
    reported_errors: bool,
    emitted: u64,
    after_cr: bool,
    line_breaks: VecDeque<u64>,
}

impl<R: Read> DecodingReader<R> {
    const CHUNK: usize = 8 * 1024;

    /// Wrap `inner`, decoding it from `encoding`.
    pub fn new(inner: R, encoding: &'static Encoding) -> Self {
        Self {
            inner,
            decoder: encoding.new_decoder_with_bom_removal(),
            in_buf: vec![0; Self::CHUNK],
            out_buf: Vec::new(),
            out_pos: 0,
            out_len: 0,
            finished: false,
            reported_errors: false,
            emitted: 0,
            after_cr: false,
            line_breaks: VecDeque::new(),
        }
    }

    /// Forget line breaks starting before output offset `end`.
    ///
    /// Returns how many were forgotten and whether the last of them started
    /// at `end - 1`, i.e. whether the consumed output ends with a line break.
    pub fn take_line_breaks(&mut self, end: u64) -> (usize, bool) {
        let mut count = 0;
        let mut last = None;
        while let Some(&start) = self.line_breaks.front() {
            if start >= end {
                break;
            }
            self.line_breaks.pop_front();
            count += 1;
            last = Some(start);
        }
        (count, end > 0 && last == Some(end - 1))
    }

    fn track_line_breaks(&mut self, bytes: &[u8]) {
        for (i, &b) in bytes.iter().enumerate() {
            let offset = self.emitted + i as u64;
            match b {
                b'\r' => self.line_breaks.push_back(offset),
                b'\n' if !self.after_cr => self.line_breaks.push_back(offset),
                _ => {}
            }
            self.after_cr = b == b'\r';
        }
        self.emitted += bytes.len() as u64;
    }

    fn fill(&mut self) -> io::Result<()> {
        let n = self.inner.read(&mut self.in_buf)?;
        let last = n == 0;

        let needed = self
            .decoder
            .max_utf8_buffer_length(n)
            .ok_or_else(|| io::Error::other("decode buffer size overflow"))?;
        if self.out_buf.len() < needed {
            self.out_buf.resize(needed, 0);
        }

        let (_, read, written, had_errors) =
            self.decoder
                .decode_to_utf8(&self.in_buf[..n], &mut self.out_buf, last);
        debug_assert_eq!(read, n);

        if had_errors && !self.reported_errors {
            warn!(
                encoding = self.decoder.encoding().name(),
                "malformed bytes in source replaced with U+FFFD"
            );
            self.reported_errors = true;
        }

        self.out_pos = 0;
        self.out_len = written;
        self.finished = last;
        Ok(())
    }
}

impl<R: Read> Read for DecodingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.out_pos == self.out_len {
            if self.finished {
                return Ok(0);
            }
            self.fill()?;
        }

        let n = buf.len().min(self.out_len - self.out_pos);
        buf[..n].copy_from_slice(&self.out_buf[self.out_pos..self.out_pos + n]);
        self.out_pos += n;
        self.track_line_breaks(&buf[..n]);
        Ok(n)
    }
}
