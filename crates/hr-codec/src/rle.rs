//! Run-length encoding of the Huffman bit-string.
//!
//! A maximal run is written as its character followed by the decimal run
//! length, with the length omitted for runs of one. The output shares its
//! alphabet with the counts, so it cannot be decoded symbol by symbol; see
//! `trie` for the decoding side.

use crate::buffer::TextBuffer;
use hr_core::Result;

pub fn encode(text: &str, expansion: usize) -> Result<String> {
    let start = text.len().saturating_mul(expansion).saturating_add(1);
    let mut out = TextBuffer::with_capacity("rle output", start)?;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let mut run: usize = 1;
        while chars.next_if_eq(&c).is_some() {
            run += 1;
        }
        out.push(c)?;
        if run > 1 {
            out.push_str(&run.to_string())?;
        }
    }
    Ok(out.into_string())
}

/// Maximal runs of `text` as `(char, length)` pairs.
pub fn runs(text: &str) -> Vec<(char, usize)> {
    let mut runs: Vec<(char, usize)> = Vec::new();
    for c in text.chars() {
        match runs.last_mut() {
            Some((prev, n)) if *prev == c => *n += 1,
            _ => runs.push((c, 1)),
        }
    }
    runs
}
