//! Digit trie used to reverse run-length encoding.
//!
//! Keys are strings of decimal digits; each node may hold a payload. The
//! pipeline inserts a single key (the whole RLE stream) whose payload is the
//! whole Huffman bit-string.
//!
//! Decoding walks the trie one digit at a time. When the current node has a
//! child for the digit the walk descends, emitting and restarting at the root
//! whenever it lands on a payload. When it has no such child, the maximal run
//! of digits starting there is read as a repeat count for the payload stored
//! at the current node.

use crate::buffer::TextBuffer;
use hr_core::{CodecError, Result};
use tracing::trace;

const ROOT: usize = 0;
const RADIX: u32 = 10;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    payload: Option<String>,
    children: [Option<usize>; RADIX as usize],
}

#[derive(Debug, Clone)]
pub struct DigitTrie {
    nodes: Vec<TrieNode>,
}

impl Default for DigitTrie {
    fn default() -> Self {
        Self::new()
    }
}

fn digit_at(text: &str, position: usize) -> Result<usize> {
    let found = text[position..].chars().next().unwrap_or('\0');
    found
        .to_digit(RADIX)
        .map(|d| d as usize)
        .ok_or(CodecError::MalformedRleInput { position, found })
}

impl DigitTrie {
    pub fn new() -> Self {
        Self { nodes: vec![TrieNode::default()] }
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored payloads.
    pub fn key_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.payload.is_some()).count()
    }

    /// Store `payload` under `key`, replacing any previous payload.
    ///
    /// The key is validated before anything is allocated, so a rejected key
    /// leaves the trie untouched.
    pub fn insert(&mut self, key: &str, payload: &str) -> Result<()> {
        let mut digits = Vec::new();
        digits
            .try_reserve_exact(key.len())
            .map_err(|_| CodecError::alloc("trie key", key.len()))?;
        for (position, _) in key.char_indices() {
            digits.push(digit_at(key, position)?);
        }

        let mut stored = String::new();
        stored
            .try_reserve_exact(payload.len())
            .map_err(|_| CodecError::alloc("trie payload", payload.len()))?;
        stored.push_str(payload);

        let mut current = ROOT;
        for digit in digits {
            current = match self.nodes[current].children[digit] {
                Some(next) => next,
                None => {
                    self.nodes
                        .try_reserve(1)
                        .map_err(|_| CodecError::alloc("trie nodes", self.nodes.len() + 1))?;
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[current].children[digit] = Some(next);
                    next
                }
            };
        }
        self.nodes[current].payload = Some(stored);
        trace!(key_len = key.len(), nodes = self.nodes.len(), "inserted trie key");
        Ok(())
    }

    /// Exact-match lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut current = ROOT;
        for c in key.chars() {
            let digit = c.to_digit(RADIX)? as usize;
            current = self.nodes[current].children[digit]?;
        }
        self.nodes[current].payload.as_deref()
    }

    /// Expand `rle_text` back into the stored payloads.
    pub fn decode(&self, rle_text: &str, expansion: usize) -> Result<String> {
        let start = rle_text.len().saturating_mul(expansion).saturating_add(1);
        let mut out = TextBuffer::with_capacity("rle decode output", start)?;
        let bytes = rle_text.as_bytes();
        let mut current = ROOT;
        let mut i = 0;

        while i < bytes.len() {
            let digit = digit_at(rle_text, i)?;
            if let Some(next) = self.nodes[current].children[digit] {
                current = next;
                i += 1;
                if let Some(payload) = &self.nodes[current].payload {
                    out.push_str(payload)?;
                    current = ROOT;
                }
                continue;
            }

            let position = i;
            let mut count: u64 = 0;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                count = count
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(u64::from(bytes[i] - b'0')))
                    .ok_or(CodecError::CountOverflow { position })?;
                i += 1;
            }
            let payload = self.nodes[current]
                .payload
                .as_deref()
                .ok_or(CodecError::InvalidCountContext { position })?;
            let times =
                usize::try_from(count).map_err(|_| CodecError::alloc("rle decode output", usize::MAX))?;
            trace!(position, count, "expanding counted payload");
            out.push_repeated(payload, times)?;
            current = ROOT;
        }

        if current != ROOT {
            return Err(CodecError::IncompleteRleKey { position: bytes.len() });
        }
        Ok(out.into_string())
    }
}
