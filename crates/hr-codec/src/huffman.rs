//! Huffman encoding to and decoding from an ASCII bit-string.

use crate::buffer::{ByteBuffer, TextBuffer};
use crate::codes::CodeTable;
use crate::tree::{HuffmanTree, TreeNode};
use hr_core::{CodecError, Result};

/// Concatenate the code of every byte in `text`.
pub fn encode(text: &[u8], codes: &CodeTable) -> Result<String> {
    let mut out = TextBuffer::with_capacity("huffman bit-string", text.len())?;
    for &byte in text {
        let code = codes.get(byte).ok_or(CodecError::MissingCode { symbol: byte })?;
        out.push_str(code)?;
    }
    Ok(out.into_string())
}

/// Walk `tree` along `bits`, emitting a byte at every leaf.
pub fn decode(bits: &str, tree: &HuffmanTree) -> Result<Vec<u8>> {
    let root = tree.root();
    let mut out = ByteBuffer::with_capacity("decoded text", bits.len() + 1)?;
    let mut current = root;
    let mut last = 0;

    for (position, c) in bits.char_indices() {
        last = position;
        let next: &TreeNode = match (c, current) {
            ('0' | '1', TreeNode::Leaf { symbol, .. }) => {
                // Only reachable with a single-leaf root, whose code is "0".
                if c == '1' {
                    return Err(CodecError::TreeTraversalFailure { position });
                }
                out.push(*symbol)?;
                continue;
            }
            ('0', TreeNode::Internal { left, .. }) => left,
            ('1', TreeNode::Internal { right, .. }) => right,
            (found, _) => return Err(CodecError::MalformedHuffmanInput { position, found }),
        };

        if let TreeNode::Leaf { symbol, .. } = next {
            out.push(*symbol)?;
            current = root;
        } else {
            current = next;
        }
    }

    if !std::ptr::eq(current, root) {
        return Err(CodecError::IncompleteCode { position: last });
    }
    Ok(out.into_vec())
}
