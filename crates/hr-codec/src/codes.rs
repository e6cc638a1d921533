//! Code table generation from a Huffman tree.

use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, TreeNode};
use hr_core::{CodecError, Result};
use std::collections::BTreeMap;

/// Code assigned to the only symbol of a single-symbol input.
pub const SINGLE_SYMBOL_CODE: &str = "0";

/// Byte → bit-string mapping for the symbols present in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, String>,
}

impl CodeTable {
    /// Walk the tree depth-first, '0' for left and '1' for right.
    pub fn from_tree(tree: &HuffmanTree, max_code_len: usize) -> Result<Self> {
        let mut codes = BTreeMap::new();
        match tree.root() {
            TreeNode::Leaf { symbol, .. } => {
                codes.insert(*symbol, SINGLE_SYMBOL_CODE.to_string());
            }
            root => {
                let mut path = String::new();
                assign(root, &mut path, &mut codes, max_code_len)?;
            }
        }
        Ok(Self { codes })
    }

    pub fn get(&self, symbol: u8) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.codes.iter().map(|(&b, c)| (b, c.as_str()))
    }

    /// Length of the longest code.
    pub fn longest(&self) -> usize {
        self.codes.values().map(String::len).max().unwrap_or(0)
    }

    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&str> = self.codes.values().map(String::as_str).collect();
        sorted.sort_unstable();
        // A prefix always sorts immediately before some string it prefixes.
        sorted.windows(2).all(|w| !w[1].starts_with(w[0]))
    }

    /// Exact number of bits the encoding of the analyzed text will take.
    pub fn encoded_len(&self, frequencies: &FrequencyTable) -> Option<usize> {
        frequencies.iter().try_fold(0usize, |acc, s| {
            let code_len = self.codes.get(&s.byte)?.len();
            let count = usize::try_from(s.count).ok()?;
            acc.checked_add(code_len.checked_mul(count)?)
        })
    }
}

fn assign(
    node: &TreeNode,
    path: &mut String,
    codes: &mut BTreeMap<u8, String>,
    max_code_len: usize,
) -> Result<()> {
    match node {
        TreeNode::Leaf { symbol, .. } => {
            if path.len() > max_code_len {
                return Err(CodecError::CodeLengthExceeded {
                    symbol: *symbol,
                    length: path.len(),
                    limit: max_code_len,
                });
            }
            codes.insert(*symbol, path.clone());
        }
        TreeNode::Internal { left, right, .. } => {
            path.push('0');
            assign(left, path, codes, max_code_len)?;
            path.pop();
            path.push('1');
            assign(right, path, codes, max_code_len)?;
            path.pop();
        }
    }
    Ok(())
}
