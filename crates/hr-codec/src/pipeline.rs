//! Compression pipeline: Huffman stage, then RLE, and the reverse path.

use crate::codes::CodeTable;
use crate::frequency::FrequencyTable;
use crate::trie::DigitTrie;
use crate::tree::HuffmanTree;
use crate::{huffman, rle};
use hr_core::{CodecConfig, CodecError, Result};
use serde::Serialize;
use std::mem::size_of;
use tracing::debug;

/// Output of the compression stages.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub huffman_bits: String,
    pub rle_text: String,
    pub codes: CodeTable,
    pub tree: HuffmanTree,
}

impl Compressed {
    /// RLE characters per bit of original input.
    pub fn ratio(&self, original_len: usize) -> f64 {
        if original_len == 0 { return 1.0; }
        self.rle_text.len() as f64 / (original_len as f64 * 8.0)
    }
}

/// Output of the decompression stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressed {
    pub huffman_bits: String,
    pub text: Vec<u8>,
}

/// Diagnostics from a full compress/decompress cycle.
#[derive(Debug, Clone, Serialize)]
pub struct RoundTripReport {
    pub original_len: usize,
    pub distinct_symbols: usize,
    pub longest_code: usize,
    pub huffman_bits_len: usize,
    pub bit_runs: usize,
    pub rle_len: usize,
    pub bits_match: bool,
    pub text_match: bool,
    pub ratio: f64,
    /// Rough bytes held by the run's structures and buffers.
    pub estimated_space: usize,
}

impl RoundTripReport {
    pub fn is_lossless(&self) -> bool {
        self.bits_match && self.text_match
    }
}

/// Runs the pipeline stages under one configuration.
#[derive(Debug, Clone, Default)]
pub struct CodecPipeline {
    config: CodecConfig,
}

impl CodecPipeline {
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn analyze(&self, text: &[u8]) -> FrequencyTable {
        FrequencyTable::from_bytes(text)
    }

    /// Huffman-encode `text`, then run-length encode the bit-string.
    pub fn compress(&self, text: &[u8]) -> Result<Compressed> {
        let frequencies = self.analyze(text);
        let tree = HuffmanTree::build(&frequencies)?;
        let codes = CodeTable::from_tree(&tree, self.config.max_code_len)?;
        debug!(
            input_len = text.len(),
            symbols = frequencies.len(),
            longest_code = codes.longest(),
            "built code table"
        );

        let huffman_bits = huffman::encode(text, &codes)?;
        let rle_text = rle::encode(&huffman_bits, self.config.buffers.rle_expansion)?;
        debug!(bits = huffman_bits.len(), rle_len = rle_text.len(), "compressed input");

        Ok(Compressed { huffman_bits, rle_text, codes, tree })
    }

    /// Index the RLE stream so it can be expanded back to the bit-string.
    pub fn build_trie(&self, rle_text: &str, huffman_bits: &str) -> Result<DigitTrie> {
        let mut trie = DigitTrie::new();
        trie.insert(rle_text, huffman_bits)?;
        Ok(trie)
    }

    pub fn decompress(
        &self,
        rle_text: &str,
        tree: &HuffmanTree,
        trie: &DigitTrie,
    ) -> Result<Decompressed> {
        let huffman_bits = trie.decode(rle_text, self.config.buffers.decode_expansion)?;
        let text = huffman::decode(&huffman_bits, tree)?;
        debug!(bits = huffman_bits.len(), output_len = text.len(), "decompressed input");
        Ok(Decompressed { huffman_bits, text })
    }

    /// Compress, decompress and compare against `text`.
    pub fn round_trip(&self, text: &[u8]) -> Result<RoundTripReport> {
        let compressed = self.compress(text)?;
        let trie = self.build_trie(&compressed.rle_text, &compressed.huffman_bits)?;
        let restored = self.decompress(&compressed.rle_text, &compressed.tree, &trie)?;

        let bits_match = restored.huffman_bits == compressed.huffman_bits;
        let text_match = restored.text == text;
        if self.config.verify_round_trip {
            if !bits_match {
                return Err(CodecError::RoundTripMismatch { stage: "rle decode" });
            }
            if !text_match {
                return Err(CodecError::RoundTripMismatch { stage: "huffman decode" });
            }
        }

        let tree_nodes = compressed.tree.leaf_count() + compressed.tree.internal_count();
        let estimated_space = size_of::<crate::tree::TreeNode>() * tree_nodes
            + trie.node_count() * (size_of::<Option<String>>() + 10 * size_of::<Option<usize>>())
            + text.len()
            + compressed.huffman_bits.len() * 2
            + compressed.rle_text.len()
            + restored.huffman_bits.len()
            + restored.text.len();

        let report = RoundTripReport {
            original_len: text.len(),
            distinct_symbols: compressed.codes.len(),
            longest_code: compressed.codes.longest(),
            huffman_bits_len: compressed.huffman_bits.len(),
            bit_runs: rle::runs(&compressed.huffman_bits).len(),
            rle_len: compressed.rle_text.len(),
            bits_match,
            text_match,
            ratio: compressed.ratio(text.len()),
            estimated_space,
        };
        debug!(lossless = report.is_lossless(), rle_len = report.rle_len, "round trip finished");
        Ok(report)
    }
}
