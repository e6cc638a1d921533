//! Huffman + run-length text compression.
//!
//! Stages:
//! 1. Frequency analysis (first-seen symbol order)
//! 2. Huffman tree construction over a binary min-heap
//! 3. Code table generation and bit-string encoding
//! 4. Run-length encoding of the bit-string
//! 5. Decoding via a digit trie, then a walk of the Huffman tree

pub mod buffer;
pub mod codes;
pub mod frequency;
pub mod huffman;
pub mod min_heap;
pub mod pipeline;
pub mod rle;
pub mod tree;
pub mod trie;

pub use codes::CodeTable;
pub use frequency::{FrequencyTable, Symbol};
pub use hr_core::{BufferConfig, CodecConfig, CodecError, Result};
pub use min_heap::{MinHeap, Weighted};
pub use pipeline::{CodecPipeline, Compressed, Decompressed, RoundTripReport};
pub use tree::{HuffmanTree, TreeNode};
pub use trie::DigitTrie;
