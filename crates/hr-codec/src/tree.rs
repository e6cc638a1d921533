//! Huffman tree construction.

use crate::frequency::FrequencyTable;
use crate::min_heap::{MinHeap, Weighted};
use hr_core::{CodecError, Result};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        TreeNode::Leaf { symbol, weight }
    }

    /// Join two subtrees under a new parent carrying their summed weight.
    pub fn merge(left: TreeNode, right: TreeNode) -> Self {
        TreeNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            TreeNode::Leaf { weight, .. } | TreeNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    pub fn symbol(&self) -> Option<u8> {
        match self {
            TreeNode::Leaf { symbol, .. } => Some(*symbol),
            TreeNode::Internal { .. } => None,
        }
    }

    pub fn left(&self) -> Option<&TreeNode> {
        match self {
            TreeNode::Internal { left, .. } => Some(left),
            TreeNode::Leaf { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&TreeNode> {
        match self {
            TreeNode::Internal { right, .. } => Some(right),
            TreeNode::Leaf { .. } => None,
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    pub fn internal_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { left, right, .. } => {
                1 + left.internal_count() + right.internal_count()
            }
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl Weighted for TreeNode {
    fn weight(&self) -> u64 {
        TreeNode::weight(self)
    }
}

/// A built prefix-code tree.
///
/// With a single distinct symbol the root is that symbol's leaf. Code
/// generation and decoding both treat such a root as the one-bit code "0".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: TreeNode,
}

impl HuffmanTree {
    /// Greedy Huffman construction: repeatedly merge the two lightest nodes.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let mut leaves = Vec::new();
        leaves
            .try_reserve_exact(frequencies.len())
            .map_err(|_| CodecError::alloc("tree leaves", frequencies.len()))?;
        leaves.extend(frequencies.iter().map(|s| TreeNode::leaf(s.byte, s.count)));

        let mut heap = MinHeap::build(leaves);
        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.extract_min(), heap.extract_min()) else {
                break;
            };
            trace!(left = left.weight(), right = right.weight(), "merging nodes");
            heap.insert(TreeNode::merge(left, right))?;
        }

        let root = heap.extract_min().ok_or(CodecError::EmptyInput)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// True when the input had only one distinct symbol.
    pub fn is_degenerate(&self) -> bool {
        self.root.is_leaf()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn internal_count(&self) -> usize {
        self.root.internal_count()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}
