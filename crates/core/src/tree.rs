//! Huffman tree construction.
//!
//! The builder keeps the working set in a min-heap keyed by
//! `(weight, sequence)`. Leaves get sequence numbers in ascending symbol
//! order, merged nodes get the next free number, so among equal weights the
//! node that entered the heap first always leaves it first. The same
//! frequency table therefore always yields the same tree.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// A node of a strict binary prefix tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        HuffmanNode::Leaf { symbol, weight }
    }

    /// Join two subtrees; `left` takes the `0` branch.
    pub fn merge(left: HuffmanNode, right: HuffmanNode) -> Self {
        HuffmanNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } | HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// A node waiting in the builder's heap.
#[derive(Debug)]
struct Pending {
    weight: u64,
    sequence: usize,
    node: HuffmanNode,
}

// Reverse ordering for min-heap (lighter first, then earlier insertion)
impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// An owned Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree for `freqs` by repeatedly merging the two lightest nodes.
    ///
    /// The first node popped becomes the left child. A table with a single
    /// symbol produces a tree that is just that leaf.
    ///
    /// # Errors
    /// `Error::EmptyInput` if the table has no symbols.
    pub fn build(freqs: &FrequencyTable) -> Result<Self> {
        let mut heap: BinaryHeap<Pending> = freqs
            .iter()
            .enumerate()
            .map(|(sequence, (symbol, weight))| Pending {
                weight,
                sequence,
                node: HuffmanNode::leaf(symbol, weight),
            })
            .collect();

        let mut next_sequence = heap.len();

        while heap.len() > 1 {
            if let (Some(first), Some(second)) = (heap.pop(), heap.pop()) {
                let node = HuffmanNode::merge(first.node, second.node);
                heap.push(Pending {
                    weight: node.weight(),
                    sequence: next_sequence,
                    node,
                });
                next_sequence += 1;
            }
        }

        let root = heap.pop().ok_or(Error::EmptyInput)?.node;
        let tree = HuffmanTree { root };

        debug!(
            symbols = freqs.len(),
            weight = tree.weight(),
            height = tree.height(),
            "built huffman tree"
        );

        Ok(tree)
    }

    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Total weight, equal to the length of the analyzed input.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => count += 1,
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path (0 for a lone leaf).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => height = height.max(depth),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push((left.as_ref(), depth + 1));
                    stack.push((right.as_ref(), depth + 1));
                }
            }
        }
        height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_for(data: &[u8]) -> HuffmanTree {
        HuffmanTree::build(&FrequencyTable::from_bytes(data).unwrap()).unwrap()
    }

    #[test]
    fn test_single_symbol_is_lone_leaf() {
        let tree = tree_for(b"aaaa");
        assert_eq!(tree.root(), &HuffmanNode::leaf(b'a', 4));
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.weight(), 4);
    }

    #[test]
    fn test_merge_order() {
        // a:5 b:2 c:1 d:1 -> (c,d)=2, (b,(c,d))=4, ((b,(c,d)),a)=9
        let tree = tree_for(b"aaaaabbcd");

        let cd = HuffmanNode::merge(HuffmanNode::leaf(b'c', 1), HuffmanNode::leaf(b'd', 1));
        let bcd = HuffmanNode::merge(HuffmanNode::leaf(b'b', 2), cd);
        let expected = HuffmanNode::merge(bcd, HuffmanNode::leaf(b'a', 5));

        assert_eq!(tree.root(), &expected);
        assert_eq!(tree.weight(), 9);
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_equal_weights_pop_in_insertion_order() {
        // All leaves weigh 1: a+b first, then c+d, then the two pairs.
        let tree = tree_for(b"abcd");

        let ab = HuffmanNode::merge(HuffmanNode::leaf(b'a', 1), HuffmanNode::leaf(b'b', 1));
        let cd = HuffmanNode::merge(HuffmanNode::leaf(b'c', 1), HuffmanNode::leaf(b'd', 1));
        assert_eq!(tree.root(), &HuffmanNode::merge(ab, cd));
    }

    #[test]
    fn test_leaf_wins_tie_against_later_internal_node() {
        // c:1 d:1 merge to weight 2, which ties with leaf b:2 inserted earlier.
        let tree = tree_for(b"bbcd");
        match tree.root() {
            HuffmanNode::Internal { left, right, .. } => {
                assert_eq!(**left, HuffmanNode::leaf(b'b', 2));
                assert!(!right.is_leaf());
            }
            leaf => panic!("expected internal root, got {:?}", leaf),
        }
    }

    #[test]
    fn test_internal_weight_is_sum_of_children() {
        let data: Vec<u8> = (0..200u32).map(|i| (i * i % 37) as u8).collect();
        let tree = tree_for(&data);

        let mut stack = vec![tree.root()];
        while let Some(node) = stack.pop() {
            if let HuffmanNode::Internal { weight, left, right } = node {
                assert_eq!(*weight, left.weight() + right.weight());
                stack.push(left);
                stack.push(right);
            }
        }
        assert_eq!(tree.weight(), 200);
    }

    #[test]
    fn test_build_from_stored_counts() {
        let freqs =
            FrequencyTable::from_counts([(b'd', 1), (b'a', 5), (b'c', 1), (b'b', 2)]).unwrap();
        let tree: Result<HuffmanTree> = HuffmanTree::build(&freqs);
        assert_eq!(tree, Ok(tree_for(b"aaaaabbcd")));
    }

    #[test]
    fn test_deterministic() {
        let data = b"the quick brown fox jumps over the lazy dog";
        assert_eq!(tree_for(data), tree_for(data));
    }
}
