use std::cmp::Ordering;
use std::fmt;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        byte: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(b: u8, f: u64) -> Self {
        HuffNode::Leaf { weight: f, byte: b }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn merge(a: Self, b: Self) -> Self {
        // a was extracted first and goes left
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, depth: usize, label: &str) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            HuffNode::Leaf { byte, weight } => {
                writeln!(f, "{indent}{label}-> Leaf: {byte:#04x} [weight: {weight}]")
            }
            HuffNode::Internal { weight, left, right } => {
                writeln!(f, "{indent}{label}-> Internal [weight: {weight}]")?;
                left.fmt_node(f, depth + 1, "L")?;
                right.fmt_node(f, depth + 1, "R")
            }
        }
    }
}

/// Heap entry: orders by weight, then by insertion sequence so that equal
/// weights come out first-inserted-first.
#[derive(Debug)]
struct Pending {
    weight: u64,
    seq: usize,
    node: HuffNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
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
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Leaves are seeded in ascending symbol order. A table with a single
    /// symbol yields a bare leaf as the root.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let nodes: Vec<Pending> = frequencies
            .iter()
            .enumerate()
            .map(|(seq, (byte, count))| Pending {
                weight: count,
                seq,
                node: HuffNode::new(byte, count),
            })
            .collect();
        let mut next_seq = nodes.len();

        let mut heap = MinHeap::build(nodes);
        while let Some(x) = heap.extract_min() {
            let Some(y) = heap.extract_min() else {
                return Ok(HuffmanTree { root: x.node });
            };

            let z = HuffNode::merge(x.node, y.node);
            heap.insert(Pending {
                weight: z.weight(),
                seq: next_seq,
                node: z,
            });
            next_seq += 1;
        }

        Err(HuffmanError::EmptyInput)
    }

    pub fn from_root(root: HuffNode) -> Self {
        HuffmanTree { root }
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path; 0 for a single-leaf tree.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman Tree Structure:")?;
        self.root.fmt_node(f, 0, "root")
    }
}
