use std::{cmp::{Ordering, Reverse}, collections::BinaryHeap};

use tracing::debug;

use super::{FrequencyTable, K_NUM_SYMBOLS};

/// A node of the merge tree. Internal nodes own both children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    #[inline(always)]
    pub fn freq(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { freq, .. } | HuffmanNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// Heap entry ordered by `(freq, key)`.
///
/// Leaves use their symbol as key and the n-th merged node uses
/// `K_NUM_SYMBOLS + n`, so equal frequencies always resolve the same way:
/// leaves first by ascending symbol, then internal nodes by creation order.
#[derive(Debug)]
struct HeapNode {
    key: usize,
    node: HuffmanNode,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.node
            .freq()
            .cmp(&other.node.freq())
            .then(self.key.cmp(&other.key))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapNode {}

/// Builds the merge tree for `freqs`. Returns `None` for an empty table and a
/// bare leaf when only one symbol is present.
///
/// The caller guarantees that `freqs.total()` fits in a `u64`; every merged
/// frequency is bounded by it.
pub fn build_tree(freqs: &FrequencyTable) -> Option<HuffmanNode> {
    let mut freq_tree: BinaryHeap<Reverse<HeapNode>> = freqs
        .iter()
        .map(|(symbol, freq)| {
            Reverse(HeapNode {
                key: symbol as usize,
                node: HuffmanNode::Leaf { symbol, freq },
            })
        })
        .collect();

    let mut next_key = K_NUM_SYMBOLS;

    while freq_tree.len() > 1 {
        let (Some(Reverse(first)), Some(Reverse(second))) = (freq_tree.pop(), freq_tree.pop())
        else {
            break;
        };

        let merged = HuffmanNode::Internal {
            freq: first.node.freq() + second.node.freq(),
            left: Box::new(first.node),
            right: Box::new(second.node),
        };

        freq_tree.push(Reverse(HeapNode { key: next_key, node: merged }));
        next_key += 1;
    }

    debug!("built huffman tree with {} merges", next_key - K_NUM_SYMBOLS);

    freq_tree.pop().map(|Reverse(root)| root.node)
}
