use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: char,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    #[inline]
    pub fn freq(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { freq, .. } => *freq,
            HuffmanNode::Internal { freq, .. } => *freq,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

/// Queue slot: min-heap on `(freq, seq)`.
///
/// `seq` is unique per slot, so the order is total and construction does not
/// depend on hash iteration or heap internals.
#[derive(Debug)]
struct Queued {
    freq: u64,
    seq: u64,
    node: HuffmanNode,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl Eq for Queued {}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Huffman tree built from the code-point frequencies of one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

/// Count every char of `content`, ordered by symbol
pub fn symbol_frequencies(content: &str) -> BTreeMap<char, u64> {
    let mut freqs = BTreeMap::new();
    for c in content.chars() {
        *freqs.entry(c).or_insert(0) += 1;
    }
    freqs
}

impl HuffmanTree {
    /// Build the tree for `content`.
    ///
    /// # Returns
    /// * `None` for empty content
    /// * a single leaf when `content` repeats one char
    /// * otherwise the tree of repeated minimum-pair merges
    pub fn build(content: &str) -> Option<Self> {
        Self::from_frequencies(&symbol_frequencies(content))
    }

    /// Build the tree from symbol frequencies.
    ///
    /// Leaves are queued in ascending symbol order and every merged node gets
    /// the next sequence number, so ties on frequency resolve the same way on
    /// every run. The first node popped becomes the left child.
    pub fn from_frequencies(freqs: &BTreeMap<char, u64>) -> Option<Self> {
        let mut heap = BinaryHeap::with_capacity(freqs.len());
        let mut seq = 0u64;
        for (&symbol, &freq) in freqs.iter().filter(|&(_, &f)| f > 0) {
            heap.push(Queued {
                freq,
                seq,
                node: HuffmanNode::Leaf { symbol, freq },
            });
            seq += 1;
        }

        loop {
            let left = heap.pop()?;
            let right = match heap.pop() {
                Some(right) => right,
                None => return Some(HuffmanTree { root: left.node }),
            };
            let freq = left.freq + right.freq;
            heap.push(Queued {
                freq,
                seq,
                node: HuffmanNode::Internal {
                    freq,
                    left: Box::new(left.node),
                    right: Box::new(right.node),
                },
            });
            seq += 1;
        }
    }

    #[inline]
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Total frequency, i.e. the number of chars of the source text
    #[inline]
    pub fn freq(&self) -> u64 {
        self.root.freq()
    }

    /// Number of leaves (distinct symbols)
    pub fn symbol_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => count += 1,
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
            }
        }
        count
    }
}
