//! Huffman tree construction and lifetime.
//!
//! # Construction
//!
//! One leaf per present symbol is inserted into a [`PriorityQueue`] in
//! ascending symbol order. While more than one node remains, the two
//! lowest-frequency nodes are extracted and joined under a new internal node
//! whose frequency is their sum; the first-extracted node becomes the left
//! child. The last node standing is the root.
//!
//! With the queue's insertion-order tie-break this procedure is fully
//! deterministic: the same [`FrequencyTable`] always yields the same tree.

use crate::error::{Error, Result};
use crate::freq::FrequencyTable;
use crate::queue::PriorityQueue;

/// Bit value for descending to the left child. Right is its complement.
pub(crate) const LEFT_BIT: bool = false;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol and its frequency.
    Leaf {
        /// The byte this leaf decodes to.
        symbol: u8,
        /// Occurrence count of `symbol`.
        freq: u64,
    },
    /// Two exclusively owned children.
    Internal {
        /// Child reached by a `0` bit.
        left: Box<Node>,
        /// Child reached by a `1` bit.
        right: Box<Node>,
        /// Sum of the children's frequencies.
        freq: u64,
    },
}

impl Node {
    /// Frequency of this subtree.
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    /// True for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The symbol held by a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Child selected by `bit`, `None` at a leaf.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => {
                Some(if bit == LEFT_BIT { left.as_ref() } else { right.as_ref() })
            }
        }
    }

    /// Length of the longest path from this node down to a leaf.
    pub fn depth(&self) -> usize {
        walk(self).map(|(_, d)| d).max().unwrap_or(0)
    }

    fn merge(left: Node, right: Node) -> Result<Node> {
        let freq = left
            .freq()
            .checked_add(right.freq())
            .ok_or(Error::FrequencyOverflow)?;
        Ok(Node::Internal {
            left: Box::new(left),
            right: Box::new(right),
            freq,
        })
    }
}

/// A finished, immutable Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for `table`.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if no symbol has a non-zero count,
    /// `Error::FrequencyOverflow` if the counts sum past `u64::MAX`, or
    /// `Error::AllocationFailure` if the queue cannot be allocated.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let distinct = table.distinct();
        if distinct == 0 {
            return Err(Error::EmptyInput);
        }
        // Every internal weight is bounded by the root weight, the total.
        table.total()?;

        let mut pq = PriorityQueue::try_with_capacity(distinct)?;
        for (symbol, freq) in table.iter() {
            pq.insert(Node::Leaf { symbol, freq }, freq);
        }

        while pq.size() > 1 {
            let left = pq.extract_min()?;
            let right = pq.extract_min()?;
            log::trace!("merge {} + {}", left.freq(), right.freq());
            let parent = Node::merge(left, right)?;
            let freq = parent.freq();
            pq.insert(parent, freq);
        }

        let tree = Self {
            root: pq.extract_min()?,
        };
        log::debug!(
            "built huffman tree: {} symbols, {} nodes, depth {}",
            distinct,
            tree.node_count(),
            tree.depth()
        );
        Ok(tree)
    }

    /// Count `data` and build its tree.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `data` is empty.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::build(&FrequencyTable::from_bytes(data))
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total frequency, i.e. the length of the input the tree was built from.
    pub fn total(&self) -> u64 {
        self.root.freq()
    }

    /// Number of nodes, leaves and internal. Always `2 * leaves - 1`.
    pub fn node_count(&self) -> usize {
        walk(&self.root).count()
    }

    /// Number of leaves, one per distinct symbol.
    pub fn leaf_count(&self) -> usize {
        walk(&self.root).filter(|(n, _)| n.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path. A single-leaf tree has depth 0.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Consume the tree and free every node, returning how many were freed.
    pub fn release(self) -> usize {
        release(Some(self))
    }
}

/// Pre-order iterator over `(node, depth)` below `root`.
fn walk(root: &Node) -> impl Iterator<Item = (&Node, usize)> {
    let mut stack = vec![(root, 0usize)];
    std::iter::from_fn(move || {
        let (node, depth) = stack.pop()?;
        if let Node::Internal { left, right, .. } = node {
            stack.push((right.as_ref(), depth + 1));
            stack.push((left.as_ref(), depth + 1));
        }
        Some((node, depth))
    })
}

/// Free every node of `tree`.
///
/// Each node is detached from its parent and freed exactly once; nothing in the
/// tree is reachable afterwards. Returns the number of nodes freed. Releasing
/// `None` is a no-op returning 0.
pub fn release(tree: Option<HuffmanTree>) -> usize {
    let Some(tree) = tree else {
        return 0;
    };

    let mut pending = vec![tree.root];
    let mut freed = 0;
    while let Some(node) = pending.pop() {
        if let Node::Internal { left, right, .. } = node {
            pending.push(*right);
            pending.push(*left);
        }
        freed += 1;
    }
    freed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_symbols(node: &Node, out: &mut Vec<u8>) {
        match node {
            Node::Leaf { symbol, .. } => out.push(*symbol),
            Node::Internal { left, right, .. } => {
                leaf_symbols(left, out);
                leaf_symbols(right, out);
            }
        }
    }

    #[test]
    fn test_build_aaabbc_shape() {
        let tree = HuffmanTree::from_bytes(b"aaabbc").unwrap();
        // c(1) and b(2) merge first into 3; 'a'(3) was inserted earlier so it is
        // extracted first and becomes the left child of the root.
        let expected = Node::Internal {
            left: Box::new(Node::Leaf { symbol: b'a', freq: 3 }),
            right: Box::new(Node::Internal {
                left: Box::new(Node::Leaf { symbol: b'c', freq: 1 }),
                right: Box::new(Node::Leaf { symbol: b'b', freq: 2 }),
                freq: 3,
            }),
            freq: 6,
        };
        assert_eq!(tree.root(), &expected);
        assert_eq!(tree.total(), 6);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_single_symbol_is_root_leaf() {
        let tree = HuffmanTree::from_bytes(b"aaaa").unwrap();
        assert_eq!(tree.root(), &Node::Leaf { symbol: b'a', freq: 4 });
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.root().child(LEFT_BIT), None);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(HuffmanTree::from_bytes(b""), Err(Error::EmptyInput)));
        assert!(matches!(
            HuffmanTree::build(&FrequencyTable::new()),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_node_counts() {
        let data = b"abracadabra alakazam";
        let tree = HuffmanTree::from_bytes(data).unwrap();
        let distinct = FrequencyTable::from_bytes(data).distinct();
        assert_eq!(tree.leaf_count(), distinct);
        assert_eq!(tree.node_count(), 2 * distinct - 1);

        let mut symbols = Vec::new();
        leaf_symbols(tree.root(), &mut symbols);
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), distinct);
    }

    #[test]
    fn test_internal_freq_is_sum_of_children() {
        let tree = HuffmanTree::from_bytes(b"she sells sea shells by the sea shore").unwrap();
        for (node, _) in walk(tree.root()) {
            if let Node::Internal { left, right, freq } = node {
                assert_eq!(*freq, left.freq() + right.freq());
            }
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let table = FrequencyTable::from_bytes(b"eeeeddddccbbaa");
        assert_eq!(HuffmanTree::build(&table).unwrap(), HuffmanTree::build(&table).unwrap());
    }

    #[test]
    fn test_fibonacci_frequencies_grow_deep() {
        let mut table = FrequencyTable::new();
        let (mut a, mut b) = (1u64, 1u64);
        for s in 0..40u8 {
            table.set(s, a);
            (a, b) = (b, a + b);
        }
        let tree = HuffmanTree::build(&table).unwrap();
        assert_eq!(tree.depth(), 39);
    }

    #[test]
    fn test_release_frees_every_node() {
        let tree = HuffmanTree::from_bytes(b"hello huffman").unwrap();
        let nodes = tree.node_count();
        assert_eq!(tree.release(), nodes);
        assert_eq!(release(None), 0);
    }

    #[test]
    fn test_overflowing_frequencies_are_errors() {
        let table: FrequencyTable = [(b'a', u64::MAX), (b'b', 1)].into_iter().collect();
        assert!(matches!(HuffmanTree::build(&table), Err(Error::FrequencyOverflow)));

        let half = u64::MAX / 2 + 1;
        let table: FrequencyTable = [(b'a', half), (b'b', half)].into_iter().collect();
        assert!(matches!(HuffmanTree::build(&table), Err(Error::FrequencyOverflow)));

        // The largest representable total still builds.
        let table: FrequencyTable = [(b'a', u64::MAX - 1), (b'b', 1)].into_iter().collect();
        assert_eq!(HuffmanTree::build(&table).unwrap().total(), u64::MAX);
    }
}
