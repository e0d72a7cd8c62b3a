//! Prefix-code generation.
//!
//! Codes are read off the tree by descending from the root: each edge to a
//! left child appends `0`, each edge to a right child a `1`. A code is
//! complete when a leaf is reached. Because symbols only live at leaves, no
//! code can be a prefix of another.

use std::collections::BTreeMap;
use std::fmt;

use bitvec::prelude::*;

use crate::freq::FrequencyTable;
use crate::tree::{HuffmanTree, Node, LEFT_BIT};

/// The bit-string assigned to one symbol.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: BitVec<u8, Msb0>,
}

impl Code {
    /// Number of bits in the code.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True for the zero-length code. Never produced by [`generate_codes`].
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The code's bits, root edge first.
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(self.bits.as_bitslice())
    }
}

impl From<&BitSlice<u8, Msb0>> for Code {
    fn from(bits: &BitSlice<u8, Msb0>) -> Self {
        Self {
            bits: bits.to_bitvec(),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({self})")
    }
}

/// Mapping from symbol to its prefix-free code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Generate the table for `tree`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        generate_codes(Some(tree.root()))
    }

    /// Code for `symbol`, if it occurred in the input.
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when the table holds no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    /// Length of the shortest code, 0 for an empty table.
    pub fn min_len(&self) -> usize {
        self.codes.values().map(Code::len).min().unwrap_or(0)
    }

    /// Length of the longest code, 0 for an empty table.
    pub fn max_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Size in bits of encoding an input with frequencies `table`.
    ///
    /// Symbols missing from the code table contribute nothing. Saturates at
    /// `u64::MAX`.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        table
            .iter()
            .filter_map(|(s, n)| self.get(s).map(|c| n.saturating_mul(c.len() as u64)))
            .fold(0u64, u64::saturating_add)
    }

    /// True if no code is empty or a prefix of a different symbol's code.
    pub fn is_prefix_free(&self) -> bool {
        self.codes.iter().all(|(a, ca)| {
            !ca.is_empty()
                && self
                    .codes
                    .iter()
                    .all(|(b, cb)| a == b || !ca.is_prefix_of(cb))
        })
    }
}

/// Assign a code to every leaf under `root`.
///
/// A lone root leaf gets the one-bit code `0`. An absent root yields an empty
/// table.
pub fn generate_codes(root: Option<&Node>) -> CodeTable {
    let mut table = CodeTable::default();
    let Some(root) = root else {
        return table;
    };

    if let Node::Leaf { symbol, .. } = root {
        let mut bits = BitVec::new();
        bits.push(LEFT_BIT);
        table.codes.insert(*symbol, Code { bits });
    } else {
        let mut prefix = BitVec::new();
        build_codes(root, &mut prefix, &mut table.codes);
    }

    log::debug!(
        "generated {} codes, longest {} bits",
        table.len(),
        table.max_len()
    );
    table
}

fn build_codes(node: &Node, prefix: &mut BitVec<u8, Msb0>, codes: &mut BTreeMap<u8, Code>) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(
                *symbol,
                Code {
                    bits: prefix.clone(),
                },
            );
        }
        Node::Internal { left, right, .. } => {
            prefix.push(LEFT_BIT);
            build_codes(left, prefix, codes);
            prefix.pop();

            prefix.push(!LEFT_BIT);
            build_codes(right, prefix, codes);
            prefix.pop();
        }
    }
}
