//! Huffman decoder.
//!
//! The decoder keeps a cursor into the tree, starting at the root. Each bit
//! moves the cursor to a child; reaching a leaf emits its symbol and resets the
//! cursor to the root. A well-formed stream ends with the cursor back at the
//! root.

use bitvec::prelude::*;

use crate::error::{Error, Result};
use crate::stream::EncodedStream;
use crate::tree::{HuffmanTree, Node, LEFT_BIT};

/// Decode `bits` by walking the tree under `root`.
///
/// # Errors
/// Returns `Error::CorruptStream` if `root` is absent, if a bit selects a path
/// that does not exist (only possible for a single-leaf tree), or if the
/// stream ends partway through a code.
pub fn decode(bits: &BitSlice<u8, Msb0>, root: Option<&Node>) -> Result<Vec<u8>> {
    let root = root.ok_or_else(|| Error::corrupt("no tree to decode with"))?;

    // No code is longer than the tree is deep, so this many symbols at least.
    let mut out = Vec::new();
    out.try_reserve_exact(bits.len() / root.depth().max(1))?;

    if let Node::Leaf { symbol, .. } = root {
        for (pos, bit) in bits.iter().by_vals().enumerate() {
            if bit != LEFT_BIT {
                log::warn!("unexpected bit at position {pos} for single-symbol tree");
                return Err(Error::corrupt(format!(
                    "bit {} at position {pos} has no branch in a single-symbol tree",
                    u8::from(bit)
                )));
            }
            out.push(*symbol);
        }
        return Ok(out);
    }

    let mut cursor = root;
    let mut code_start = 0;
    for (pos, bit) in bits.iter().by_vals().enumerate() {
        cursor = match cursor.child(bit) {
            Some(next) => next,
            None => {
                return Err(Error::corrupt(format!(
                    "cursor stuck at leaf at position {pos}"
                )))
            }
        };
        if let Node::Leaf { symbol, .. } = cursor {
            out.push(*symbol);
            cursor = root;
            code_start = pos + 1;
        }
    }

    if !std::ptr::eq(cursor, root) {
        log::warn!(
            "stream of {} bits truncated inside the code starting at bit {code_start}",
            bits.len()
        );
        return Err(Error::corrupt(format!(
            "stream ends mid-code ({} dangling bits)",
            bits.len() - code_start
        )));
    }

    Ok(out)
}

/// Decode a textual stream of `'0'` and `'1'` characters.
///
/// # Errors
/// Returns `Error::CorruptStream` for any other character, or for the
/// conditions listed on [`decode`].
pub fn decode_str(bits: &str, root: Option<&Node>) -> Result<Vec<u8>> {
    let stream: EncodedStream = bits.parse()?;
    decode(stream.as_bitslice(), root)
}

/// Huffman decoder that owns its tree.
#[derive(Clone, Debug)]
pub struct HuffmanDecoder {
    tree: HuffmanTree,
}

impl HuffmanDecoder {
    /// Create a decoder for `tree`.
    pub fn new(tree: HuffmanTree) -> Self {
        Self { tree }
    }

    /// The decoder's tree.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// Decode a bit stream into a symbol sequence.
    ///
    /// # Errors
    /// Returns `Error::CorruptStream` for truncated or invalid streams.
    pub fn decode(&self, stream: &EncodedStream) -> Result<Vec<u8>> {
        decode(stream.as_bitslice(), Some(self.tree.root()))
    }

    /// Give the tree back, e.g. to release it.
    pub fn into_tree(self) -> HuffmanTree {
        self.tree
    }
}
