//! # Static Huffman Coding
//!
//! *Lossless compression with frequency-minimal prefix codes.*
//!
//! ## Intuition First
//!
//! In a plain text file every byte costs eight bits, whether it is the letter
//! `e` that shows up every few characters or a `~` that appears once. Huffman
//! coding gives common bytes short codes and rare bytes long ones. Codes are
//! chosen so that none is the beginning of another, so a reader can tell where
//! one code ends and the next begins without any separators.
//!
//! ## The Problem
//!
//! Given how often each byte occurs, find a set of prefix-free bit-strings
//! that minimizes the total encoded length. Huffman's greedy answer: keep
//! joining the two least frequent subtrees until one tree remains. Paths from
//! the root to each leaf are the codes.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1949  Fano        Shannon-Fano coding: top-down splitting, not optimal
//! 1952  Huffman     Bottom-up merging: optimal prefix codes
//! 1977  Gallager    Adaptive Huffman coding
//! 1989  Deflate     Huffman as the entropy stage of zip/gzip
//! ```
//!
//! ## Mathematical Formulation
//!
//! With counts $f_s$ and code lengths $\ell_s$, Huffman coding minimizes
//!
//! ```text
//! L = Σ f_s · ℓ_s      subject to   Σ 2^(-ℓ_s) ≤ 1
//! ```
//!
//! and lands within one bit per symbol of the entropy bound. A consequence of
//! optimality: if $f_x > f_y$ then $\ell_x \le \ell_y$.
//!
//! ## Complexity Analysis
//!
//! - **Counting**: $O(n)$ over the input.
//! - **Tree construction**: $O(k \log k)$ for $k$ distinct symbols.
//! - **Encode / decode**: $O(n + \text{bits})$; decoding walks one edge per bit.
//!
//! ## Failure Modes
//!
//! 1. **Empty input**: there is no tree to build; reported as [`Error::EmptyInput`].
//! 2. **Truncated streams**: a stream cut inside a code is reported as
//!    [`Error::CorruptStream`] rather than silently dropping the tail.
//! 3. **Skewed distributions**: Fibonacci-like counts produce codes far longer
//!    than eight bits; codes here are growable bit vectors with no fixed bound.
//!
//! ## Implementation Notes
//!
//! - Ties in the priority queue break by insertion order, so a given
//!   [`FrequencyTable`] always yields the same tree and codes.
//! - The first node extracted in a merge becomes the left child; left edges are
//!   `0`, right edges `1`, in both the code generator and the decoder.
//! - A single-symbol input is a lone leaf whose code is `0`.
//!
//! ```
//! use huffcode::{compress, decompress};
//!
//! let (codec, stream) = compress(b"aaabbc")?;
//! assert_eq!(codec.codes().get(b'a').unwrap().to_string(), "0");
//! assert_eq!(decompress(&codec, &stream)?, b"aaabbc");
//! # Ok::<(), huffcode::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Cover, T. M. & Thomas, J. A. (2006). *Elements of Information Theory*, ch. 5.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod code;
pub mod codec;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod freq;
pub mod queue;
pub mod stream;
pub mod tree;

pub use code::{generate_codes, Code, CodeTable};
pub use codec::{compress, compress_reader, compress_with, decompress, HuffmanCodec};
pub use config::CodecConfig;
pub use decoder::{decode, decode_str, HuffmanDecoder};
pub use encoder::{encode, encode_iter, HuffmanEncoder};
pub use error::{Error, Result};
pub use freq::FrequencyTable;
pub use queue::PriorityQueue;
pub use stream::EncodedStream;
pub use tree::{release, HuffmanTree, Node};
