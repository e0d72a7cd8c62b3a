//! Huffman encoder.

use crate::code::CodeTable;
use crate::error::{Error, Result};
use crate::stream::EncodedStream;

/// Encode `data` by concatenating each byte's code in input order.
///
/// # Errors
/// Returns `Error::UnknownSymbol` if a byte has no entry in `codes`, which
/// means the table was not built from this input.
pub fn encode(data: &[u8], codes: &CodeTable) -> Result<EncodedStream> {
    encode_iter(data.iter().copied(), codes)
}

/// Encode bytes pulled from `input`, reading it exactly once.
///
/// The output buffer starts at the smallest size the input can produce
/// (its length hint times the shortest code) and grows from there.
///
/// # Errors
/// Returns `Error::UnknownSymbol` for a byte without a code, or
/// `Error::AllocationFailure` if the initial buffer cannot be reserved.
pub fn encode_iter<I>(input: I, codes: &CodeTable) -> Result<EncodedStream>
where
    I: IntoIterator<Item = u8>,
{
    let input = input.into_iter();
    let (len_hint, _) = input.size_hint();
    let mut out = EncodedStream::try_with_capacity(len_hint.saturating_mul(codes.min_len()))?;
    for b in input {
        let code = codes.get(b).ok_or(Error::UnknownSymbol(b))?;
        out.push_code(code);
    }
    Ok(out)
}

/// Huffman encoder bound to one code table.
#[derive(Clone, Debug)]
pub struct HuffmanEncoder {
    codes: CodeTable,
}

impl HuffmanEncoder {
    /// Create an encoder from a generated code table.
    pub fn new(codes: CodeTable) -> Self {
        Self { codes }
    }

    /// The encoder's code table.
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Encode a byte sequence into a bit stream.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` for bytes outside the table.
    pub fn encode(&self, data: &[u8]) -> Result<EncodedStream> {
        encode(data, &self.codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::HuffmanTree;

    #[test]
    fn test_encode_aaabbc() {
        let data = b"aaabbc";
        let codes = CodeTable::from_tree(&HuffmanTree::from_bytes(data).unwrap());
        let stream = encode(data, &codes).unwrap();
        assert_eq!(stream.to_string(), "000111110");
    }

    #[test]
    fn test_single_symbol_encodes_one_bit_each() {
        let data = b"aaaa";
        let codes = CodeTable::from_tree(&HuffmanTree::from_bytes(data).unwrap());
        assert_eq!(encode(data, &codes).unwrap().to_string(), "0000");
    }

    #[test]
    fn test_unknown_symbol() {
        let codes = CodeTable::from_tree(&HuffmanTree::from_bytes(b"abc").unwrap());
        let encoder = HuffmanEncoder::new(codes);
        assert!(matches!(encoder.encode(b"abz"), Err(Error::UnknownSymbol(b'z'))));
    }

    #[test]
    fn test_empty_data_encodes_to_empty_stream() {
        let codes = CodeTable::from_tree(&HuffmanTree::from_bytes(b"abc").unwrap());
        assert!(encode(b"", &codes).unwrap().is_empty());
    }

    #[test]
    fn test_encode_single_pass_over_reader() {
        let text = b"she sells sea shells";
        let codes = CodeTable::from_tree(&HuffmanTree::from_bytes(text).unwrap());

        let mut pulled = 0;
        let bytes = std::io::Read::bytes(&text[..]).map(|b| {
            pulled += 1;
            b.unwrap()
        });
        let stream = encode_iter(bytes, &codes).unwrap();

        assert_eq!(pulled, text.len());
        assert_eq!(stream, encode(text, &codes).unwrap());
    }

    #[test]
    fn test_long_codes_grow_the_buffer() {
        let mut freqs = crate::freq::FrequencyTable::new();
        let (mut a, mut b) = (1u64, 1u64);
        for s in 0..30u8 {
            freqs.set(s, a);
            (a, b) = (b, a + b);
        }
        let codes = CodeTable::from_tree(&HuffmanTree::build(&freqs).unwrap());
        let data = [0u8, 1, 0, 1];
        let stream = encode(&data, &codes).unwrap();
        assert_eq!(stream.len(), 4 * codes.max_len());
    }
}
