//! Logical bit sequences produced by the encoder.
//!
//! An [`EncodedStream`] is an ordered sequence of bits. It can be packed into
//! bytes (most significant bit first, zero padded) for storage, or rendered as
//! text made of `'0'` and `'1'` characters.

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;

use crate::code::Code;
use crate::error::{Error, Result};

/// Concatenated codes of an input, in input order.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct EncodedStream {
    bits: BitVec<u8, Msb0>,
}

impl EncodedStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty stream with room for `bit_capacity` bits.
    ///
    /// # Errors
    /// Returns `Error::AllocationFailure` if the buffer cannot be reserved.
    pub fn try_with_capacity(bit_capacity: usize) -> Result<Self> {
        let mut raw: Vec<u8> = Vec::new();
        raw.try_reserve_exact(bit_capacity.div_ceil(8))?;
        Ok(Self {
            bits: BitVec::from_vec(raw),
        })
    }

    /// Rebuild a stream from packed bytes holding `bit_len` meaningful bits.
    ///
    /// # Errors
    /// Returns `Error::CorruptStream` if `bytes` is too short for `bit_len`.
    pub fn from_bytes(bytes: Vec<u8>, bit_len: usize) -> Result<Self> {
        let available = bytes.len() * 8;
        if bit_len > available {
            return Err(Error::corrupt(format!(
                "bit length {bit_len} exceeds {available} available bits"
            )));
        }
        let mut bits = BitVec::from_vec(bytes);
        bits.truncate(bit_len);
        Ok(Self { bits })
    }

    /// Pack into bytes, returning `(bytes, bit_len)`. Padding bits are zero.
    pub fn into_bytes(mut self) -> (Vec<u8>, usize) {
        let len = self.bits.len();
        self.bits.set_uninitialized(false);
        (self.bits.into_vec(), len)
    }

    /// Append one code.
    pub fn push_code(&mut self, code: &Code) {
        self.bits.extend_from_bitslice(code.bits());
    }

    /// Append one bit.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when the stream holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits, first-written first.
    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Drop everything after the first `len` bits.
    pub fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }
}

impl FromStr for EncodedStream {
    type Err = Error;

    /// Parse a string of `'0'` and `'1'` characters.
    fn from_str(s: &str) -> Result<Self> {
        let mut stream = Self::try_with_capacity(s.len())?;
        for (pos, c) in s.chars().enumerate() {
            match c {
                '0' => stream.push(false),
                '1' => stream.push(true),
                other => {
                    return Err(Error::corrupt(format!(
                        "invalid bit {other:?} at position {pos}"
                    )))
                }
            }
        }
        Ok(stream)
    }
}

impl fmt::Display for EncodedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for EncodedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedStream({} bits: {self})", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_form() {
        let stream: EncodedStream = "000111110".parse().unwrap();
        assert_eq!(stream.len(), 9);
        assert_eq!(stream.to_string(), "000111110");
    }

    #[test]
    fn test_invalid_character_is_corrupt() {
        let err = "0102".parse::<EncodedStream>().unwrap_err();
        assert!(matches!(err, Error::CorruptStream(msg) if msg.contains("position 3")));
    }

    #[test]
    fn test_byte_packing_is_msb_first() {
        let stream: EncodedStream = "1010000011".parse().unwrap();
        let (bytes, len) = stream.clone().into_bytes();
        assert_eq!(bytes, vec![0b1010_0000, 0b1100_0000]);
        assert_eq!(len, 10);
        assert_eq!(EncodedStream::from_bytes(bytes, len).unwrap(), stream);
    }

    #[test]
    fn test_from_bytes_rejects_overlong_length() {
        assert!(matches!(
            EncodedStream::from_bytes(vec![0xff], 9),
            Err(Error::CorruptStream(_))
        ));
    }

    #[test]
    fn test_push_code_appends_in_order() {
        let mut stream = EncodedStream::new();
        stream.push_code(&Code::from(bits![u8, Msb0; 1, 1]));
        stream.push_code(&Code::from(bits![u8, Msb0; 0]));
        assert_eq!(stream.to_string(), "110");
    }
}
