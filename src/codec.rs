//! One-shot compression and decompression.
//!
//! [`HuffmanCodec`] ties a tree to its code table so the same codes are used
//! in both directions. The tree must outlive every decode that uses it; the
//! codec owns it for exactly that span and hands it back on
//! [`release`](HuffmanCodec::release).

use std::io::Read;

use crate::code::CodeTable;
use crate::config::CodecConfig;
use crate::decoder;
use crate::encoder;
use crate::error::{Error, Result};
use crate::freq::FrequencyTable;
use crate::stream::EncodedStream;
use crate::tree::{self, HuffmanTree};

/// A Huffman tree plus the codes generated from it.
#[derive(Clone, Debug)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    codes: CodeTable,
    config: CodecConfig,
}

impl HuffmanCodec {
    /// Create a codec for an existing tree.
    pub fn new(tree: HuffmanTree) -> Self {
        let codes = CodeTable::from_tree(&tree);
        Self {
            tree,
            codes,
            config: CodecConfig::default(),
        }
    }

    /// Replace the default configuration.
    ///
    /// # Errors
    /// Returns `Error::InvalidConfig` if `config` fails validation.
    pub fn with_config(mut self, config: CodecConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Build a codec from symbol frequencies.
    ///
    /// A decoder side that persisted the frequency table gets back the exact
    /// tree the encoder used.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `table` is empty, and
    /// `Error::FrequencyOverflow` if its counts do not sum within `u64`.
    pub fn from_frequencies(table: &FrequencyTable) -> Result<Self> {
        Ok(Self::new(HuffmanTree::build(table)?))
    }

    /// Build a codec fitted to `data`.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `data` is empty.
    pub fn from_data(data: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    /// The codec's tree.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// The codec's code table.
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// The active configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `data`.
    ///
    /// # Errors
    /// Returns `Error::InputTooLarge` past the configured limit,
    /// `Error::UnknownSymbol` for bytes the tree was not built with, and
    /// `Error::CorruptStream` if verification is on and the stream does not
    /// decode back to `data`.
    pub fn encode(&self, data: &[u8]) -> Result<EncodedStream> {
        self.check_len(data.len())?;
        let stream = encoder::encode(data, &self.codes)?;
        log::debug!("encoded {} bytes into {} bits", data.len(), stream.len());

        if self.config.verify_roundtrip {
            let decoded = self.decode(&stream)?;
            if decoded != data {
                return Err(Error::corrupt("round-trip verification failed"));
            }
        }
        Ok(stream)
    }

    /// Decode a stream produced by this codec's tree.
    ///
    /// # Errors
    /// Returns `Error::CorruptStream` for truncated streams.
    pub fn decode(&self, stream: &EncodedStream) -> Result<Vec<u8>> {
        let out = decoder::decode(stream.as_bitslice(), Some(self.tree.root()))?;
        log::debug!("decoded {} bits into {} bytes", stream.len(), out.len());
        Ok(out)
    }

    /// Consume the codec and free its tree, returning the number of nodes freed.
    pub fn release(self) -> usize {
        tree::release(Some(self.tree))
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len > self.config.max_input_len {
            return Err(Error::InputTooLarge {
                len,
                max: self.config.max_input_len,
            });
        }
        Ok(())
    }
}

/// Fit a codec to `data` and encode it.
///
/// # Errors
/// Returns `Error::EmptyInput` for empty `data`.
pub fn compress(data: &[u8]) -> Result<(HuffmanCodec, EncodedStream)> {
    compress_with(data, CodecConfig::default())
}

/// [`compress`] with an explicit configuration.
///
/// The size limit is checked before any counting is done.
///
/// # Errors
/// As [`compress`], plus `Error::InputTooLarge` and `Error::InvalidConfig`.
pub fn compress_with(data: &[u8], config: CodecConfig) -> Result<(HuffmanCodec, EncodedStream)> {
    config.validate()?;
    if data.len() > config.max_input_len {
        return Err(Error::InputTooLarge {
            len: data.len(),
            max: config.max_input_len,
        });
    }
    let codec = HuffmanCodec::from_data(data)?.with_config(config)?;
    let stream = codec.encode(data)?;
    Ok((codec, stream))
}

/// Read `reader` to the end and compress its contents.
///
/// # Errors
/// Returns `Error::Io` if reading fails, otherwise as [`compress_with`].
pub fn compress_reader<R: Read>(
    mut reader: R,
    config: CodecConfig,
) -> Result<(HuffmanCodec, EncodedStream)> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    compress_with(&data, config)
}

/// Decode `stream` with `codec`.
///
/// # Errors
/// Returns `Error::CorruptStream` for truncated streams.
pub fn decompress(codec: &HuffmanCodec, stream: &EncodedStream) -> Result<Vec<u8>> {
    codec.decode(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "It was the best of times, it was the worst of times, it was the age of \
                          wisdom, it was the age of foolishness, it was the epoch of belief, it \
                          was the epoch of incredulity, it was the season of Light, it was the \
                          season of Darkness.";

    #[test]
    fn test_roundtrip_realistic_text() {
        let (codec, stream) = compress(SAMPLE.as_bytes()).unwrap();
        assert!(stream.len() < SAMPLE.len() * 8);
        assert_eq!(decompress(&codec, &stream).unwrap(), SAMPLE.as_bytes());
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(compress(b""), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_rebuild_from_frequencies_decodes() {
        let data = SAMPLE.as_bytes();
        let (_, stream) = compress(data).unwrap();
        let rebuilt = HuffmanCodec::from_frequencies(&FrequencyTable::from_bytes(data)).unwrap();
        assert_eq!(rebuilt.decode(&stream).unwrap(), data);
    }

    #[test]
    fn test_input_limit() {
        let config = CodecConfig {
            max_input_len: 4,
            ..CodecConfig::default()
        };
        assert!(matches!(
            compress_with(b"hello", config),
            Err(Error::InputTooLarge { len: 5, max: 4 })
        ));
    }

    #[test]
    fn test_verified_encode() {
        let config = CodecConfig {
            verify_roundtrip: true,
            ..CodecConfig::default()
        };
        let (codec, stream) = compress_with(b"aaabbc", config).unwrap();
        assert_eq!(stream.to_string(), "000111110");
        assert!(codec.config().verify_roundtrip);
    }

    #[test]
    fn test_compress_reader() {
        let (codec, stream) =
            compress_reader(std::io::Cursor::new(b"mississippi".to_vec()), CodecConfig::default())
                .unwrap();
        assert_eq!(codec.decode(&stream).unwrap(), b"mississippi");
    }

    #[test]
    fn test_release_after_use() {
        let (codec, _) = compress(b"abcd").unwrap();
        assert_eq!(codec.release(), 7);
    }

    #[test]
    fn test_overflowing_frequencies_fail_cleanly() {
        let half = u64::MAX / 2 + 1;
        let table: FrequencyTable = [(b'x', half), (b'y', half)].into_iter().collect();
        assert!(matches!(
            HuffmanCodec::from_frequencies(&table),
            Err(Error::FrequencyOverflow)
        ));
    }
}
