#![no_main]
use huffcode::{compress, decode, EncodedStream, Error};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u8>, u16)| {
    let (input, cut) = data;

    if input.is_empty() {
        assert!(matches!(compress(&input), Err(Error::EmptyInput)));
        return;
    }

    let (codec, stream) = compress(&input).unwrap();
    assert_eq!(codec.decode(&stream).unwrap(), input);

    // Any prefix of a valid stream either decodes to a prefix of the input or
    // is rejected as corrupt.
    let keep = cut as usize % (stream.len() + 1);
    let (bytes, _) = stream.into_bytes();
    let truncated = EncodedStream::from_bytes(bytes, keep).unwrap();
    match decode(truncated.as_bitslice(), Some(codec.tree().root())) {
        Ok(prefix) => assert_eq!(&input[..prefix.len()], &prefix[..]),
        Err(Error::CorruptStream(_)) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }
});
