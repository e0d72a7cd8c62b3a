use huffcode::{decode, encode, CodeTable, HuffmanTree};

fn main() {
    let input: Vec<u8> = (0..100_000u32)
        .map(|i| match i % 7 {
            0 | 1 | 2 => b'e',
            3 | 4 => b't',
            5 => b' ',
            _ => b'a' + (i % 26) as u8,
        })
        .collect();

    for _ in 0..200 {
        let tree = HuffmanTree::from_bytes(&input).unwrap();
        let codes = CodeTable::from_tree(&tree);
        let stream = encode(&input, &codes).unwrap();
        let decoded = decode(stream.as_bitslice(), Some(tree.root())).unwrap();
        assert_eq!(decoded.len(), input.len());
    }
}
