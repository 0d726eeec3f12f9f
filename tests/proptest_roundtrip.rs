//! Property-based tests for the Huffman codec.
//!
//! These tests check properties that must hold for any input:
//! - compress then decompress returns the input
//! - code tables are prefix-free with no empty codes
//! - a tree read back from its header yields the same code table
//! - a file missing its last byte is always rejected

use proptest::prelude::*;

use huffzip::{BitVec, FrequencyTable, HuffmanCodec, HuffmanError, HuffmanTree, Symbol};

/// Arbitrary bytes, biased towards small inputs.
fn any_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..2048)
}

/// Inputs drawn from a small alphabet, so some symbols dominate.
fn skewed_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            8 => Just(b'e'),
            4 => Just(b't'),
            2 => Just(0xff),
            1 => any::<u8>(),
        ],
        0..4096,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        max_shrink_iters: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_roundtrip(data in any_bytes()) {
        let compressed = HuffmanCodec::compress(&data).unwrap();
        let decoded = HuffmanCodec::decompress(&compressed.bytes).unwrap();
        prop_assert_eq!(decoded, data);
    }

    #[test]
    fn prop_roundtrip_skewed(data in skewed_bytes()) {
        let compressed = HuffmanCodec::compress(&data).unwrap();
        prop_assert!(compressed.padding_bits() < 8);
        prop_assert_eq!(HuffmanCodec::decompress(&compressed.bytes).unwrap(), data);
    }

    #[test]
    fn prop_eof_counted_once(data in any_bytes()) {
        let table = FrequencyTable::from_bytes(&data);
        prop_assert_eq!(table.get(Symbol::Eof), 1);
        prop_assert_eq!(table.total(), data.len() + 1);
    }

    #[test]
    fn prop_code_table_prefix_free(data in skewed_bytes()) {
        let table = FrequencyTable::from_bytes(&data);
        let codes = HuffmanTree::from_frequencies(&table).unwrap().generate_table().unwrap();
        prop_assert!(codes.is_prefix_free());
        for (symbol, _) in table.iter() {
            prop_assert!(codes.code(symbol).unwrap().len() >= 1);
        }
    }

    #[test]
    fn prop_code_length_follows_frequency(data in skewed_bytes()) {
        let table = FrequencyTable::from_bytes(&data);
        let codes = HuffmanTree::from_frequencies(&table).unwrap().generate_table().unwrap();
        for (a, fa) in table.iter() {
            for (b, fb) in table.iter() {
                if fa > fb {
                    prop_assert!(codes.code(a).unwrap().len() <= codes.code(b).unwrap().len());
                }
            }
        }
    }

    #[test]
    fn prop_header_roundtrip(data in any_bytes()) {
        let tree = HuffmanTree::from_bytes(&data).unwrap();
        let mut bits = BitVec::new();
        tree.serialize(&mut bits);

        let mut reader = bits.reader();
        let rebuilt = HuffmanTree::deserialize(&mut reader).unwrap();
        prop_assert_eq!(reader.position(), bits.len());
        prop_assert_eq!(rebuilt.generate_table().unwrap(), tree.generate_table().unwrap());
    }

    #[test]
    fn prop_truncation_detected(data in any_bytes()) {
        let compressed = HuffmanCodec::compress(&data).unwrap().into_bytes();
        let truncated = &compressed[..compressed.len() - 1];
        let result = HuffmanCodec::decompress(truncated);
        prop_assert!(
            matches!(
                result,
                Err(HuffmanError::CorruptPayload { .. }) | Err(HuffmanError::TruncatedHeader { .. })
            ),
            "truncated file decoded to {:?}",
            result
        );
    }
}
