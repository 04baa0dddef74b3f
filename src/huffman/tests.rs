use super::*;

fn codes_for(data: &[u8]) -> CodeTable {
    let freqs = FrequencyTable::from_bytes(data);
    CodeTable::from_tree(build_tree(&freqs).as_ref())
}

fn assert_prefix_free(table: &CodeTable) {
    let codes: Vec<_> = table.iter().map(|(_, code)| *code).collect();
    for (i, a) in codes.iter().enumerate() {
        for (j, b) in codes.iter().enumerate() {
            if i != j {
                assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
            }
        }
    }
}

#[test]
fn test_frequency_of_empty_input() {
    let freqs = FrequencyTable::from_bytes(b"");

    assert!(freqs.is_empty());
    assert_eq!(freqs.total(), Some(0));
}

#[test]
fn test_frequency_counts_only_present_symbols() {
    let freqs = FrequencyTable::from_bytes(b"aabbc");

    assert_eq!(freqs.len(), 3);
    assert_eq!(freqs.get(b'a'), Some(2));
    assert_eq!(freqs.get(b'b'), Some(2));
    assert_eq!(freqs.get(b'c'), Some(1));
    assert_eq!(freqs.get(b'd'), None);
    assert_eq!(freqs.total(), Some(5));
}

#[test]
fn test_frequency_handles_zero_and_newline_bytes() {
    let freqs = FrequencyTable::from_bytes(&[0, 0, b'\n', 255]);

    assert_eq!(freqs.iter().collect::<Vec<_>>(), vec![(0, 2), (b'\n', 1), (255, 1)]);
}

#[test]
fn test_frequency_insert_ignores_zero_counts() {
    let mut freqs = FrequencyTable::new();
    freqs.insert(7, 0);
    freqs.insert(8, 3);
    freqs.insert(8, 2);

    assert_eq!(freqs.get(7), None);
    assert_eq!(freqs.get(8), Some(5));
}

#[test]
fn test_frequency_total_overflow() {
    let mut freqs = FrequencyTable::new();
    freqs.insert(1, u64::MAX);
    freqs.insert(2, 1);

    assert_eq!(freqs.total(), None);
}

#[test]
fn test_empty_table_has_no_tree() {
    assert!(build_tree(&FrequencyTable::new()).is_none());
    assert!(CodeTable::from_tree(None).is_empty());
}

#[test]
fn test_single_symbol_tree_is_a_leaf() {
    let root = build_tree(&FrequencyTable::from_bytes(b"aaaaa")).unwrap();

    assert_eq!(root, HuffmanNode::Leaf { symbol: b'a', freq: 5 });
}

#[test]
fn test_single_symbol_code_is_zero() {
    let table = codes_for(b"aaaaa");

    assert_eq!(table.len(), 1);
    assert_eq!(table.code(b'a').unwrap().to_string(), "0");
    assert_eq!(table.symbol(&Code::new().with_bit(false)), Some(b'a'));
}

#[test]
fn test_root_frequency_is_total() {
    let freqs = FrequencyTable::from_bytes(b"This is a test string for Huffman coding.");
    let root = build_tree(&freqs).unwrap();

    assert_eq!(root.freq(), freqs.total().unwrap());
    assert!(!root.is_leaf());
}

#[test]
fn test_tie_break_is_fixed() {
    // c (1) merges with a (2, lower symbol than b), then b with that subtree
    let table = codes_for(b"aabbc");

    assert_eq!(table.code(b'b').unwrap().to_string(), "0");
    assert_eq!(table.code(b'c').unwrap().to_string(), "10");
    assert_eq!(table.code(b'a').unwrap().to_string(), "11");
}

#[test]
fn test_least_frequent_symbol_gets_longest_code() {
    let table = codes_for(b"aabbc");
    let c_len = table.code(b'c').unwrap().len();

    assert!(table.iter().all(|(_, code)| code.len() <= c_len));
    assert_eq!(table.max_len(), c_len);
}

#[test]
fn test_more_frequent_symbols_get_shorter_codes() {
    let table = codes_for(b"aaabbc");

    assert_eq!(table.code(b'a').unwrap().len(), 1);
    assert!(table.code(b'b').unwrap().len() >= table.code(b'a').unwrap().len());
    assert!(table.code(b'c').unwrap().len() >= table.code(b'b').unwrap().len());
}

#[test]
fn test_all_byte_values_prefix_free() {
    let data: Vec<u8> = (0..=255).collect();
    let table = codes_for(&data);

    assert_eq!(table.len(), 256);
    // uniform frequencies give a complete tree of depth 8
    assert!(table.iter().all(|(_, code)| code.len() == 8));
    assert_prefix_free(&table);
}

#[test]
fn test_skewed_frequencies_prefix_free() {
    let mut freqs = FrequencyTable::new();
    let (mut a, mut b) = (1u64, 1u64);
    for symbol in 0..40u8 {
        freqs.insert(symbol, a);
        (a, b) = (b, a + b);
    }

    let table = CodeTable::from_tree(build_tree(&freqs).as_ref());

    assert_eq!(table.max_len(), 39);
    assert_prefix_free(&table);
}

#[test]
fn test_reconstruction_is_deterministic() {
    let freqs = FrequencyTable::from_bytes(b"mississippi river banks");
    let first = CodeTable::from_tree(build_tree(&freqs).as_ref());
    let second = CodeTable::from_tree(build_tree(&freqs.clone()).as_ref());

    assert_eq!(first.iter().collect::<Vec<_>>(), second.iter().collect::<Vec<_>>());
}

#[test]
fn test_reverse_table_matches_forward_table() {
    let table = codes_for(b"abracadabra");

    for (symbol, code) in table.iter() {
        assert_eq!(table.symbol(code), Some(symbol));
    }
}

#[test]
fn test_encoded_bits() {
    let freqs = FrequencyTable::from_bytes(b"aabbc");
    let table = CodeTable::from_tree(build_tree(&freqs).as_ref());

    // b: 2 * 1, c: 1 * 2, a: 2 * 2
    assert_eq!(table.encoded_bits(&freqs), Some(8));
}

#[test]
fn test_encoded_bits_rejects_unknown_symbol() {
    let table = codes_for(b"ab");

    assert_eq!(table.encoded_bits(&FrequencyTable::from_bytes(b"z")), None);
}

#[test]
fn test_code_display_and_prefix() {
    let zero_one = Code::new().with_bit(false).with_bit(true);
    let zero_one_one = zero_one.with_bit(true);

    assert_eq!(zero_one.to_string(), "01");
    assert!(zero_one.is_prefix_of(&zero_one_one));
    assert!(!zero_one_one.is_prefix_of(&zero_one));
    assert!(Code::new().is_prefix_of(&zero_one));
}
