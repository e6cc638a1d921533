//! End-to-end tests for the compression pipeline over generated text.

use hr_codec::{
    huffman, rle, CodeTable, CodecConfig, CodecError, CodecPipeline, DigitTrie, FrequencyTable,
    HuffmanTree, MinHeap, TreeNode,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn random_text(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| CHARSET[rng.gen_range(0..CHARSET.len())]).collect()
}

fn skewed_text(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len)
        .map(|_| match rng.gen_range(0..100) {
            0..=69 => b'e',
            70..=89 => b't',
            90..=97 => b'a',
            _ => b'z',
        })
        .collect()
}

// ============================================================
// Round trip
// ============================================================

#[test]
fn test_round_trip_random_alphanumeric() -> anyhow::Result<()> {
    let pipeline = CodecPipeline::default();
    let mut rng = StdRng::seed_from_u64(7);
    for len in [2, 3, 17, 100, 1000, 5000] {
        let text = random_text(&mut rng, len);
        let report = pipeline.round_trip(&text)?;
        assert!(report.is_lossless(), "round trip failed for len {len}");
        assert_eq!(report.original_len, len);
    }
    Ok(())
}

#[test]
fn test_round_trip_skewed_distribution() -> anyhow::Result<()> {
    let pipeline = CodecPipeline::default();
    let mut rng = StdRng::seed_from_u64(99);
    let text = skewed_text(&mut rng, 4000);
    let compressed = pipeline.compress(&text)?;
    let trie = pipeline.build_trie(&compressed.rle_text, &compressed.huffman_bits)?;
    let restored = pipeline.decompress(&compressed.rle_text, &compressed.tree, &trie)?;
    assert_eq!(restored.text, text);
    assert_eq!(compressed.codes.get(b'e').map(str::len), Some(1));
    Ok(())
}

#[test]
fn test_round_trip_binary_bytes() -> anyhow::Result<()> {
    let pipeline = CodecPipeline::default();
    let text: Vec<u8> = (0..=255u8).cycle().take(2048).collect();
    let report = pipeline.round_trip(&text)?;
    assert!(report.is_lossless());
    assert_eq!(report.distinct_symbols, 256);
    assert_eq!(report.longest_code, 8);
    Ok(())
}

#[test]
fn test_round_trip_single_symbol() -> anyhow::Result<()> {
    let pipeline = CodecPipeline::default();
    for len in [1, 2, 9, 10, 1234] {
        let text = vec![b'Q'; len];
        let compressed = pipeline.compress(&text)?;
        assert!(compressed.tree.is_degenerate());
        let expected_rle = if len == 1 { "0".to_string() } else { format!("0{len}") };
        assert_eq!(compressed.rle_text, expected_rle);
        let trie = pipeline.build_trie(&compressed.rle_text, &compressed.huffman_bits)?;
        let restored = pipeline.decompress(&compressed.rle_text, &compressed.tree, &trie)?;
        assert_eq!(restored.text, text);
    }
    Ok(())
}

#[test]
fn test_round_trip_long_runs() -> anyhow::Result<()> {
    let pipeline = CodecPipeline::default();
    let mut text = vec![b'a'; 500];
    text.extend(std::iter::repeat(b'b').take(3));
    text.extend(std::iter::repeat(b'a').take(200));
    let compressed = pipeline.compress(&text)?;
    assert!(compressed.rle_text.len() < compressed.huffman_bits.len());
    assert!(pipeline.round_trip(&text)?.is_lossless());
    Ok(())
}

#[test]
fn test_round_trip_without_verification() -> anyhow::Result<()> {
    let config = CodecConfig::from_json(r#"{"verify_round_trip": false}"#)?;
    let pipeline = CodecPipeline::new(config)?;
    let report = pipeline.round_trip(b"mississippi")?;
    assert!(report.is_lossless());
    Ok(())
}

#[test]
fn test_round_trip_small_buffers() -> anyhow::Result<()> {
    let config = CodecConfig::from_json(r#"{"buffers": {"rle_expansion": 1, "decode_expansion": 1}}"#)?;
    let pipeline = CodecPipeline::new(config)?;
    let mut rng = StdRng::seed_from_u64(3);
    let text = random_text(&mut rng, 3000);
    assert!(pipeline.round_trip(&text)?.is_lossless());
    Ok(())
}

// ============================================================
// Properties
// ============================================================

#[test]
fn test_prefix_free_for_random_distributions() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let len = rng.gen_range(2..400);
        let text = random_text(&mut rng, len);
        let freq = FrequencyTable::from_bytes(&text);
        if freq.len() < 2 {
            continue;
        }
        let tree = HuffmanTree::build(&freq).unwrap();
        let codes = CodeTable::from_tree(&tree, 255).unwrap();
        assert!(codes.is_prefix_free());
        assert_eq!(codes.len(), freq.len());
        assert_eq!(tree.leaf_count(), freq.len());
        assert_eq!(tree.internal_count(), freq.len() - 1);
    }
}

#[test]
fn test_huffman_encoding_is_minimal_length() {
    let mut rng = StdRng::seed_from_u64(5);
    let text = skewed_text(&mut rng, 1000);
    let freq = FrequencyTable::from_bytes(&text);
    let codes = CodeTable::from_tree(&HuffmanTree::build(&freq).unwrap(), 255).unwrap();
    let bits = huffman::encode(&text, &codes).unwrap();
    assert_eq!(codes.encoded_len(&freq), Some(bits.len()));
    // Four symbols: a fixed-length code would need two bits each.
    assert!(bits.len() < text.len() * 2);
}

#[test]
fn test_heap_invariant_under_random_operations() {
    let mut rng = StdRng::seed_from_u64(21);
    let seed: Vec<u64> = (0..64).map(|_| rng.gen_range(0..1000)).collect();
    let mut heap = MinHeap::build(seed);
    assert!(heap.is_valid());
    for _ in 0..500 {
        if rng.gen_bool(0.6) {
            heap.insert(rng.gen_range(0..1000)).unwrap();
        } else {
            heap.extract_min();
        }
        assert!(heap.is_valid());
    }
}

#[test]
fn test_heap_of_tree_nodes() {
    let mut heap = MinHeap::build(vec![
        TreeNode::leaf(b'a', 5),
        TreeNode::leaf(b'b', 2),
        TreeNode::leaf(b'c', 9),
    ]);
    heap.insert(TreeNode::merge(TreeNode::leaf(b'd', 1), TreeNode::leaf(b'e', 0))).unwrap();
    let weights: Vec<u64> = std::iter::from_fn(|| heap.extract_min()).map(|n| n.weight()).collect();
    assert_eq!(weights, vec![1, 2, 5, 9]);
}

#[test]
fn test_rle_identity_on_alternating_bits() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut bit = rng.gen_bool(0.5);
    let alternating: String = (0..256)
        .map(|_| {
            bit = !bit;
            if bit { '1' } else { '0' }
        })
        .collect();
    assert_eq!(rle::encode(&alternating, 2).unwrap(), alternating);
}

// ============================================================
// Failure modes
// ============================================================

#[test]
fn test_corrupted_bit_string() {
    let pipeline = CodecPipeline::default();
    let compressed = pipeline.compress(b"hello world").unwrap();
    let mut bits = compressed.huffman_bits.clone();
    bits.insert(3, '2');
    let err = huffman::decode(&bits, &compressed.tree).unwrap_err();
    assert!(matches!(err, CodecError::MalformedHuffmanInput { position: 3, found: '2' }));
}

#[test]
fn test_count_without_payload() {
    let pipeline = CodecPipeline::default();
    let compressed = pipeline.compress(b"abracadabra").unwrap();
    let err = pipeline
        .decompress("987", &compressed.tree, &DigitTrie::new())
        .unwrap_err();
    assert!(matches!(err, CodecError::InvalidCountContext { position: 0 }));
}

#[test]
fn test_trie_rejects_non_digit_rle() {
    let pipeline = CodecPipeline::default();
    let err = pipeline.build_trie("01x", "0110").unwrap_err();
    assert!(matches!(err, CodecError::MalformedRleInput { position: 2, found: 'x' }));
}

#[test]
fn test_mismatched_tree() {
    let pipeline = CodecPipeline::default();
    let a = pipeline.compress(b"aaaaaaab").unwrap();
    let b = pipeline.compress(b"zzzz").unwrap();
    let trie = pipeline.build_trie(&a.rle_text, &a.huffman_bits).unwrap();
    let err = pipeline.decompress(&a.rle_text, &b.tree, &trie).unwrap_err();
    assert!(matches!(err, CodecError::TreeTraversalFailure { .. }));
}

#[test]
fn test_report_serializes() -> anyhow::Result<()> {
    let pipeline = CodecPipeline::default();
    let report = pipeline.round_trip(b"aaabbc")?;
    let json = serde_json::to_value(&report)?;
    assert_eq!(json["rle_len"], 5);
    assert_eq!(json["text_match"], true);
    Ok(())
}
