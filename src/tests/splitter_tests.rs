//! Tests for record-aligned chunk splitting.

use crate::splitter::{QuoteState, RecordSplitter};

/// Feed `input` to a splitter in `step`-byte ranges and collect all chunks.
fn split_all(input: &[u8], target: usize, step: usize) -> Vec<crate::record::Chunk> {
    let mut splitter = RecordSplitter::new(target);
    let mut chunks = Vec::new();
    for range in input.chunks(step) {
        if let Some(chunk) = splitter.push(range) {
            chunks.push(chunk);
        }
    }
    if let Some(chunk) = splitter.finish() {
        chunks.push(chunk);
    }
    chunks
}

#[test]
fn chunks_reassemble_to_input_and_end_on_record_boundaries() {
    let mut input = Vec::new();
    for i in 0..50 {
        input.extend_from_slice(format!("row{i},value{i}\n").as_bytes());
    }

    let chunks = split_all(&input, 16, 7);
    assert!(chunks.len() > 1, "input should split into several chunks");

    let mut reassembled = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.seq, i as u64, "sequence numbers are gap-free");
        assert_eq!(
            chunk.offset,
            reassembled.len() as u64,
            "offset tracks input position"
        );
        assert_eq!(
            chunk.bytes.last(),
            Some(&b'\n'),
            "every chunk ends on a record boundary"
        );
        reassembled.extend_from_slice(&chunk.bytes);
    }
    assert_eq!(reassembled, input);
}

#[test]
fn quoted_newline_does_not_create_a_boundary() {
    let input: &[u8] = b"a,\"multi\nline\",b\nc,d,e\n";

    // Tiny target and step force boundary pressure inside the quoted field.
    let chunks = split_all(input, 4, 3);

    for chunk in &chunks {
        let quotes = chunk.bytes.iter().filter(|&&b| b == b'"').count();
        assert_eq!(quotes % 2, 0, "no chunk ends inside a quoted field");
        assert_eq!(chunk.bytes.last(), Some(&b'\n'));
    }
    let reassembled: Vec<u8> = chunks.iter().flat_map(|c| c.bytes.clone()).collect();
    assert_eq!(reassembled, input);
}

#[test]
fn escaped_quote_across_range_edge_keeps_state() {
    // The doubled quote straddles the range boundary: ...\"a\" | \"b\"...
    let input: &[u8] = b"\"a\"\"b\",c\nd,e\n";
    for step in 1..input.len() {
        let chunks = split_all(input, 6, step);
        let reassembled: Vec<u8> = chunks.iter().flat_map(|c| c.bytes.clone()).collect();
        assert_eq!(reassembled, input, "step {step}");
        for chunk in &chunks {
            assert_eq!(chunk.bytes.last(), Some(&b'\n'), "step {step}");
        }
    }
}

#[test]
fn empty_input_yields_no_chunks() {
    let splitter = RecordSplitter::new(1024);
    assert!(splitter.finish().is_none());
}

#[test]
fn unterminated_quote_tail_is_flushed_not_dropped() {
    let input: &[u8] = b"h\n\"never closed";
    let mut splitter = RecordSplitter::new(1024);
    assert!(splitter.push(input).is_none());
    assert_eq!(splitter.state(), QuoteState::Quoted);

    let tail = splitter.finish().expect("tail chunk");
    assert_eq!(tail.bytes, input);
}

#[test]
fn large_record_exceeding_target_is_emitted_whole() {
    let big = format!("\"{}\"\n", "x".repeat(100));
    let chunks = split_all(big.as_bytes(), 8, 8);
    let reassembled: Vec<u8> = chunks.iter().flat_map(|c| c.bytes.clone()).collect();
    assert_eq!(reassembled, big.as_bytes());
    for chunk in &chunks {
        assert_eq!(chunk.bytes.last(), Some(&b'\n'));
    }
}
