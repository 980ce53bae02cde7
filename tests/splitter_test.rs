// Integration tests for the incremental splitter and chunking engines
// Tests cover: reconstruction, determinism, minimum-chunk rule, edit
// locality, chunk-length statistics, edge cases

use bytes::Bytes;
use rollsplit::{
    Chunker, SplitAction, SplitConfig, StreamSplitter, WINDOW_SIZE,
};

/// Deterministic pseudo-random bytes (splitmix64, one byte per step).
fn pseudo_random(len: usize, mut seed: u64) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = seed;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            (z ^ (z >> 31)) as u8
        })
        .collect()
}

/// Splits a whole in-memory stream through the raw feed() contract and
/// returns the chunk sizes.
fn split_sizes(data: &[u8], bits: u32) -> Vec<usize> {
    let mut splitter = StreamSplitter::with_bits(bits).unwrap();
    let mut buf = data;
    let mut sizes = Vec::new();
    loop {
        match splitter.feed(buf, false) {
            SplitAction::EmitChunk(n) => {
                sizes.push(n);
                buf = &buf[n..];
            }
            SplitAction::EndOfStream => return sizes,
            SplitAction::NeedMoreInput => panic!("feed stalled at end of stream"),
        }
    }
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_empty_input_ends_immediately() {
    let mut splitter = StreamSplitter::new();
    assert_eq!(splitter.feed(&[], false), SplitAction::EndOfStream);

    let sizes = split_sizes(&[], 13);
    assert!(sizes.is_empty(), "empty input must produce zero chunks");
}

#[test]
fn test_reconstruction_preserves_input() {
    let data = pseudo_random(100_000, 1);
    let chunker = Chunker::new(SplitConfig::new(10).unwrap());
    let chunks = chunker.chunk_bytes(data.clone());

    let mut rebuilt = Vec::with_capacity(data.len());
    for chunk in &chunks {
        assert!(!chunk.is_empty(), "chunks must be non-empty");
        assert_eq!(
            chunk.start() as usize,
            rebuilt.len(),
            "chunks must be contiguous and non-overlapping"
        );
        rebuilt.extend_from_slice(chunk.data());
    }
    assert_eq!(rebuilt, data, "concatenated chunks must reproduce the input");
}

#[test]
fn test_whole_short_stream_is_one_chunk() {
    let data = pseudo_random(WINDOW_SIZE - 1, 2);
    let sizes = split_sizes(&data, 13);
    assert_eq!(sizes, vec![data.len()]);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_determinism_same_input_same_boundaries() {
    let data = pseudo_random(64_000, 3);
    assert_eq!(split_sizes(&data, 8), split_sizes(&data, 8));
}

#[test]
fn test_determinism_across_feed_granularities() {
    let data = pseudo_random(30_000, 4);
    let config = SplitConfig::new(8).unwrap();

    // Push all at once
    let mut chunker1 = Chunker::new(config);
    let mut sizes1: Vec<usize> = chunker1
        .push(Bytes::from(data.clone()))
        .iter()
        .map(|c| c.len())
        .collect();
    sizes1.extend(chunker1.finish().map(|c| c.len()));

    // Push in 7-byte slivers
    let mut chunker2 = Chunker::new(config);
    let mut sizes2 = Vec::new();
    for sliver in data.chunks(7) {
        sizes2.extend(chunker2.push(Bytes::copy_from_slice(sliver)).iter().map(|c| c.len()));
    }
    sizes2.extend(chunker2.finish().map(|c| c.len()));

    // Push in 4 KiB blocks
    let mut chunker3 = Chunker::new(config);
    let mut sizes3 = Vec::new();
    for block in data.chunks(4096) {
        sizes3.extend(chunker3.push(Bytes::copy_from_slice(block)).iter().map(|c| c.len()));
    }
    sizes3.extend(chunker3.finish().map(|c| c.len()));

    assert_eq!(
        sizes1, sizes2,
        "boundaries must be identical regardless of push size"
    );
    assert_eq!(sizes1, sizes3);
    assert_eq!(sizes1, split_sizes(&data, 8), "and match the raw feed contract");
}

// ============================================================================
// Minimum Chunk Property
// ============================================================================

#[test]
fn test_first_chunk_at_least_window() {
    for seed in 0..8 {
        let data = pseudo_random(10_000, 100 + seed);
        let sizes = split_sizes(&data, 4);
        assert!(
            sizes[0] >= WINDOW_SIZE,
            "first chunk was {} bytes, below the {}-byte window",
            sizes[0],
            WINDOW_SIZE
        );
    }
}

#[test]
fn test_later_chunks_may_be_short() {
    // The warm-up rule applies to the stream start only; with a narrow
    // mask, chunks shorter than the window show up mid-stream.
    let data = pseudo_random(200_000, 5);
    let sizes = split_sizes(&data, 4);
    assert!(
        sizes.iter().skip(1).any(|&n| n < WINDOW_SIZE),
        "bits=4 over 200k bytes should produce some sub-window chunk"
    );
}

// ============================================================================
// Edit Locality
// ============================================================================

#[test]
fn test_single_byte_edit_preserves_earlier_boundaries() {
    let data = pseudo_random(120_000, 6);
    let edit_pos = 80_000usize;

    let mut mutated = data.clone();
    mutated[edit_pos] ^= 0xFF;

    let boundaries = |sizes: &[usize]| -> Vec<usize> {
        sizes
            .iter()
            .scan(0usize, |acc, &n| {
                *acc += n;
                Some(*acc)
            })
            .collect()
    };

    let orig = boundaries(&split_sizes(&data, 8));
    let edit = boundaries(&split_sizes(&mutated, 8));

    // Every boundary strictly before the edited position is decided by
    // bytes the edit did not touch, so the two prefixes must agree.
    let orig_prefix: Vec<_> = orig.iter().filter(|&&b| b < edit_pos).collect();
    let edit_prefix: Vec<_> = edit.iter().filter(|&&b| b < edit_pos).collect();
    assert_eq!(orig_prefix, edit_prefix, "edit leaked backwards past its window");
    assert!(!orig_prefix.is_empty(), "test needs boundaries before the edit");
}

#[test]
fn test_streams_resynchronize_after_edit() {
    // Once the edited byte slides out of the window, boundary decisions
    // realign; chunking of the shared suffix eventually matches again.
    let data = pseudo_random(120_000, 7);
    let mut mutated = data.clone();
    mutated[10_000] ^= 0x01;

    let tail_boundaries = |input: &[u8]| -> Vec<usize> {
        split_sizes(input, 8)
            .iter()
            .scan(0usize, |acc, &n| {
                *acc += n;
                Some(*acc)
            })
            .filter(|&b| b > 20_000)
            .collect()
    };

    assert_eq!(
        tail_boundaries(&data),
        tail_boundaries(&mutated),
        "boundaries well past the edit must re-converge"
    );
}

// ============================================================================
// Chunk-Length Statistics
// ============================================================================

#[test]
fn test_mean_chunk_length_tracks_bits() {
    // Mean chunk length approximates 2^bits for random input, within a
    // factor of 2 for a sample of thousands of chunks.
    let data = pseudo_random(1 << 20, 8);

    for bits in [6u32, 8, 10] {
        let sizes = split_sizes(&data, bits);
        let mean = data.len() / sizes.len();
        let target = 1usize << bits;
        assert!(
            mean >= target / 2 && mean <= target * 2,
            "bits={}: mean {} not within a factor of 2 of {}",
            bits,
            mean,
            target
        );
    }
}

#[test]
fn test_log2_histogram_shape() {
    // Bucket chunk lengths by floor(log2(len)); for bits=4 the mass
    // should sit in the buckets around 2^4 and the histogram must
    // account for every chunk.
    let data = pseudo_random(200_000, 9);
    let sizes = split_sizes(&data, 4);

    let mut histogram = [0usize; 24];
    for &n in &sizes {
        histogram[n.ilog2() as usize] += 1;
    }

    assert_eq!(histogram.iter().sum::<usize>(), sizes.len());

    let modal = histogram
        .iter()
        .enumerate()
        .max_by_key(|&(_, &count)| count)
        .map(|(bucket, _)| bucket)
        .unwrap();
    assert!(
        (3..=5).contains(&modal),
        "modal log2 bucket {} is far from the 2^4-byte target",
        modal
    );
}

#[test]
fn test_larger_bits_make_fewer_chunks() {
    let data = pseudo_random(1 << 20, 10);
    let fine = split_sizes(&data, 6).len();
    let coarse = split_sizes(&data, 12).len();
    assert!(
        fine > coarse * 4,
        "bits=6 ({} chunks) should far outnumber bits=12 ({} chunks)",
        fine,
        coarse
    );
}

// ============================================================================
// Feed Contract Edge Cases
// ============================================================================

#[test]
fn test_need_more_input_retains_cursor() {
    let data = pseudo_random(50_000, 11);
    let bits = 10u32;

    // Grow the buffer in uneven steps; every NeedMoreInput must resume
    // without rescanning, ending with the same boundaries as one pass.
    let mut splitter = StreamSplitter::with_bits(bits).unwrap();
    let mut sizes = Vec::new();
    let mut consumed = 0usize;
    let mut available = 0usize;
    let steps = [1usize, 13, 255, 4096, 9, 1024];
    let mut step = 0usize;

    loop {
        let at_end = available == data.len();
        match splitter.feed(&data[consumed..available], !at_end) {
            SplitAction::EmitChunk(n) => {
                sizes.push(n);
                consumed += n;
            }
            SplitAction::NeedMoreInput => {
                let grow = steps[step % steps.len()].min(data.len() - available);
                step += 1;
                available += grow;
            }
            SplitAction::EndOfStream => break,
        }
    }

    assert_eq!(consumed, data.len());
    assert_eq!(sizes, split_sizes(&data, bits));
}

#[test]
fn test_end_of_stream_is_terminal() {
    let mut splitter = StreamSplitter::new();
    let data = pseudo_random(100, 12);
    let mut buf: &[u8] = &data;
    let mut emitted = 0usize;
    while let SplitAction::EmitChunk(n) = splitter.feed(buf, false) {
        emitted += n;
        buf = &buf[n..];
    }
    assert_eq!(emitted, data.len());

    // Once EndOfStream is returned it stays returned, even if the
    // caller presents new data.
    assert_eq!(splitter.feed(&[], false), SplitAction::EndOfStream);
    assert_eq!(splitter.feed(&[], true), SplitAction::EndOfStream);
    assert_eq!(splitter.feed(&data, false), SplitAction::EndOfStream);
}

#[test]
fn test_reset_gives_an_independent_stream() {
    // After reset(), chunking stream B must come out exactly as it
    // would from a brand-new chunker; no window state from stream A may
    // leak across.
    let stream_a = pseudo_random(10_000, 13);
    let stream_b = pseudo_random(40_000, 14);
    let config = SplitConfig::new(8).unwrap();

    let chunk_all = |chunker: &mut Chunker, data: &[u8]| -> Vec<usize> {
        let mut sizes: Vec<usize> = chunker
            .push(Bytes::copy_from_slice(data))
            .iter()
            .map(|c| c.len())
            .collect();
        sizes.extend(chunker.finish().map(|c| c.len()));
        sizes
    };

    let mut reused = Chunker::new(config);
    let _ = chunk_all(&mut reused, &stream_a);
    reused.reset();
    let reused_sizes = chunk_all(&mut reused, &stream_b);

    let mut fresh = Chunker::new(config);
    let fresh_sizes = chunk_all(&mut fresh, &stream_b);

    assert_eq!(reused_sizes, fresh_sizes);
}
