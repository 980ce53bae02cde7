#![no_main]

use libfuzzer_sys::fuzz_target;
use rollsplit::{Chunker, SplitConfig};

fuzz_target!(|data: Vec<u8>| {
    for bits in [3u32, 8, 13] {
        let config = SplitConfig::new(bits).unwrap();
        let chunker = Chunker::new(config);

        let chunks: Vec<_> = chunker
            .chunk(std::io::Cursor::new(&data))
            .collect::<Result<_, _>>()
            .unwrap();

        // Verify: total bytes match input and offsets are contiguous
        let mut expected_offset = 0u64;
        for chunk in &chunks {
            assert!(!chunk.is_empty());
            assert_eq!(chunk.offset(), Some(expected_offset));
            expected_offset += chunk.len() as u64;
        }
        assert_eq!(expected_offset, data.len() as u64);

        // Verify: concatenation reproduces the input
        let rebuilt: Vec<u8> = chunks.iter().flat_map(|c| c.data().to_vec()).collect();
        assert_eq!(rebuilt, data);

        // Verify: the one-shot path agrees with the reader path
        let oneshot: Vec<usize> = chunker
            .chunk_bytes(data.clone())
            .iter()
            .map(|c| c.len())
            .collect();
        let streamed: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(oneshot, streamed);
    }
});
