#![no_main]

use libfuzzer_sys::fuzz_target;
use rollsplit::{Chunker, SplitAction, SplitConfig, StreamSplitter, WINDOW_SIZE};

fuzz_target!(|data: Vec<u8>| {
    for bits in [2u32, 6, 10, 13] {
        let config = SplitConfig::new(bits).unwrap();

        // Whole-buffer pass through the raw feed() contract.
        let mut splitter = StreamSplitter::with_config(config);
        let mut buf: &[u8] = &data;
        let mut sizes = Vec::new();
        loop {
            match splitter.feed(buf, false) {
                SplitAction::EmitChunk(n) => {
                    assert!(n > 0 && n <= buf.len());
                    sizes.push(n);
                    buf = &buf[n..];
                }
                SplitAction::EndOfStream => break,
                SplitAction::NeedMoreInput => unreachable!("feed stalled at end of stream"),
            }
        }

        // Verify: total bytes match input
        assert_eq!(sizes.iter().sum::<usize>(), data.len());

        // Verify: warm-up rule - the first boundary cannot land inside
        // the initial window
        if let Some(&first) = sizes.first() {
            if sizes.len() > 1 {
                assert!(first >= WINDOW_SIZE);
            }
        }

        // Verify: the splitter stays terminal afterwards
        assert_eq!(splitter.feed(&[], false), SplitAction::EndOfStream);
        assert_eq!(splitter.feed(&data, true), SplitAction::EndOfStream);

        // Verify: byte-at-a-time incremental feeding finds the same
        // boundaries
        let mut chunker = Chunker::new(config);
        let mut incremental = Vec::new();
        for &b in &data {
            incremental.extend(
                chunker
                    .push(bytes::Bytes::copy_from_slice(&[b]))
                    .iter()
                    .map(|c| c.len()),
            );
        }
        incremental.extend(chunker.finish().map(|c| c.len()));
        assert_eq!(sizes, incremental);
    }
});
