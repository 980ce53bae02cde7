//! Chunk-length statistics over pseudo-random data.
//!
//! Splits a deterministic random buffer and prints a log2 histogram of
//! the resulting chunk lengths, showing how `bits` shapes the
//! distribution.
//!
//! Run with:
//!     cargo run --example split_stats

use rollsplit::{Chunker, SplitConfig};

/// Deterministic pseudo-random data (splitmix64).
fn pseudo_random(len: usize) -> Vec<u8> {
    let mut seed = 42u64;
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

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data = pseudo_random(4 * 1024 * 1024);
    println!("Splitting {} bytes of pseudo-random data\n", data.len());

    for bits in [8u32, 10, 13] {
        let config = SplitConfig::new(bits)?;
        let chunker = Chunker::new(config);
        let chunks = chunker.chunk_bytes(data.clone());

        let mut histogram = [0usize; 32];
        for chunk in &chunks {
            histogram[chunk.len().ilog2() as usize] += 1;
        }

        println!(
            "bits={} (target mean {} bytes): {} chunks, actual mean {} bytes",
            bits,
            config.avg_size(),
            chunks.len(),
            data.len() / chunks.len()
        );

        for (bucket, &count) in histogram.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let bar = "#".repeat(1 + count * 40 / chunks.len());
            println!("  2^{:<2} {:>6}  {}", bucket, count, bar);
        }
        println!();
    }

    Ok(())
}
