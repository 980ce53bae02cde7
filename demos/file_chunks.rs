//! File chunking example.
//!
//! Run with:
//!     cargo run --example file_chunks -- /path/to/file

use std::env;
use std::fs::File;

use rollsplit::{Chunker, SplitConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    println!("Chunking file: {}\n", path);

    let file = File::open(&path)?;
    let metadata = file.metadata()?;
    println!("File size: {} bytes\n", metadata.len());

    // 2^11 = 2 KiB average chunks
    let config = SplitConfig::new(11)?;
    let chunker = Chunker::new(config);

    let mut total_chunks = 0;
    let mut total_bytes = 0;

    for chunk in chunker.chunk(file) {
        let chunk = chunk?;
        total_chunks += 1;
        total_bytes += chunk.len();

        println!(
            "Chunk {}: offset={:>10}, len={:>8}",
            total_chunks,
            chunk.start(),
            chunk.len()
        );
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);
    if total_chunks > 0 {
        println!("Average chunk size: {} bytes", total_bytes / total_chunks);
    }

    Ok(())
}
