//! Async chunking with tokio.
//!
//! Adapts a tokio file to `futures_io::AsyncRead` via
//! `tokio_util::compat` and consumes the chunk stream.
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io -- /path/to/file

use std::env;

use futures_util::StreamExt;
use tokio_util::compat::TokioAsyncReadCompatExt;

use rollsplit::{SplitConfig, chunk_async};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    println!("Chunking file: {}\n", path);

    let file = tokio::fs::File::open(&path).await?;
    let mut stream = chunk_async(file.compat(), SplitConfig::new(11)?);

    let mut total_chunks = 0;
    let mut total_bytes = 0;

    while let Some(chunk) = stream.next().await {
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
