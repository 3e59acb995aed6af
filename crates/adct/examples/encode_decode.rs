//! Encode a synthetic grayscale image block by block and report the result
//!
//! Run with `cargo run -p adct --example encode_decode -- [quality] [block size]`

use adct::{Block, BlockDecoder, BlockEncoder, CodecConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let quality: u8 = args.next().map(|q| q.parse()).transpose()?.unwrap_or(50);
    let block_size: usize = args.next().map(|n| n.parse()).transpose()?.unwrap_or(8);

    let config = CodecConfig::new()
        .block_size(block_size)
        .quality(quality)
        .adaptive(true);
    let encoder = BlockEncoder::new(config)?;
    let decoder = BlockDecoder::new(config)?;

    let (width, height) = (128, 128);
    let image: Vec<u8> = (0..width * height)
        .map(|i| {
            let (x, y) = ((i % width) as f64, (i / width) as f64);
            (128.0 + 60.0 * (x / 9.0).sin() + 40.0 * (y / 14.0).cos()) as u8
        })
        .collect();

    let mut tiles = Vec::new();
    for row in (0..height).step_by(block_size) {
        for col in (0..width).step_by(block_size) {
            tiles.push(Block::from_pixels(&image, width, row, col, block_size)?);
        }
    }

    let encoded = encoder.encode_blocks(&tiles)?;
    let decoded = decoder.decode_blocks(&encoded)?;

    let total_bytes: usize = encoded.iter().map(|e| e.len()).sum();
    let mut squared_error = 0.0;
    for (tile, (restored, _)) in tiles.iter().zip(&decoded) {
        for (a, b) in tile.to_pixels().iter().zip(restored.to_pixels()) {
            let diff = *a as f64 - b as f64;
            squared_error += diff * diff;
        }
    }
    let mse = squared_error / image.len() as f64;
    let psnr = 10.0 * (255.0 * 255.0 / mse).log10();

    println!(
        "{}x{} image, {}x{} blocks, quality {}",
        width, height, block_size, block_size, quality
    );
    println!(
        "{} bytes ({:.3} bits/pixel), PSNR {:.2} dB",
        total_bytes,
        total_bytes as f64 * 8.0 / image.len() as f64,
        psnr
    );

    Ok(())
}
