//! End-to-end benchmarks for the block encoder and decoder
//!
//! Run with: cargo bench --bench end_to_end

use adct_core::{Block, CodecConfig};
use adct_decoder::BlockDecoder;
use adct_encoder::BlockEncoder;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Cut a synthetic grayscale image into level-shifted tiles
fn create_tiles(width: usize, height: usize, block_size: usize) -> Vec<Block<f64>> {
    let image: Vec<u8> = (0..width * height)
        .map(|i| ((i % width) * 191 / width + (i / width) * 64 / height) as u8)
        .collect();

    let mut tiles = Vec::new();
    for row in (0..height).step_by(block_size) {
        for col in (0..width).step_by(block_size) {
            tiles.push(Block::from_pixels(&image, width, row, col, block_size).unwrap());
        }
    }
    tiles
}

fn bench_encode_by_quality(c: &mut Criterion) {
    let mut group = c.benchmark_group("Encode by Quality");
    let tile = create_tiles(8, 8, 8).remove(0);

    for quality in [10u8, 50, 90] {
        let encoder = BlockEncoder::new(CodecConfig::new().quality(quality)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(quality), &tile, |b, tile| {
            b.iter(|| encoder.encode_to_vec(black_box(tile)).unwrap());
        });
    }

    group.finish();
}

fn bench_roundtrip_by_block_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("Roundtrip by Block Size");

    for block_size in [4, 8, 16] {
        let config = CodecConfig::new().block_size(block_size).adaptive(true);
        let encoder = BlockEncoder::new(config).unwrap();
        let decoder = BlockDecoder::new(config).unwrap();
        let tile = create_tiles(block_size, block_size, block_size).remove(0);
        group.throughput(Throughput::Elements((block_size * block_size) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(block_size), &tile, |b, tile| {
            b.iter(|| {
                let (encoded, _) = encoder.encode_to_vec(black_box(tile)).unwrap();
                decoder.decode_encoded(&encoded).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_parallel_vs_serial(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parallel Processing");
    let config = CodecConfig::default();
    let encoder = BlockEncoder::new(config).unwrap();
    let tiles = create_tiles(256, 256, 8);
    group.throughput(Throughput::Elements((256 * 256) as u64));

    group.bench_function("encode_256x256_with_rayon", |b| {
        b.iter(|| encoder.encode_blocks(black_box(&tiles)).unwrap());
    });
    group.bench_function("encode_256x256_serial", |b| {
        b.iter(|| {
            tiles
                .iter()
                .map(|tile| encoder.encode_to_vec(tile).unwrap())
                .collect::<Vec<_>>()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_encode_by_quality,
    bench_roundtrip_by_block_size,
    bench_parallel_vs_serial
);
criterion_main!(benches);
