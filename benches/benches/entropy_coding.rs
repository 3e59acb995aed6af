//! Benchmarks for run-length and Huffman coding
//!
//! Run with: cargo bench --bench entropy_coding

use adct_bitstream::{canonical_codes, run_length_decode, run_length_encode, HuffmanTree};
use adct_core::Block;
use adct_decoder::EntropyDecoder;
use adct_encoder::{max_encoded_size, EntropyEncoder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Sparse block shaped like quantizer output
fn quantized_block(size: usize, seed: u64) -> Block<i32> {
    let mut rng = fastrand::Rng::with_seed(seed);
    Block::from_fn(size, |row, col| {
        if row + col < 3 {
            rng.i32(-30..30)
        } else if rng.u8(..) < 25 {
            rng.i32(-2..=2)
        } else {
            0
        }
    })
}

fn bench_run_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("Run-Length");
    let sequence = quantized_block(16, 1).into_vec();
    let symbols = run_length_encode(&sequence);

    group.bench_function("encode_256", |b| {
        b.iter(|| run_length_encode(black_box(&sequence)));
    });
    group.bench_function("decode_256", |b| {
        b.iter(|| run_length_decode(black_box(&symbols), 256).unwrap());
    });

    group.finish();
}

fn bench_huffman_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Huffman Build");

    for count in [4usize, 32, 256] {
        let mut rng = fastrand::Rng::with_seed(count as u64);
        let frequencies: Vec<u64> = (0..count).map(|_| rng.u64(1..500)).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &frequencies,
            |b, freqs| {
                b.iter(|| {
                    let lengths = HuffmanTree::build(black_box(freqs))
                        .unwrap()
                        .code_lengths()
                        .unwrap();
                    canonical_codes(&lengths).unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_block_entropy(c: &mut Criterion) {
    let mut group = c.benchmark_group("Block Entropy Coding");

    for size in [8, 16, 32] {
        let block = quantized_block(size, size as u64);
        let encoder = EntropyEncoder::new(size).unwrap();
        let decoder = EntropyDecoder::new(size).unwrap();
        let mut buffer = vec![0u8; max_encoded_size(size)];
        let used = encoder.encode_block(&block, &mut buffer).unwrap().bytes_written;
        let encoded = buffer[..used].to_vec();

        group.bench_with_input(BenchmarkId::new("encode", size), &block, |b, block| {
            b.iter(|| encoder.encode_block(black_box(block), &mut buffer).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, data| {
            let mut output = Block::zeros(size);
            b.iter(|| decoder.decode_block(black_box(data), &mut output).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_run_length,
    bench_huffman_build,
    bench_block_entropy
);
criterion_main!(benches);
