//! Benchmarks for the DCT, quantization and zigzag stages
//!
//! Run with: cargo bench --bench transforms

use adct_core::Block;
use adct_transform::{block_variance, QuantContext, TransformContext, ZigzagScan};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn random_block(size: usize, seed: u64) -> Block<f64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    Block::from_fn(size, |_, _| rng.i32(-128..128) as f64)
}

fn bench_dct(c: &mut Criterion) {
    let mut group = c.benchmark_group("DCT");

    for size in [4, 8, 16, 32] {
        let ctx = TransformContext::new(size).unwrap();
        let block = random_block(size, size as u64);
        let coeffs = ctx.forward(&block);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("forward", size), &block, |b, block| {
            b.iter(|| ctx.forward(black_box(block)));
        });
        group.bench_with_input(BenchmarkId::new("inverse", size), &coeffs, |b, coeffs| {
            b.iter(|| ctx.inverse(black_box(coeffs)));
        });
    }

    group.finish();
}

fn bench_quantization(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quantization");
    let coeffs = TransformContext::new(8)
        .unwrap()
        .forward(&random_block(8, 1));
    let variance = block_variance(&random_block(8, 1));

    for adaptive in [false, true] {
        let ctx = QuantContext::new(8, 75, adaptive).unwrap();
        let label = if adaptive { "adaptive" } else { "fixed" };
        let quantized = ctx.quantize(&coeffs, variance);

        group.bench_function(format!("quantize_8x8_{}", label), |b| {
            b.iter(|| ctx.quantize(black_box(&coeffs), black_box(variance)));
        });
        group.bench_function(format!("dequantize_8x8_{}", label), |b| {
            b.iter(|| ctx.dequantize(black_box(&quantized), black_box(variance)));
        });
    }

    group.finish();
}

fn bench_zigzag(c: &mut Criterion) {
    let mut group = c.benchmark_group("Zigzag");

    for size in [8, 32] {
        let scanner = ZigzagScan::new(size).unwrap();
        let block = random_block(size, 3).round_to_int();
        let sequence = scanner.scan(&block);

        group.bench_with_input(BenchmarkId::new("scan", size), &block, |b, block| {
            b.iter(|| scanner.scan(black_box(block)));
        });
        group.bench_with_input(BenchmarkId::new("unscan", size), &sequence, |b, seq| {
            b.iter(|| scanner.unscan(black_box(seq)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dct, bench_quantization, bench_zigzag);
criterion_main!(benches);
