//! Criterion benchmarks for compression and decompression throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use huffzip::HuffmanCodec;

fn bench_compress(c: &mut Criterion) {
    let text = b"the the the and the and the and the cat sat on the mat".repeat(200);
    let spread: Vec<u8> = (0u8..=255).cycle().take(16_384).collect();

    c.bench_function("huffman_compress_text", |b| {
        b.iter(|| HuffmanCodec::compress(black_box(&text)).unwrap())
    });

    c.bench_function("huffman_compress_spread", |b| {
        b.iter(|| HuffmanCodec::compress(black_box(&spread)).unwrap())
    });
}

fn bench_decompress(c: &mut Criterion) {
    let text = b"the the the and the and the and the cat sat on the mat".repeat(200);
    let compressed = HuffmanCodec::compress(&text).unwrap().into_bytes();

    c.bench_function("huffman_decompress_text", |b| {
        b.iter(|| HuffmanCodec::decompress(black_box(&compressed)).unwrap())
    });
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
