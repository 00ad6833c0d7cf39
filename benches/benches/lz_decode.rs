//! Benchmark suite for LZ10 / LZ11 decompression
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench lz_decode

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nitro_benches::{generate_lz, generate_sample_data, sizes};
use nitro_types::file::lz;
use std::hint::black_box;

fn bench_decompress(c: &mut Criterion) {
	let mut group = c.benchmark_group("lz_decompress");

	for (name, size) in [("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("large", sizes::LARGE)] {
		let data = generate_sample_data(size);
		group.throughput(Throughput::Bytes(size as u64));
		for (variant_name, variant) in [("lz10", lz::MAGIC_LZ10), ("lz11", lz::MAGIC_LZ11)] {
			let packed = generate_lz(&data, variant);
			group.bench_with_input(BenchmarkId::new(variant_name, name), &packed, |b, packed| {
				b.iter(|| black_box(lz::decompress(black_box(packed))));
			});
		}
	}

	group.finish();
}

/// Raw runs of one byte hit the overlapping-copy path on every reference.
fn bench_overlapping_runs(c: &mut Criterion) {
	let mut group = c.benchmark_group("lz_runs");

	let data = vec![0x11u8; sizes::MEDIUM];
	let packed = generate_lz(&data, lz::MAGIC_LZ11);
	group.throughput(Throughput::Bytes(data.len() as u64));
	group.bench_function("lz11_single_byte_run", |b| {
		b.iter(|| black_box(lz::decompress(black_box(&packed))));
	});

	group.finish();
}

fn bench_detection(c: &mut Criterion) {
	let data = generate_lz(&generate_sample_data(sizes::SMALL), lz::MAGIC_LZ10);
	c.bench_function("lz_is_compressed", |b| {
		b.iter(|| black_box(lz::is_compressed(black_box(&data))));
	});
}

criterion_group!(benches, bench_decompress, bench_overlapping_runs, bench_detection);
criterion_main!(benches);
