//! Benchmark suite for the cell rasterizer
//!
//! Measures Scale2x supersampling and the inverse-mapped rotate path used
//! for transformed cells.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench cell_render

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use nitro_benches::{generate_sprite_pixels, sizes};
use nitro_types::render::{Color, IndexedImage, Palette, Point, Rect, rotate, scale8x};
use std::{hint::black_box, sync::Arc};

fn sprite() -> IndexedImage {
	let (w, h) = sizes::CELL;
	let colors = (0..16u8).map(|i| Color::rgb(i * 16, 255 - i * 16, i * 8)).collect();
	let palette = Arc::new(Palette::new(colors).with_transparent_zero());
	let rect = Rect::with_size(-(w as i32) / 2, -(h as i32) / 2, w as i32, h as i32);
	IndexedImage::from_pixels(rect, generate_sprite_pixels(w, h), palette)
}

fn bench_scale8x(c: &mut Criterion) {
	let mut group = c.benchmark_group("cell_scale8x");
	let cell = sprite();
	group.throughput(Throughput::Elements(cell.pixels().len() as u64));
	group.bench_function("scale8x", |b| {
		b.iter(|| black_box(scale8x(black_box(&cell))));
	});
	group.finish();
}

fn bench_rotate(c: &mut Criterion) {
	let mut group = c.benchmark_group("cell_rotate");
	let cell = sprite();
	let scaled = scale8x(&cell);
	let canvas = Rect::new(0, 0, 192, 96);
	let dp = Point::new(96, 48);
	let reach = Rect::new(96 - 46, 48 - 46, 96 + 46, 48 + 46);
	group.throughput(Throughput::Elements(reach.area() as u64));

	for (name, turns) in [("eighth", 0.125), ("quarter", 0.25)] {
		group.bench_with_input(BenchmarkId::new("plain", name), &turns, |b, &turns| {
			b.iter(|| {
				let mut dst = IndexedImage::new(canvas, cell.palette_arc());
				rotate(&mut dst, reach, dp, &cell, Point::new(0, 0), 1.0, 1.0, turns);
				black_box(dst)
			});
		});
		group.bench_with_input(BenchmarkId::new("supersampled", name), &turns, |b, &turns| {
			b.iter(|| {
				let mut dst = IndexedImage::new(canvas, cell.palette_arc());
				rotate(&mut dst, reach, dp, &scaled, Point::new(0, 0), 8.0, 8.0, turns);
				black_box(dst)
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_scale8x, bench_rotate);
criterion_main!(benches);
