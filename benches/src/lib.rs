//! Benchmark helper utilities for nitro-rs
//!
//! Generators for synthetic payloads: compressible byte streams, LZ10 and
//! LZ11 encodings of them, and tile graphics for the rasterizer benches.

/// Generates mildly repetitive bytes, similar to tile data.
///
/// Runs of 1..=16 bytes drawn from a 16-value alphabet, seeded so every
/// call returns the same stream.
pub fn generate_sample_data(len: usize) -> Vec<u8> {
	let mut seed = 0x1234_5678u32;
	let mut out = Vec::with_capacity(len);
	while out.len() < len {
		seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
		let run = (seed >> 28) as usize + 1;
		let value = (seed >> 16) as u8 & 0x0F;
		out.extend(std::iter::repeat_n(value, run));
	}
	out.truncate(len);
	out
}

/// Compresses `data` as LZ10 (`variant` 0x10) or LZ11 (`variant` 0x11).
///
/// The encoder only looks back a short window, which keeps generation fast
/// while still producing a realistic mix of literals and references.
pub fn generate_lz(data: &[u8], variant: u8) -> Vec<u8> {
	const LOOKBACK: usize = 64;
	let max_count = if variant == 0x10 { 18 } else { 0x10110 };

	let len = data.len();
	let mut out = vec![variant, len as u8, (len >> 8) as u8, (len >> 16) as u8];
	let mut pos = 0;
	while pos < len {
		let flag_index = out.len();
		out.push(0);
		for bit in (0..8).rev() {
			if pos >= len {
				break;
			}
			let mut best = (0, 0);
			for candidate in pos.saturating_sub(LOOKBACK)..pos {
				let mut n = 0;
				while n < max_count && pos + n < len && data[candidate + n] == data[pos + n] {
					n += 1;
				}
				if n > best.0 {
					best = (n, pos - candidate);
				}
			}
			let (count, distance) = best;
			if count < 3 {
				out.push(data[pos]);
				pos += 1;
				continue;
			}
			out[flag_index] |= 1 << bit;
			let d = distance - 1;
			if variant == 0x10 {
				out.push((((count - 3) << 4) | (d >> 8)) as u8);
			} else if count <= 0x10 {
				out.push((((count - 1) << 4) | (d >> 8)) as u8);
			} else if count <= 0x110 {
				let v = count - 0x11;
				out.push((v >> 4) as u8);
				out.push((((v & 0xF) << 4) | (d >> 8)) as u8);
			} else {
				let v = count - 0x111;
				out.push((0x10 | (v >> 12)) as u8);
				out.push((v >> 4) as u8);
				out.push((((v & 0xF) << 4) | (d >> 8)) as u8);
			}
			out.push(d as u8);
			pos += count;
		}
	}
	out
}

/// Generates a 16-color indexed sprite with a transparent border.
pub fn generate_sprite_pixels(width: usize, height: usize) -> Vec<u8> {
	let mut pixels = vec![0u8; width * height];
	for y in 2..height.saturating_sub(2) {
		for x in 2..width.saturating_sub(2) {
			pixels[y * width + x] = (((x / 4) + (y / 4)) % 15 + 1) as u8;
		}
	}
	pixels
}

/// Common benchmark sizes for synthetic test data
pub mod sizes {
	/// One tile bank of a small sprite: 4 KiB
	pub const SMALL: usize = 4 * 1024;
	/// A full 4bpp character sheet: 32 KiB
	pub const MEDIUM: usize = 32 * 1024;
	/// A large 8bpp sheet: 256 KiB
	pub const LARGE: usize = 256 * 1024;
	/// Typical sprite cell: 64x64
	pub const CELL: (usize, usize) = (64, 64);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_lz() {
		let data = generate_sample_data(sizes::SMALL);
		for variant in [0x10, 0x11] {
			let packed = generate_lz(&data, variant);
			assert!(packed.len() < data.len());
			let unpacked = nitro_types::file::lz::decompress(&packed).unwrap();
			assert_eq!(unpacked, data);
		}
	}

	#[test]
	fn test_generate_sprite_pixels() {
		let (w, h) = sizes::CELL;
		let pixels = generate_sprite_pixels(w, h);
		assert_eq!(pixels.len(), w * h);
		assert_eq!(pixels[0], 0);
		assert_ne!(pixels[2 * w + 2], 0);
	}
}
