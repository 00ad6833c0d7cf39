//! LZ10 / LZ11 decompression.
//!
//! ## Stream Layout
//!
//! | Offset | Size | Field   | Description                           |
//! |--------|------|---------|---------------------------------------|
//! | 0x00   | 1    | `magic` | 0x10 or 0x11                          |
//! | 0x01   | 3    | `size`  | Decompressed size, little-endian      |
//! | 0x04   | ...  | tokens  | Flag byte followed by up to 8 tokens  |
//!
//! Each flag byte is consumed high bit first. A clear bit is a literal byte,
//! a set bit is a back-reference read as a big-endian token.
//!
//! ### Back-references
//!
//! | Variant | Top nibble | Extra bytes | Count                       |
//! |---------|------------|-------------|-----------------------------|
//! | 0x10    | any        | 0           | `nibble + 3`                |
//! | 0x11    | 2..=15     | 0           | `nibble + 1`                |
//! | 0x11    | 0          | 1           | `(n >> 12) + 0x11` (8 bits) |
//! | 0x11    | 1          | 2           | `(n >> 12) + 0x111` (16 bits)|
//!
//! The distance is always the low 12 bits of the final token plus one.

use crate::file::{NitroError, ResourceKind};

use super::{LzConfig, MAGIC_LZ10, MAGIC_LZ11};

/// Decompressor state for both variants.
#[derive(Debug)]
struct DecompressorState<'a> {
	input: &'a [u8],
	read_offset: usize,
	output: Vec<u8>,
	total_size: usize,
	variant: u8,
}

impl<'a> DecompressorState<'a> {
	fn new(input: &'a [u8], variant: u8, total_size: usize) -> Self {
		Self {
			input,
			read_offset: 4,
			output: Vec::with_capacity(total_size),
			total_size,
			variant,
		}
	}

	fn next_byte(&mut self) -> Result<u8, NitroError> {
		let Some(&byte) = self.input.get(self.read_offset) else {
			// Report how far short of the declared size we ended.
			return Err(NitroError::unexpected_eof(
				ResourceKind::Lz,
				self.total_size,
				self.output.len(),
			));
		};
		self.read_offset += 1;
		Ok(byte)
	}

	fn next_token(&mut self) -> Result<u32, NitroError> {
		let hi = self.next_byte()?;
		let lo = self.next_byte()?;
		Ok((u32::from(hi) << 8) | u32::from(lo))
	}

	/// Reads a back-reference and returns `(count, distance)`.
	fn read_reference(&mut self) -> Result<(usize, usize), NitroError> {
		let mut n = self.next_token()?;
		let count = if self.variant == MAGIC_LZ10 {
			(n >> 12) + 3
		} else {
			match n >> 12 {
				0 => {
					n = ((n & 0xFFF) << 8) | u32::from(self.next_byte()?);
					(n >> 12) + 0x11
				}
				1 => {
					let b1 = u32::from(self.next_byte()?);
					let b2 = u32::from(self.next_byte()?);
					n = ((n & 0xFFF) << 16) | (b1 << 8) | b2;
					(n >> 12) + 0x111
				}
				nibble => nibble + 1,
			}
		};
		let distance = (n & 0xFFF) + 1;
		Ok((count as usize, distance as usize))
	}

	fn copy_reference(&mut self, count: usize, distance: usize) -> Result<(), NitroError> {
		if distance > self.output.len() {
			return Err(NitroError::malformed(
				ResourceKind::Lz,
				format!(
					"back-reference distance {distance} exceeds {} bytes decoded",
					self.output.len()
				),
			));
		}
		let count = count.min(self.total_size - self.output.len());
		// Overlapping copies repeat the tail, so go byte by byte.
		for _ in 0..count {
			let byte = self.output[self.output.len() - distance];
			self.output.push(byte);
		}
		Ok(())
	}

	fn run(mut self) -> Result<Vec<u8>, NitroError> {
		while self.output.len() < self.total_size {
			let flags = self.next_byte()?;
			for bit in (0..8).rev() {
				if self.output.len() >= self.total_size {
					break;
				}
				if (flags >> bit) & 1 == 0 {
					let byte = self.next_byte()?;
					self.output.push(byte);
				} else {
					let (count, distance) = self.read_reference()?;
					self.copy_reference(count, distance)?;
				}
			}
		}
		Ok(self.output)
	}
}

/// Decompresses an LZ10 or LZ11 stream.
///
/// The variant is chosen by the magic byte. Decoding stops exactly at the
/// declared size; trailing input is ignored.
pub fn decompress(data: &[u8], config: &LzConfig) -> Result<Vec<u8>, NitroError> {
	if data.len() < 4 {
		return Err(NitroError::unexpected_eof(ResourceKind::Lz, 4, data.len()));
	}
	let variant = data[0];
	if variant != MAGIC_LZ10 && variant != MAGIC_LZ11 {
		return Err(NitroError::malformed(
			ResourceKind::Lz,
			format!("unknown compression type {variant:#04x}"),
		));
	}
	let size = super::declared_size(data);
	if size > config.max_size {
		return Err(NitroError::TooLarge {
			size,
			limit: config.max_size,
		});
	}

	log::trace!("LZ{variant:02x}: decoding {} bytes into {size}", data.len());
	DecompressorState::new(data, variant, size).run()
}
