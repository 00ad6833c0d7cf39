//! NCLR (color resource) support.
//!
//! An NCLR stores a flat table of 15-bit colors, grouped into 16-color
//! sub-palettes for 4bpp graphics.
//!
//! # Layout
//!
//! ```text
//! Header  "RLCN"
//! Chunk   "TTLP"
//!   0x00  u32   bit depth
//!   0x04  u32   reserved
//!   0x08  u32   data size
//!   0x0C  u32   data offset
//!   0x10  ...   (chunk size - 24) / 2 colors, u16 each
//! ```

use std::fmt;
use std::path::Path;

use crate::render::{Color, Palette, rgb15_to_color};

use super::chunk::{ByteReader, Header, read_chunk};
use super::{NitroError, ResourceKind};

/// On-disk header magic.
pub const MAGIC: [u8; 4] = *b"RLCN";

/// On-disk palette chunk magic.
pub const CHUNK_MAGIC: [u8; 4] = *b"TTLP";

/// Number of colors in one sub-palette.
pub const SUB_PALETTE_SIZE: usize = 16;

/// Fixed part of the TTLP chunk, prefix included.
const TTLP_FIXED_SIZE: usize = 24;

/// A 15-bit BGR555 color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb15(pub u16);

impl Rgb15 {
	/// Converts to an opaque 8-bit color.
	pub fn to_color(self) -> Color {
		rgb15_to_color(self.0)
	}

	/// Red channel (0-31).
	pub fn red(self) -> u8 {
		(self.0 & 0x1F) as u8
	}

	/// Green channel (0-31).
	pub fn green(self) -> u8 {
		((self.0 >> 5) & 0x1F) as u8
	}

	/// Blue channel (0-31).
	pub fn blue(self) -> u8 {
		((self.0 >> 10) & 0x1F) as u8
	}
}

impl fmt::Display for Rgb15 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:04X}", self.0)
	}
}

/// NCLR file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	header: Header,
	bit_depth: u32,
	colors: Vec<Rgb15>,
}

impl File {
	/// Parses an NCLR from bytes.
	pub fn from_bytes(data: &[u8]) -> Result<Self, NitroError> {
		let mut reader = ByteReader::new(data, ResourceKind::Nclr);
		let header = Header::read(&mut reader, MAGIC)?;
		let mut chunk = read_chunk(&mut reader, CHUNK_MAGIC)?;
		let payload = &mut chunk.payload;

		let bit_depth = payload.read_u32()?;
		payload.skip(4)?;
		let _data_size = payload.read_u32()?;
		let _data_offset = payload.read_u32()?;

		let count = (chunk.size as usize).saturating_sub(TTLP_FIXED_SIZE) / 2;
		let mut colors = Vec::with_capacity(count.min(payload.remaining() / 2));
		for _ in 0..count {
			colors.push(Rgb15(payload.read_u16()?));
		}

		log::debug!("NCLR: {} colors, bit depth {bit_depth}", colors.len());
		Ok(Self {
			header,
			bit_depth,
			colors,
		})
	}

	/// Parses an NCLR from a reader.
	pub fn from_reader<R: std::io::Read>(reader: &mut R) -> Result<Self, NitroError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(&data)
	}

	/// Opens an NCLR file from disk.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, NitroError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Common resource header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Bit depth code from the palette chunk.
	pub fn bit_depth(&self) -> u32 {
		self.bit_depth
	}

	/// All colors, in file order.
	pub fn colors(&self) -> &[Rgb15] {
		&self.colors
	}

	/// Number of complete 16-color sub-palettes.
	pub fn sub_palette_count(&self) -> usize {
		self.colors.len() / SUB_PALETTE_SIZE
	}

	/// Returns the 16 colors starting at `n * 16`.
	///
	/// # Panics
	///
	/// Panics if `n >= sub_palette_count()`.
	pub fn sub_palette(&self, n: usize) -> Palette {
		let start = n * SUB_PALETTE_SIZE;
		let colors = self.colors[start..start + SUB_PALETTE_SIZE].iter().map(|c| c.to_color()).collect();
		Palette::new(colors)
	}

	/// Returns the whole table as one palette (at most 256 entries).
	pub fn full_palette(&self) -> Palette {
		Palette::new(self.colors.iter().take(256).map(|c| c.to_color()).collect())
	}
}
