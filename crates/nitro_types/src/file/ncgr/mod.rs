//! NCGR (character graphic resource) support.
//!
//! An NCGR holds the raw pixels every sprite is cut from, either as 8x8
//! tiles or as a plain raster, at 4 or 8 bits per pixel.
//!
//! # Layout
//!
//! ```text
//! Header  "RGCN"
//! Chunk   "RAHC"
//!   0x00  u16   height in tiles (0xFFFF: unknown)
//!   0x02  u16   width in tiles  (0xFFFF: unknown)
//!   0x04  u32   bit depth (3 = 4bpp, 4 = 8bpp)
//!   0x08  u32   VRAM mapping mode
//!   0x0C  u32   tiled flag (tiled when the low byte is 0)
//!   0x10  u32   data size
//!   0x14  u32   data offset, always 0x18
//!   0x18  ...   pixel data
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use nitro_types::file::{NcgrFile, NclrFile};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ncgr = NcgrFile::open("sprite.ncgr")?;
//! let nclr = NclrFile::open("sprite.nclr")?;
//! ncgr.decrypt_forward();
//! let palette = Arc::new(nclr.sub_palette(0));
//! ncgr.as_rectangle(&palette).to_rgba_image().save("sprite.png")?;
//! # Ok(())
//! # }
//! ```

mod cipher;

use std::path::Path;
use std::sync::Arc;

use crate::render::{IndexedImage, Palette, Rect, TileLayout, TileView};

use super::chunk::{ByteReader, Header, read_chunk};
use super::{NitroError, ResourceKind};

pub use cipher::Direction;

/// On-disk header magic.
pub const MAGIC: [u8; 4] = *b"RGCN";

/// On-disk character chunk magic.
pub const CHUNK_MAGIC: [u8; 4] = *b"RAHC";

/// Offset of the pixel data from the start of the chunk payload.
pub const DATA_OFFSET: u32 = 0x18;

/// Tile dimension value meaning "unknown".
pub const UNKNOWN_DIMENSION: u16 = 0xFFFF;

/// Row width assumed when the dimensions are unknown.
pub const FALLBACK_WIDTH: i32 = 64;

/// Largest image, in pixels, [`File::from_bytes`] accepts.
pub const MAX_PIXELS: usize = 8 * 1024 * 1024;

/// Pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
	/// Two pixels per byte, low nibble first
	Bpp4,
	/// One pixel per byte
	Bpp8,
}

impl BitDepth {
	/// Decodes the on-disk bit depth code.
	pub fn from_code(code: u32) -> Result<Self, NitroError> {
		match code {
			3 => Ok(BitDepth::Bpp4),
			4 => Ok(BitDepth::Bpp8),
			other => Err(NitroError::UnsupportedBitDepth(other)),
		}
	}

	/// Pixels stored per data byte.
	pub fn pixels_per_byte(self) -> usize {
		match self {
			BitDepth::Bpp4 => 2,
			BitDepth::Bpp8 => 1,
		}
	}
}

/// NCGR file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	header: Header,
	height: u16,
	width: u16,
	bit_depth: BitDepth,
	vram_mode: u32,
	tiled: bool,
	data: Vec<u8>,
	/// Unpacked pixels, one index per byte, padded to the bounds.
	pix: Vec<u8>,
}

impl File {
	/// Parses an NCGR from bytes.
	pub fn from_bytes(data: &[u8]) -> Result<Self, NitroError> {
		Self::from_bytes_with_limit(data, MAX_PIXELS)
	}

	/// Parses an NCGR, rejecting images whose declared bounds cover more
	/// than `max_pixels`.
	pub fn from_bytes_with_limit(data: &[u8], max_pixels: usize) -> Result<Self, NitroError> {
		let mut reader = ByteReader::new(data, ResourceKind::Ncgr);
		let header = Header::read(&mut reader, MAGIC)?;
		let mut chunk = read_chunk(&mut reader, CHUNK_MAGIC)?;
		let payload = &mut chunk.payload;

		let height = payload.read_u16()?;
		let width = payload.read_u16()?;
		let bit_depth = BitDepth::from_code(payload.read_u32()?)?;
		let vram_mode = payload.read_u32()?;
		let tiled = payload.read_u32()? & 0xFF == 0;
		let data_size = payload.read_u32()? as usize;
		let data_offset = payload.read_u32()?;
		if data_offset != DATA_OFFSET {
			return Err(NitroError::invalid_layout(
				ResourceKind::Ncgr,
				format!("pixel data offset {data_offset:#x}, expected {DATA_OFFSET:#x}"),
			));
		}
		// A short chunk yields whatever is there.
		let data = payload.read_rest();
		let data = data[..data_size.min(data.len())].to_vec();

		let mut ncgr = Self {
			header,
			height,
			width,
			bit_depth,
			vram_mode,
			tiled,
			data,
			pix: Vec::new(),
		};
		let area = ncgr.bounds().area();
		if area > max_pixels {
			return Err(NitroError::TooLarge {
				size: area,
				limit: max_pixels,
			});
		}
		ncgr.unpack();

		log::debug!(
			"NCGR: {}x{} tiles, {:?}, {}, {} bytes",
			ncgr.width,
			ncgr.height,
			ncgr.bit_depth,
			if ncgr.tiled { "tiled" } else { "linear" },
			ncgr.data.len()
		);
		Ok(ncgr)
	}

	/// Parses an NCGR from a reader.
	pub fn from_reader<R: std::io::Read>(reader: &mut R) -> Result<Self, NitroError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(&data)
	}

	/// Opens an NCGR file from disk.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, NitroError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Common resource header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Pixel format.
	pub fn bit_depth(&self) -> BitDepth {
		self.bit_depth
	}

	/// VRAM mapping mode code.
	pub fn vram_mode(&self) -> u32 {
		self.vram_mode
	}

	/// Returns `true` when pixels are stored as 8x8 tiles.
	pub fn is_tiled(&self) -> bool {
		self.tiled
	}

	/// Raw (possibly encrypted) pixel data.
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Returns `true` when the header gives no dimensions.
	pub fn has_unknown_dimensions(&self) -> bool {
		self.height == UNKNOWN_DIMENSION || self.width == UNKNOWN_DIMENSION
	}

	/// Pixel bounds of the whole resource.
	///
	/// With unknown dimensions the image is taken to be 64 pixels wide and
	/// as tall as the pixel count requires.
	pub fn bounds(&self) -> Rect {
		if !self.has_unknown_dimensions() {
			return Rect::with_size(0, 0, i32::from(self.width) * 8, i32::from(self.height) * 8);
		}
		let count = (self.data.len() * self.bit_depth.pixels_per_byte()) as i32;
		let height = (count + FALLBACK_WIDTH - 1) / FALLBACK_WIDTH;
		Rect::with_size(0, 0, FALLBACK_WIDTH, height)
	}

	fn unpack(&mut self) {
		let mut pix = match self.bit_depth {
			BitDepth::Bpp4 => self.data.iter().flat_map(|b| [b & 0x0F, b >> 4]).collect(),
			BitDepth::Bpp8 => self.data.clone(),
		};
		let area = self.bounds().area();
		if pix.len() < area {
			pix.resize(area, 0);
		}
		self.pix = pix;
	}

	/// Unpacked pixels, one palette index per byte, at least as many as the
	/// bounds cover.
	pub fn pixels(&self) -> &[u8] {
		&self.pix
	}

	/// XORs the pixel data with the key stream starting at `seed`.
	///
	/// Applying the same seed and direction twice restores the data.
	pub fn apply_cipher(&mut self, seed: u16, direction: Direction) {
		cipher::apply(&mut self.data, seed, direction);
		self.unpack();
	}

	/// Decrypts front to back, seeded from the first pair. Returns the seed
	/// used, if the data holds at least one pair.
	pub fn decrypt_forward(&mut self) -> Option<u16> {
		let seed = cipher::stored_seed(&self.data, Direction::Forward)?;
		self.apply_cipher(seed, Direction::Forward);
		Some(seed)
	}

	/// Decrypts back to front, seeded from the last pair. Returns the seed
	/// used, if the data holds at least one pair.
	pub fn decrypt_reverse(&mut self) -> Option<u16> {
		let seed = cipher::stored_seed(&self.data, Direction::Reverse)?;
		self.apply_cipher(seed, Direction::Reverse);
		Some(seed)
	}

	/// Returns the whole resource as one raster image, untiling if needed.
	pub fn as_rectangle(&self, palette: &Arc<Palette>) -> IndexedImage {
		let r = self.bounds();
		let (w, h) = (r.width() as usize, r.height() as usize);
		let pix = if self.tiled { untile(&self.pix, w, h) } else { self.pix[..w * h].to_vec() };
		IndexedImage::from_pixels(r, pix, Arc::clone(palette))
	}

	/// Returns a `width` x `height` view starting at tile `tile_index`.
	///
	/// Tiled data is addressed as consecutive tiles from `tile_index`, with
	/// `ceil(width / 8)` tiles per row. Linear data is addressed at the
	/// tile's position in the raster and clipped to the image. Indices past
	/// the data yield an empty view.
	pub fn tile_view(&self, tile_index: usize, width: i32, height: i32, palette: &Arc<Palette>) -> TileView<'_> {
		let palette = Arc::clone(palette);
		if self.tiled {
			let start = tile_index * 64;
			if start >= self.pix.len() {
				return TileView::empty(palette);
			}
			let layout = TileLayout::Tiled {
				stride: ((width + 7) / 8).max(0) as usize,
			};
			return TileView::new(&self.pix[start..], width, height, layout, palette);
		}

		let bounds = self.bounds();
		let tiles_per_row = (bounds.width() / 8).max(1) as usize;
		let x = (tile_index % tiles_per_row * 8) as i32;
		let y = (tile_index / tiles_per_row * 8) as i64;
		if y >= i64::from(bounds.max.y) {
			return TileView::empty(palette);
		}
		let y = y as i32;
		let width = width.min(bounds.max.x - x);
		let height = height.min(bounds.max.y - y);
		let stride = bounds.width() as usize;
		let start = y as usize * stride + x as usize;
		if width <= 0 || height <= 0 || start >= self.pix.len() {
			return TileView::empty(palette);
		}
		let layout = TileLayout::Linear {
			stride,
		};
		TileView::new(&self.pix[start..], width, height, layout, palette)
	}
}

/// Rearranges consecutive 8x8 tiles into raster order.
///
/// Tiles that would extend past `w` x `h` are clipped.
fn untile(src: &[u8], w: usize, h: usize) -> Vec<u8> {
	let mut dst = vec![0u8; w * h];
	let mut tiles = src.chunks_exact(64);
	for y in (0..h).step_by(8) {
		for x in (0..w).step_by(8) {
			let Some(tile) = tiles.next() else {
				return dst;
			};
			for (ty, row) in tile.chunks_exact(8).enumerate() {
				if y + ty >= h {
					break;
				}
				let n = 8.min(w - x);
				let di = (y + ty) * w + x;
				dst[di..di + n].copy_from_slice(&row[..n]);
			}
		}
	}
	dst
}
