//! NMCR (multi-cell resource) support.
//!
//! A multi-cell places several animated cells (from an NANR) relative to a
//! shared origin.
//!
//! # Layout
//!
//! ```text
//! Header  "RCMN"
//! Chunk   "KBCM"
//!   0x00  u16   multi-cell count
//!   0x02  u16   padding
//!   0x04  u32   multi-cell offset
//!   0x08  u32   object offset
//!   0x0C  u32   reserved x2
//!   0x14  ...   multi-cell records {u16 object count, u16 acell count, u32 object offset}
//!         ...   objects {u16 acell index, i16 x, i16 y, u16 flags}
//! ```

use std::path::Path;

use super::chunk::{ByteReader, Header, read_chunk};
use super::{NitroError, ResourceKind};

/// On-disk header magic.
pub const MAGIC: [u8; 4] = *b"RCMN";

/// On-disk multi-cell bank chunk magic.
pub const CHUNK_MAGIC: [u8; 4] = *b"KBCM";

/// One animated cell placed inside a multi-cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mobj {
	/// Index into the NANR's animated cells
	pub acell_index: u16,
	/// Horizontal offset from the multi-cell origin
	pub x: i16,
	/// Vertical offset from the multi-cell origin
	pub y: i16,
	/// Raw flag bits
	pub flags: u16,
}

impl Mobj {
	/// Size of one record on disk.
	pub const SIZE: usize = 8;

	/// Raw play mode code (low four flag bits).
	pub fn play_mode_code(&self) -> u8 {
		(self.flags & 0xF) as u8
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct McellRecord {
	mobj_count: u16,
	acell_count: u16,
	mobj_offset: u32,
}

/// NMCR file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	header: Header,
	mcells: Vec<McellRecord>,
	mobjs: Vec<Mobj>,
}

impl File {
	/// Parses an NMCR from bytes.
	pub fn from_bytes(data: &[u8]) -> Result<Self, NitroError> {
		let mut reader = ByteReader::new(data, ResourceKind::Nmcr);
		let header = Header::read(&mut reader, MAGIC)?;
		let mut chunk = read_chunk(&mut reader, CHUNK_MAGIC)?;
		let payload = &mut chunk.payload;

		let count = payload.read_u16()?;
		payload.skip(2)?;
		let _mcell_offset = payload.read_u32()?;
		let _mobj_offset = payload.read_u32()?;
		payload.skip(8)?;

		let mut mcells = Vec::with_capacity(usize::from(count));
		for _ in 0..count {
			let mobj_count = payload.read_u16()?;
			let acell_count = payload.read_u16()?;
			let mobj_offset = payload.read_u32()?;
			if mobj_offset as usize % Mobj::SIZE != 0 {
				return Err(NitroError::malformed(
					ResourceKind::Nmcr,
					format!("object offset {mobj_offset} is not a multiple of {}", Mobj::SIZE),
				));
			}
			mcells.push(McellRecord {
				mobj_count,
				acell_count,
				mobj_offset,
			});
		}

		let total: usize = mcells.iter().map(|c| usize::from(c.mobj_count)).sum();
		for (i, cell) in mcells.iter().enumerate() {
			let end = cell.mobj_offset as usize / Mobj::SIZE + usize::from(cell.mobj_count);
			if end > total {
				return Err(NitroError::malformed(
					ResourceKind::Nmcr,
					format!("multi-cell {i} references objects up to {end}, table holds {total}"),
				));
			}
		}

		let mut mobjs = Vec::with_capacity(total);
		for _ in 0..total {
			mobjs.push(Mobj {
				acell_index: payload.read_u16()?,
				x: payload.read_i16()?,
				y: payload.read_i16()?,
				flags: payload.read_u16()?,
			});
		}

		log::debug!("NMCR: {} multi-cells, {} objects", mcells.len(), mobjs.len());
		Ok(Self {
			header,
			mcells,
			mobjs,
		})
	}

	/// Parses an NMCR from a reader.
	pub fn from_reader<R: std::io::Read>(reader: &mut R) -> Result<Self, NitroError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(&data)
	}

	/// Opens an NMCR file from disk.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, NitroError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Common resource header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Number of multi-cells.
	pub fn len(&self) -> usize {
		self.mcells.len()
	}

	/// Returns `true` when the bank holds no multi-cells.
	pub fn is_empty(&self) -> bool {
		self.mcells.is_empty()
	}

	/// Number of distinct animated cells multi-cell `i` declares.
	///
	/// # Panics
	///
	/// Panics if `i >= len()`.
	pub fn acell_count(&self, i: usize) -> usize {
		usize::from(self.mcells[i].acell_count)
	}

	/// Objects of multi-cell `i`, in drawing order.
	///
	/// # Panics
	///
	/// Panics if `i >= len()`.
	pub fn mcell(&self, i: usize) -> &[Mobj] {
		let cell = self.mcells[i];
		let start = cell.mobj_offset as usize / Mobj::SIZE;
		&self.mobjs[start..start + usize::from(cell.mobj_count)]
	}
}
