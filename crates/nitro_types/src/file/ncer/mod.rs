//! NCER (cell resource) support.
//!
//! A cell is an ordered list of OBJs, each cutting a rectangle out of an
//! NCGR and placing it relative to the cell origin.
//!
//! # Layout
//!
//! ```text
//! Header  "RECN" (1 or 3 chunks)
//! Chunk   "KBEC"
//!   0x00  u16   cell count
//!   0x02  u16   cell type (0: 8-byte records, 1: 16-byte records)
//!   0x04  u32   cell data offset, always 0x18
//!   0x08  u32   flags
//!   0x0C  u32   reserved x3
//!   0x18  ...   cell records {u16 obj count, u16 pad, u32 obj offset}
//!         ...   OBJs, 6 bytes each
//! ```
//!
//! Extended (type 1) records carry a bounding box after the common fields,
//! which is skipped.

mod obj;

use std::path::Path;
use std::sync::Arc;

use crate::render::{IndexedImage, Palette, Point, Rect, draw_under};

use super::NcgrFile;
use super::chunk::{ByteReader, Header, read_chunk};
use super::{NitroError, ResourceKind};

pub use obj::{Obj, SIZES};

/// On-disk header magic.
pub const MAGIC: [u8; 4] = *b"RECN";

/// On-disk cell bank chunk magic.
pub const CHUNK_MAGIC: [u8; 4] = *b"KBEC";

/// Offset of the cell records from the start of the chunk payload.
pub const CELL_OFFSET: u32 = 0x18;

/// A cell: a run of OBJs in the bank's OBJ table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRecord {
	/// Number of OBJs
	pub obj_count: u16,
	/// Byte offset of the first OBJ in the OBJ table
	pub obj_offset: u32,
}

/// NCER file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	header: Header,
	cell_type: u16,
	flags: u32,
	cells: Vec<CellRecord>,
	objs: Vec<Obj>,
}

impl File {
	/// Parses an NCER from bytes.
	pub fn from_bytes(data: &[u8]) -> Result<Self, NitroError> {
		let mut reader = ByteReader::new(data, ResourceKind::Ncer);
		let header = Header::read(&mut reader, MAGIC)?;
		if header.chunk_count != 1 && header.chunk_count != 3 {
			return Err(NitroError::invalid_layout(
				ResourceKind::Ncer,
				format!("unexpected chunk count {}", header.chunk_count),
			));
		}
		let mut chunk = read_chunk(&mut reader, CHUNK_MAGIC)?;
		let payload = &mut chunk.payload;

		let cell_count = payload.read_u16()?;
		let cell_type = payload.read_u16()?;
		let cell_offset = payload.read_u32()?;
		let flags = payload.read_u32()?;
		payload.skip(12)?;

		let record_size = match cell_type {
			0 => 8,
			1 => 16,
			other => {
				return Err(NitroError::invalid_layout(
					ResourceKind::Ncer,
					format!("unknown cell type {other}"),
				));
			}
		};
		if cell_offset != CELL_OFFSET {
			return Err(NitroError::invalid_layout(
				ResourceKind::Ncer,
				format!("cell data offset {cell_offset:#x}, expected {CELL_OFFSET:#x}"),
			));
		}

		let mut cells = Vec::with_capacity(usize::from(cell_count));
		for _ in 0..cell_count {
			let mut record = payload.sub_reader(record_size);
			let obj_count = record.read_u16()?;
			record.skip(2)?;
			let obj_offset = record.read_u32()?;
			if obj_offset as usize % Obj::SIZE != 0 {
				return Err(NitroError::malformed(
					ResourceKind::Ncer,
					format!("OBJ offset {obj_offset} is not a multiple of {}", Obj::SIZE),
				));
			}
			if record_size == 16 {
				record.skip(8)?;
			}
			cells.push(CellRecord {
				obj_count,
				obj_offset,
			});
		}

		// OBJ slices must stay inside the table read below.
		let obj_total: usize = cells.iter().map(|c| usize::from(c.obj_count)).sum();
		for (i, cell) in cells.iter().enumerate() {
			let end = cell.obj_offset as usize / Obj::SIZE + usize::from(cell.obj_count);
			if end > obj_total {
				return Err(NitroError::malformed(
					ResourceKind::Ncer,
					format!("cell {i} references OBJs up to {end}, table holds {obj_total}"),
				));
			}
		}

		let mut objs = Vec::with_capacity(obj_total);
		for _ in 0..obj_total {
			let attr0 = payload.read_u16()?;
			let attr1 = payload.read_u16()?;
			let attr2 = payload.read_u16()?;
			objs.push(Obj::new(attr0, attr1, attr2));
		}

		log::debug!("NCER: {} cells, {} OBJs, type {cell_type}", cells.len(), objs.len());
		Ok(Self {
			header,
			cell_type,
			flags,
			cells,
			objs,
		})
	}

	/// Parses an NCER from a reader.
	pub fn from_reader<R: std::io::Read>(reader: &mut R) -> Result<Self, NitroError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(&data)
	}

	/// Opens an NCER file from disk.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, NitroError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Common resource header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Cell record type code.
	pub fn cell_type(&self) -> u16 {
		self.cell_type
	}

	/// Bank flags.
	pub fn flags(&self) -> u32 {
		self.flags
	}

	/// Number of cells.
	pub fn len(&self) -> usize {
		self.cells.len()
	}

	/// Returns `true` when the bank holds no cells.
	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}

	/// OBJs of cell `i`, in drawing order.
	///
	/// # Panics
	///
	/// Panics if `i >= len()`.
	pub fn objs(&self, i: usize) -> &[Obj] {
		let cell = self.cells[i];
		let start = cell.obj_offset as usize / Obj::SIZE;
		&self.objs[start..start + usize::from(cell.obj_count)]
	}

	/// Union of the destination rectangles of cell `i`'s OBJs.
	///
	/// # Panics
	///
	/// Panics if `i >= len()`.
	pub fn cell_bounds(&self, i: usize) -> Rect {
		self.objs(i).iter().fold(Rect::ZERO, |r, obj| r.union(&obj.bounds()))
	}

	/// Composes cell `i` from `tiles`.
	///
	/// The canvas covers the union of all OBJ rectangles; gaps stay at
	/// index 0. Earlier OBJs stay on top of later ones.
	///
	/// # Panics
	///
	/// Panics if `i >= len()`.
	pub fn render_cell(&self, i: usize, tiles: &NcgrFile, palette: &Arc<Palette>) -> IndexedImage {
		let mut canvas = IndexedImage::new(self.cell_bounds(i), Arc::clone(palette));
		for obj in self.objs(i) {
			let Some((w, h)) = obj.dimensions() else {
				continue;
			};
			let view = tiles.tile_view(obj.tile(), w, h, palette);
			draw_under(&mut canvas, obj.footprint(), &view, Point::ZERO);
		}
		canvas
	}
}
