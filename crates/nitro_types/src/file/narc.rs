//! NARC archive support.
//!
//! An archive is a flat table of byte ranges into one shared blob. Entries
//! may be stored LZ-compressed; [`File::open_entry`] undoes that
//! transparently.
//!
//! # Layout
//!
//! ```text
//! Header  "NARC"
//! Chunk   "BTAF"  u32 file count, then {u32 start, u32 end} per file
//! Chunk   "BTNF"  file name table (not used)
//! Chunk   "GMIF"  file data blob
//! ```
//!
//! # Example
//!
//! ```no_run
//! use nitro_types::file::NarcFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let narc = NarcFile::open("pokegra.narc")?;
//! let tiles = narc.open_as_tiles(0)?;
//! let palette = narc.open_as_palette(1)?;
//! println!("{} files, {}x{} pixels", narc.file_count(), tiles.bounds().width(), tiles.bounds().height());
//! # let _ = palette;
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::ops::Range;
use std::path::Path;

use super::chunk::{ByteReader, CHUNK_PREFIX_SIZE, Header, read_chunk};
use super::lz::{self, LzConfig};
use super::{NanrFile, NcerFile, NcgrFile, NclrFile, NitroError, NmarFile, NmcrFile, ResourceKind};

/// On-disk header magic.
pub const MAGIC: [u8; 4] = *b"NARC";

/// File allocation table chunk magic.
pub const FAT_MAGIC: [u8; 4] = *b"BTAF";

/// File name table chunk magic.
pub const FNT_MAGIC: [u8; 4] = *b"BTNF";

/// File image chunk magic.
pub const IMAGE_MAGIC: [u8; 4] = *b"GMIF";

/// Byte range of one entry inside the data blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry {
	/// First byte, relative to the blob
	pub start: u32,
	/// One past the last byte, relative to the blob
	pub end: u32,
}

impl Entry {
	/// Stored length; zero when `start > end`.
	pub fn len(&self) -> usize {
		self.end.saturating_sub(self.start) as usize
	}

	/// Returns `true` when the entry stores no bytes.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// NARC file.
///
/// Owns the archive bytes; entries are borrowed from it until they need
/// decompressing.
#[derive(Debug, Clone)]
pub struct File {
	header: Header,
	entries: Vec<Entry>,
	data: Vec<u8>,
	blob: Range<usize>,
	lz_config: LzConfig,
}

impl File {
	/// Parses an archive, taking ownership of its bytes.
	pub fn from_vec(data: Vec<u8>) -> Result<Self, NitroError> {
		let mut reader = ByteReader::new(&data, ResourceKind::Narc);
		let header = Header::read(&mut reader, MAGIC)?;

		let mut fat = read_chunk(&mut reader, FAT_MAGIC)?;
		let count = fat.payload.read_u32()? as usize;
		// Each entry needs 8 bytes, so a corrupt count cannot over-allocate.
		let mut entries = Vec::with_capacity(count.min(fat.payload.remaining() / 8));
		for _ in 0..count {
			entries.push(Entry {
				start: fat.payload.read_u32()?,
				end: fat.payload.read_u32()?,
			});
		}

		read_chunk(&mut reader, FNT_MAGIC)?;

		let image = read_chunk(&mut reader, IMAGE_MAGIC)?;
		let declared = image.size as usize - CHUNK_PREFIX_SIZE;
		let start = reader.position() - image.payload.remaining();
		if image.payload.remaining() < declared {
			return Err(NitroError::unexpected_eof(
				ResourceKind::Narc,
				declared,
				image.payload.remaining(),
			));
		}
		let blob = start..start + declared;

		log::debug!("NARC: {} entries, {} byte blob", entries.len(), blob.len());
		Ok(Self {
			header,
			entries,
			data,
			blob,
			lz_config: LzConfig::default(),
		})
	}

	/// Parses an archive from bytes.
	pub fn from_bytes(data: &[u8]) -> Result<Self, NitroError> {
		Self::from_vec(data.to_vec())
	}

	/// Parses an archive from a reader.
	pub fn from_reader<R: std::io::Read>(reader: &mut R) -> Result<Self, NitroError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_vec(data)
	}

	/// Opens an archive from disk.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, NitroError> {
		let data = std::fs::read(path)?;
		Self::from_vec(data)
	}

	/// Replaces the limits used when decompressing entries.
	pub fn with_lz_config(mut self, config: LzConfig) -> Self {
		self.lz_config = config;
		self
	}

	/// Common resource header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Number of entries.
	pub fn file_count(&self) -> usize {
		self.entries.len()
	}

	/// Entry table.
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Raw bytes of the shared data blob.
	pub fn blob(&self) -> &[u8] {
		&self.data[self.blob.clone()]
	}

	/// Stored bytes of entry `i`, without decompressing.
	pub fn open_raw(&self, i: usize) -> Result<&[u8], NitroError> {
		let entry = self.entries.get(i).ok_or(NitroError::IndexOutOfRange {
			kind: ResourceKind::Narc,
			index: i,
			count: self.entries.len(),
		})?;
		if entry.is_empty() {
			return Ok(&[]);
		}
		let blob = self.blob();
		let start = entry.start as usize;
		let end = entry.end as usize;
		blob.get(start..end)
			.ok_or_else(|| NitroError::unexpected_eof(ResourceKind::Narc, end, blob.len()))
	}

	/// Contents of entry `i`, decompressed when stored as LZ.
	pub fn open_entry(&self, i: usize) -> Result<Cow<'_, [u8]>, NitroError> {
		let raw = self.open_raw(i)?;
		if !lz::is_compressed(raw) {
			return Ok(Cow::Borrowed(raw));
		}
		log::trace!("NARC: entry {i} is LZ{:02x} compressed", raw[0]);
		Ok(Cow::Owned(lz::decompress_with_config(raw, &self.lz_config)?))
	}

	/// Opens entry `i` as an NCGR.
	pub fn open_as_tiles(&self, i: usize) -> Result<NcgrFile, NitroError> {
		NcgrFile::from_bytes(&self.open_entry(i)?)
	}

	/// Opens entry `i` as an NCLR.
	pub fn open_as_palette(&self, i: usize) -> Result<NclrFile, NitroError> {
		NclrFile::from_bytes(&self.open_entry(i)?)
	}

	/// Opens entry `i` as an NCER.
	pub fn open_as_cell_bank(&self, i: usize) -> Result<NcerFile, NitroError> {
		NcerFile::from_bytes(&self.open_entry(i)?)
	}

	/// Opens entry `i` as an NANR.
	pub fn open_as_animation_bank(&self, i: usize) -> Result<NanrFile, NitroError> {
		NanrFile::from_bytes(&self.open_entry(i)?)
	}

	/// Opens entry `i` as an NMCR.
	pub fn open_as_multicell_bank(&self, i: usize) -> Result<NmcrFile, NitroError> {
		NmcrFile::from_bytes(&self.open_entry(i)?)
	}

	/// Opens entry `i` as an NMAR.
	pub fn open_as_multicell_animation_bank(&self, i: usize) -> Result<NmarFile, NitroError> {
		NmarFile::from_bytes(&self.open_entry(i)?)
	}
}
