//! NANR (animation resource) support.
//!
//! An NANR sequences the cells of an NCER into animated cells (acells). The
//! bank itself is described in [`super::abnk`].

use std::path::Path;

use super::abnk::{Acell, read_bank};
use super::chunk::{ByteReader, Header};
use super::{NitroError, ResourceKind};

/// On-disk header magic.
pub const MAGIC: [u8; 4] = *b"RNAN";

/// NANR file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	header: Header,
	acells: Vec<Acell>,
}

impl File {
	/// Parses an NANR from bytes.
	pub fn from_bytes(data: &[u8]) -> Result<Self, NitroError> {
		let mut reader = ByteReader::new(data, ResourceKind::Nanr);
		let header = Header::read(&mut reader, MAGIC)?;
		if header.chunk_count != 1 && header.chunk_count != 3 {
			return Err(NitroError::invalid_layout(
				ResourceKind::Nanr,
				format!("unexpected chunk count {}", header.chunk_count),
			));
		}
		let acells = read_bank(&mut reader)?;

		log::debug!("NANR: {} acells", acells.len());
		Ok(Self {
			header,
			acells,
		})
	}

	/// Parses an NANR from a reader.
	pub fn from_reader<R: std::io::Read>(reader: &mut R) -> Result<Self, NitroError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(&data)
	}

	/// Opens an NANR file from disk.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, NitroError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Common resource header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Animated cells; frame indices refer to NCER cells.
	pub fn acells(&self) -> &[Acell] {
		&self.acells
	}

	/// Number of animated cells.
	pub fn len(&self) -> usize {
		self.acells.len()
	}

	/// Returns `true` when the bank holds no animated cells.
	pub fn is_empty(&self) -> bool {
		self.acells.is_empty()
	}
}
