//! NMAR (multi-cell animation resource) support.
//!
//! Same bank layout as NANR, but frame indices refer to NMCR multi-cells.
//! Acell 0 drives a whole composed animation.

use std::path::Path;

use super::abnk::{Acell, read_bank};
use super::chunk::{ByteReader, Header};
use super::{NitroError, ResourceKind};

/// On-disk header magic.
pub const MAGIC: [u8; 4] = *b"RAMN";

/// NMAR file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	header: Header,
	acells: Vec<Acell>,
}

impl File {
	/// Parses an NMAR from bytes.
	pub fn from_bytes(data: &[u8]) -> Result<Self, NitroError> {
		let mut reader = ByteReader::new(data, ResourceKind::Nmar);
		let header = Header::read(&mut reader, MAGIC)?;
		let acells = read_bank(&mut reader)?;

		log::debug!("NMAR: {} acells", acells.len());
		Ok(Self {
			header,
			acells,
		})
	}

	/// Parses an NMAR from a reader.
	pub fn from_reader<R: std::io::Read>(reader: &mut R) -> Result<Self, NitroError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(&data)
	}

	/// Opens an NMAR file from disk.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, NitroError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Common resource header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Animated multi-cells; frame indices refer to NMCR multi-cells.
	pub fn acells(&self) -> &[Acell] {
		&self.acells
	}

	/// Number of animated multi-cells.
	pub fn len(&self) -> usize {
		self.acells.len()
	}

	/// Returns `true` when the bank holds no animations.
	pub fn is_empty(&self) -> bool {
		self.acells.is_empty()
	}
}
