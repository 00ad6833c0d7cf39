//! Common header and chunk framing shared by every Nitro resource.
//!
//! # Layout
//!
//! ```text
//! Offset  Size  Field         Description
//! ------  ----  ------------  ------------------------------------------
//! 0x00    4     magic         Resource magic, stored reversed ("RGCN" for NCGR)
//! 0x04    2     bom           Byte order mark (0xFEFF)
//! 0x06    2     version       Format version
//! 0x08    4     size          Total file size
//! 0x0C    2     header_size   Always 0x10
//! 0x0E    2     chunk_count   Number of chunks following the header
//! ```
//!
//! Each chunk is a 4-byte magic, a u32 size that includes those 8 bytes, and
//! `size - 8` bytes of payload. All integers are little-endian.

use super::{NitroError, ResourceKind};

/// Size of the common resource header.
pub const HEADER_SIZE: u16 = 0x10;

/// Size of a chunk's magic + size prefix.
pub const CHUNK_PREFIX_SIZE: usize = 8;

/// Bounded little-endian cursor over a byte slice.
///
/// Reads past the end of the slice fail with [`NitroError::UnexpectedEof`]
/// instead of touching neighbouring data.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
	data: &'a [u8],
	pos: usize,
	kind: ResourceKind,
}

impl<'a> ByteReader<'a> {
	/// Creates a reader over `data`, tagging errors with `kind`.
	pub fn new(data: &'a [u8], kind: ResourceKind) -> Self {
		Self {
			data,
			pos: 0,
			kind,
		}
	}

	/// Resource kind this reader reports errors for.
	pub fn kind(&self) -> ResourceKind {
		self.kind
	}

	/// Current offset from the start of the reader.
	pub fn position(&self) -> usize {
		self.pos
	}

	/// Number of bytes left.
	pub fn remaining(&self) -> usize {
		self.data.len() - self.pos
	}

	/// Reads `n` bytes.
	pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], NitroError> {
		if n > self.remaining() {
			return Err(NitroError::unexpected_eof(self.kind, n, self.remaining()));
		}
		let bytes = &self.data[self.pos..self.pos + n];
		self.pos += n;
		Ok(bytes)
	}

	/// Reads everything that is left.
	pub fn read_rest(&mut self) -> &'a [u8] {
		let bytes = &self.data[self.pos..];
		self.pos = self.data.len();
		bytes
	}

	/// Skips `n` bytes.
	pub fn skip(&mut self, n: usize) -> Result<(), NitroError> {
		self.read_bytes(n).map(|_| ())
	}

	/// Reads a fixed-size array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], NitroError> {
		let mut out = [0u8; N];
		out.copy_from_slice(self.read_bytes(N)?);
		Ok(out)
	}

	/// Reads a u8.
	pub fn read_u8(&mut self) -> Result<u8, NitroError> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Reads a little-endian u16.
	pub fn read_u16(&mut self) -> Result<u16, NitroError> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Reads a little-endian i16.
	pub fn read_i16(&mut self) -> Result<i16, NitroError> {
		Ok(i16::from_le_bytes(self.read_array()?))
	}

	/// Reads a little-endian u32.
	pub fn read_u32(&mut self) -> Result<u32, NitroError> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Reads a little-endian i32.
	pub fn read_i32(&mut self) -> Result<i32, NitroError> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Splits off a reader over the next `len` bytes and advances past them.
	///
	/// If fewer than `len` bytes remain, the sub-reader covers what is left;
	/// reads past that fail as usual.
	pub fn sub_reader(&mut self, len: usize) -> ByteReader<'a> {
		let len = len.min(self.remaining());
		let sub = ByteReader {
			data: &self.data[self.pos..self.pos + len],
			pos: 0,
			kind: self.kind,
		};
		self.pos += len;
		sub
	}
}

/// Common resource header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
	/// Magic bytes, in on-disk order
	pub magic: [u8; 4],
	/// Byte order mark
	pub bom: u16,
	/// Format version
	pub version: u16,
	/// Total file size
	pub size: u32,
	/// Header size, always [`HEADER_SIZE`]
	pub header_size: u16,
	/// Number of chunks after the header
	pub chunk_count: u16,
}

impl Header {
	/// Reads a header and checks its magic and size.
	pub fn read(reader: &mut ByteReader<'_>, expected_magic: [u8; 4]) -> Result<Self, NitroError> {
		let magic = reader.read_array::<4>()?;
		if magic != expected_magic {
			return Err(NitroError::bad_magic(reader.kind(), expected_magic, magic));
		}
		let bom = reader.read_u16()?;
		let version = reader.read_u16()?;
		let size = reader.read_u32()?;
		let header_size = reader.read_u16()?;
		if header_size != HEADER_SIZE {
			return Err(NitroError::BadHeaderSize {
				kind: reader.kind(),
				expected: HEADER_SIZE,
				actual: header_size,
			});
		}
		let chunk_count = reader.read_u16()?;

		Ok(Self {
			magic,
			bom,
			version,
			size,
			header_size,
			chunk_count,
		})
	}
}

/// A chunk inside a resource, with a reader bounded to its payload.
#[derive(Debug, Clone)]
pub struct Chunk<'a> {
	/// Magic bytes, in on-disk order
	pub magic: [u8; 4],
	/// Declared size, including the 8-byte prefix
	pub size: u32,
	/// Reader over the `size - 8` payload bytes
	pub payload: ByteReader<'a>,
}

/// Reads the next chunk, checking its magic.
pub fn read_chunk<'a>(
	reader: &mut ByteReader<'a>,
	expected_magic: [u8; 4],
) -> Result<Chunk<'a>, NitroError> {
	let magic = reader.read_array::<4>()?;
	if magic != expected_magic {
		return Err(NitroError::bad_magic(reader.kind(), expected_magic, magic));
	}
	let size = reader.read_u32()?;
	if (size as usize) < CHUNK_PREFIX_SIZE {
		return Err(NitroError::invalid_layout(
			reader.kind(),
			format!("chunk size {size} smaller than its own prefix"),
		));
	}
	let payload = reader.sub_reader(size as usize - CHUNK_PREFIX_SIZE);

	Ok(Chunk {
		magic,
		size,
		payload,
	})
}
