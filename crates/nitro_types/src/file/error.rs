//! Error types for Nitro resource parsing and rendering.

use std::fmt;

use thiserror::Error;

/// Resource kinds, used to give parse errors some context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
	/// Nitro archive (`NARC`)
	Narc,
	/// LZ10/LZ11 compressed stream
	Lz,
	/// Character graphic resource (`NCGR`), the tile pixels
	Ncgr,
	/// Color resource (`NCLR`), the palette
	Nclr,
	/// Cell resource (`NCER`)
	Ncer,
	/// Animation resource (`NANR`)
	Nanr,
	/// Multi-cell resource (`NMCR`)
	Nmcr,
	/// Multi-cell animation resource (`NMAR`)
	Nmar,
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ResourceKind::Narc => "NARC",
			ResourceKind::Lz => "LZ",
			ResourceKind::Ncgr => "NCGR",
			ResourceKind::Nclr => "NCLR",
			ResourceKind::Ncer => "NCER",
			ResourceKind::Nanr => "NANR",
			ResourceKind::Nmcr => "NMCR",
			ResourceKind::Nmar => "NMAR",
		};
		f.write_str(name)
	}
}

/// Unified error type for every Nitro resource.
///
/// Parse errors are final for the resource being opened: malformed input is
/// deterministic, so callers should skip the entry rather than retry.
#[derive(Debug, Error)]
pub enum NitroError {
	/// Header or chunk magic mismatch
	#[error("{kind}: bad magic, expected {expected:02X?}, got {actual:02X?}")]
	BadMagic {
		/// Resource being parsed
		kind: ResourceKind,
		/// Magic bytes expected on disk
		expected: [u8; 4],
		/// Magic bytes actually found
		actual: [u8; 4],
	},

	/// Header size field does not match the only known revision
	#[error("{kind}: bad header size, expected {expected:#x}, got {actual:#x}")]
	BadHeaderSize {
		/// Resource being parsed
		kind: ResourceKind,
		/// Expected header size
		expected: u16,
		/// Header size found in the file
		actual: u16,
	},

	/// A fixed-offset field does not match the computed layout
	#[error("{kind}: invalid chunk layout: {message}")]
	InvalidChunkLayout {
		/// Resource being parsed
		kind: ResourceKind,
		/// Description of the mismatch
		message: String,
	},

	/// Structurally invalid data (bad back-reference, misaligned record, ...)
	#[error("{kind}: malformed data: {message}")]
	Malformed {
		/// Resource being parsed
		kind: ResourceKind,
		/// Description of the problem
		message: String,
	},

	/// Input ended in the middle of a record
	#[error("{kind}: unexpected end of data, needed {expected} bytes, {actual} available")]
	UnexpectedEof {
		/// Resource being parsed
		kind: ResourceKind,
		/// Number of bytes needed
		expected: usize,
		/// Number of bytes available
		actual: usize,
	},

	/// Declared size (decompressed bytes or image pixels) exceeds the
	/// configured ceiling
	#[error("declared size {size} exceeds limit of {limit}")]
	TooLarge {
		/// Declared size
		size: usize,
		/// Configured ceiling
		limit: usize,
	},

	/// Animated cell uses a play mode other than forward loop
	#[error("{kind}: unsupported play mode {mode}")]
	UnsupportedPlayMode {
		/// Resource being parsed
		kind: ResourceKind,
		/// Play mode code found in the cell record
		mode: u32,
	},

	/// Pixel format other than 4 or 8 bits per pixel
	#[error("NCGR: unsupported bit depth code {0}")]
	UnsupportedBitDepth(u32),

	/// Index outside of a resource table
	#[error("{kind}: index {index} out of range (count: {count})")]
	IndexOutOfRange {
		/// Resource being indexed
		kind: ResourceKind,
		/// Requested index
		index: usize,
		/// Number of entries available
		count: usize,
	},

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl NitroError {
	/// Creates an `UnexpectedEof` error.
	pub fn unexpected_eof(kind: ResourceKind, expected: usize, actual: usize) -> Self {
		Self::UnexpectedEof {
			kind,
			expected,
			actual,
		}
	}

	/// Creates a `BadMagic` error.
	pub fn bad_magic(kind: ResourceKind, expected: [u8; 4], actual: [u8; 4]) -> Self {
		Self::BadMagic {
			kind,
			expected,
			actual,
		}
	}

	/// Creates an `InvalidChunkLayout` error.
	pub fn invalid_layout(kind: ResourceKind, message: impl Into<String>) -> Self {
		Self::InvalidChunkLayout {
			kind,
			message: message.into(),
		}
	}

	/// Creates a `Malformed` error.
	pub fn malformed(kind: ResourceKind, message: impl Into<String>) -> Self {
		Self::Malformed {
			kind,
			message: message.into(),
		}
	}
}
