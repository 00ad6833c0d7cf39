//! LZ10 / LZ11 compressed streams.
//!
//! Archive entries may be stored compressed with one of two sibling
//! back-reference schemes. Both start with a magic byte (0x10 or 0x11) and a
//! 24-bit decompressed size, followed by flag bytes that interleave literal
//! bytes with big-endian back-reference tokens.
//!
//! # Example
//!
//! ```no_run
//! use nitro_types::file::lz;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let raw = std::fs::read("entry.bin")?;
//! let data = if lz::is_compressed(&raw) { lz::decompress(&raw)? } else { raw };
//! # Ok(())
//! # }
//! ```

mod decode;

use crate::file::NitroError;

/// Magic byte of the LZ10 variant.
pub const MAGIC_LZ10: u8 = 0x10;

/// Magic byte of the LZ11 variant.
pub const MAGIC_LZ11: u8 = 0x11;

/// Limits applied while decompressing.
///
/// The declared size is checked against `max_size` before any allocation, so
/// a corrupt size field cannot trigger a runaway allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzConfig {
	/// Largest decompressed size accepted, in bytes
	pub max_size: usize,
}

impl Default for LzConfig {
	fn default() -> Self {
		Self {
			max_size: 8 * 1024 * 1024,
		}
	}
}

impl LzConfig {
	/// Creates a configuration with a custom size ceiling.
	pub fn new(max_size: usize) -> Self {
		Self {
			max_size,
		}
	}

	/// Accepts anything the 24-bit size field can express.
	pub fn unlimited() -> Self {
		Self {
			max_size: 0xFF_FFFF,
		}
	}
}

fn declared_size(data: &[u8]) -> usize {
	usize::from(data[1]) | (usize::from(data[2]) << 8) | (usize::from(data[3]) << 16)
}

/// Reports whether `data` looks like an LZ stream.
///
/// A stream qualifies when it starts with a known magic and its declared
/// size is not smaller than the stored length; anything else is taken as
/// raw data.
pub fn is_compressed(data: &[u8]) -> bool {
	if data.len() < 4 {
		return false;
	}
	if data[0] != MAGIC_LZ10 && data[0] != MAGIC_LZ11 {
		return false;
	}
	declared_size(data) >= data.len()
}

/// Decompresses an LZ10 or LZ11 stream with the default limits.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, NitroError> {
	decode::decompress(data, &LzConfig::default())
}

/// Decompresses an LZ10 or LZ11 stream with custom limits.
pub fn decompress_with_config(data: &[u8], config: &LzConfig) -> Result<Vec<u8>, NitroError> {
	decode::decompress(data, config)
}
