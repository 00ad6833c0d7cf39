//! Animation bank (`KNBA` chunk) shared by NANR and NMAR.
//!
//! # Layout
//!
//! ```text
//! Chunk   "KNBA"
//!   0x00  u16   acell count
//!   0x02  u16   frame count
//!   0x04  u32   acell offset, always 0x18
//!   0x08  u32   frame offset, 0x18 + 16 * acells
//!   0x0C  u32   frame data offset, frame offset + 8 * frames
//!   0x10  u32   reserved x2
//!   0x18  ...   acell records (16 bytes)
//!         ...   frame records (8 bytes)
//!         ...   frame data (variable)
//! ```
//!
//! Acell record: frame count u16, loop start u16, frame type u16, cell type
//! u16, play mode u32, frame offset u32 (bytes into the frame table).
//!
//! Frame record: data offset u32 (bytes into the frame data), duration u16
//! (in 1/60 s ticks), padding u16.
//!
//! Frame data comes in three shapes, selected per acell by its frame type:
//!
//! | Type | Fields                                                   |
//! |------|----------------------------------------------------------|
//! | 0    | index u16                                                |
//! | 1    | index u16, rotation u16, scale x i32, scale y i32, x i16, y i16 |
//! | 2    | index u16, pad u16, x i16, y i16                         |

use super::chunk::{ByteReader, read_chunk};
use super::{NitroError, ResourceKind};

/// On-disk animation bank chunk magic.
pub const CHUNK_MAGIC: [u8; 4] = *b"KNBA";

/// Offset of the acell records from the start of the chunk payload.
pub const ACELL_OFFSET: u32 = 0x18;

/// Size of an acell record.
pub const ACELL_RECORD_SIZE: usize = 16;

/// Size of a frame record.
pub const FRAME_RECORD_SIZE: usize = 8;

/// Scale value meaning 1.0.
pub const SCALE_ONE: i32 = 4096;

/// Full turn in rotation units.
pub const ROTATION_FULL_TURN: u32 = 65536;

/// Upper bound on full passes over the loop region in [`Acell::frame_at`].
pub const MAX_LOOP_WRAPS: u32 = 100;

/// Play mode codes.
pub mod play_mode {
	/// Play once, front to back
	pub const FORWARD: u32 = 1;
	/// Loop front to back
	pub const FORWARD_LOOP: u32 = 2;
	/// Play forward then backward once
	pub const REVERSE: u32 = 3;
	/// Ping-pong loop
	pub const REVERSE_LOOP: u32 = 4;
}

/// One frame of an animated cell, normalized across frame types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
	/// Display time in 1/60 s ticks
	pub duration: u32,
	/// Index of the cell (NANR) or multi-cell (NMAR) shown
	pub index: u16,
	/// Clockwise rotation, 65536 units per turn
	pub rotation: u16,
	/// Horizontal scale, 4096 = 1.0
	pub scale_x: i32,
	/// Vertical scale, 4096 = 1.0
	pub scale_y: i32,
	/// Horizontal offset in pixels
	pub x: i32,
	/// Vertical offset in pixels
	pub y: i32,
}

impl Default for Frame {
	fn default() -> Self {
		Self {
			duration: 0,
			index: 0,
			rotation: 0,
			scale_x: SCALE_ONE,
			scale_y: SCALE_ONE,
			x: 0,
			y: 0,
		}
	}
}

impl Frame {
	/// Parses frame data of the given type. The duration is left at zero.
	pub fn parse(frame_type: u16, data: &[u8]) -> Result<Self, NitroError> {
		let mut reader = ByteReader::new(data, ResourceKind::Nanr);
		let mut frame = Frame {
			index: reader.read_u16()?,
			..Frame::default()
		};
		match frame_type {
			0 => {}
			1 => {
				frame.rotation = reader.read_u16()?;
				frame.scale_x = reader.read_i32()?;
				frame.scale_y = reader.read_i32()?;
				frame.x = i32::from(reader.read_i16()?);
				frame.y = i32::from(reader.read_i16()?);
			}
			2 => {
				reader.skip(2)?;
				frame.x = i32::from(reader.read_i16()?);
				frame.y = i32::from(reader.read_i16()?);
			}
			other => {
				return Err(NitroError::invalid_layout(
					ResourceKind::Nanr,
					format!("unknown frame type {other}"),
				));
			}
		}
		Ok(frame)
	}

	/// Rotation in turns (1.0 is a full clockwise turn).
	pub fn turns(&self) -> f64 {
		f64::from(self.rotation) / f64::from(ROTATION_FULL_TURN)
	}

	/// Scale factors as floating point.
	pub fn scale(&self) -> (f64, f64) {
		let one = f64::from(SCALE_ONE);
		(f64::from(self.scale_x) / one, f64::from(self.scale_y) / one)
	}
}

/// An animated cell: frames played in order, looping back to `loop_start`.
///
/// Every acell held by a parsed bank has at least one frame, a loop start
/// inside the frame list and a loop region with a positive total duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acell {
	/// Index of the first frame of the loop region
	pub loop_start: usize,
	/// Play mode code, see [`play_mode`]
	pub play_mode: u32,
	/// Frame type code the frames were parsed from
	pub frame_type: u16,
	/// Frames in play order
	pub frames: Vec<Frame>,
}

impl Acell {
	/// Sum of all frame durations.
	pub fn total_duration(&self) -> u32 {
		self.frames.iter().map(|f| f.duration).sum()
	}

	/// Sum of the loop region's frame durations.
	pub fn loop_duration(&self) -> u32 {
		self.frames.get(self.loop_start..).map_or(0, |frames| frames.iter().map(|f| f.duration).sum())
	}

	/// Returns the frame showing at tick `t` and the ticks already spent in
	/// it.
	///
	/// Times past the end wrap into the loop region.
	pub fn frame_at(&self, t: u32) -> Result<(Frame, u32), NitroError> {
		let mut t = t;
		for frame in &self.frames {
			if t < frame.duration {
				return Ok((*frame, t));
			}
			t -= frame.duration;
		}

		let loop_frames = self.frames.get(self.loop_start..).unwrap_or_default();
		let total = self.loop_duration();
		if total == 0 {
			return Err(NitroError::malformed(ResourceKind::Nanr, "loop region has no duration"));
		}
		t %= total;
		for _ in 0..MAX_LOOP_WRAPS {
			for frame in loop_frames {
				if t < frame.duration {
					return Ok((*frame, t));
				}
				t -= frame.duration;
			}
		}
		Err(NitroError::malformed(ResourceKind::Nanr, "frame lookup did not converge"))
	}

	fn validate(&self, kind: ResourceKind, index: usize) -> Result<(), NitroError> {
		if self.play_mode != play_mode::FORWARD_LOOP {
			return Err(NitroError::UnsupportedPlayMode {
				kind,
				mode: self.play_mode,
			});
		}
		if self.frames.is_empty() {
			return Err(NitroError::malformed(kind, format!("acell {index} has no frames")));
		}
		if self.loop_start >= self.frames.len() {
			return Err(NitroError::malformed(
				kind,
				format!("acell {index} loops from frame {} of {}", self.loop_start, self.frames.len()),
			));
		}
		if self.loop_duration() == 0 {
			return Err(NitroError::malformed(kind, format!("acell {index} loop region has no duration")));
		}
		Ok(())
	}
}

/// Reads a `KNBA` chunk and returns its acells.
pub fn read_bank(reader: &mut ByteReader<'_>) -> Result<Vec<Acell>, NitroError> {
	let kind = reader.kind();
	let mut chunk = read_chunk(reader, CHUNK_MAGIC)?;
	let payload = &mut chunk.payload;

	let acell_count = usize::from(payload.read_u16()?);
	let frame_count = usize::from(payload.read_u16()?);
	let acell_offset = payload.read_u32()? as usize;
	let frame_offset = payload.read_u32()? as usize;
	let frame_data_offset = payload.read_u32()? as usize;
	payload.skip(8)?;

	let expected_frames = ACELL_OFFSET as usize + ACELL_RECORD_SIZE * acell_count;
	let expected_data = expected_frames + FRAME_RECORD_SIZE * frame_count;
	if acell_offset != ACELL_OFFSET as usize
		|| frame_offset != expected_frames
		|| frame_data_offset != expected_data
	{
		return Err(NitroError::invalid_layout(
			kind,
			format!(
				"offsets {acell_offset:#x}/{frame_offset:#x}/{frame_data_offset:#x}, expected {ACELL_OFFSET:#x}/{expected_frames:#x}/{expected_data:#x}"
			),
		));
	}

	struct AcellRecord {
		frame_count: usize,
		loop_start: usize,
		frame_type: u16,
		play_mode: u32,
		frame_offset: usize,
	}

	let mut records = Vec::with_capacity(acell_count);
	for _ in 0..acell_count {
		let frame_count = usize::from(payload.read_u16()?);
		let loop_start = usize::from(payload.read_u16()?);
		let frame_type = payload.read_u16()?;
		let _cell_type = payload.read_u16()?;
		let play_mode = payload.read_u32()?;
		let frame_offset = payload.read_u32()? as usize;
		if frame_offset % FRAME_RECORD_SIZE != 0 {
			return Err(NitroError::malformed(
				kind,
				format!("frame offset {frame_offset} is not a multiple of {FRAME_RECORD_SIZE}"),
			));
		}
		records.push(AcellRecord {
			frame_count,
			loop_start,
			frame_type,
			play_mode,
			frame_offset,
		});
	}

	let mut frame_records = Vec::with_capacity(frame_count);
	for _ in 0..frame_count {
		let data_offset = payload.read_u32()? as usize;
		let duration = payload.read_u16()?;
		payload.skip(2)?;
		frame_records.push((data_offset, duration));
	}
	let frame_data = payload.read_rest();

	let mut acells = Vec::with_capacity(acell_count);
	for (i, record) in records.iter().enumerate() {
		let start = record.frame_offset / FRAME_RECORD_SIZE;
		let Some(slice) = frame_records.get(start..start + record.frame_count) else {
			return Err(NitroError::malformed(
				kind,
				format!("acell {i} frames {start}..{} exceed {frame_count}", start + record.frame_count),
			));
		};
		let mut frames = Vec::with_capacity(slice.len());
		for &(data_offset, duration) in slice {
			let data = frame_data.get(data_offset..).ok_or_else(|| {
				NitroError::unexpected_eof(kind, data_offset, frame_data.len())
			})?;
			let frame = Frame::parse(record.frame_type, data).map_err(|err| with_kind(err, kind))?;
			frames.push(Frame {
				duration: u32::from(duration),
				..frame
			});
		}
		let acell = Acell {
			loop_start: record.loop_start,
			play_mode: record.play_mode,
			frame_type: record.frame_type,
			frames,
		};
		acell.validate(kind, i)?;
		acells.push(acell);
	}

	Ok(acells)
}

/// Re-tags a frame parse error with the resource actually being read.
fn with_kind(err: NitroError, kind: ResourceKind) -> NitroError {
	match err {
		NitroError::UnexpectedEof {
			expected,
			actual,
			..
		} => NitroError::unexpected_eof(kind, expected, actual),
		NitroError::InvalidChunkLayout {
			message,
			..
		} => NitroError::invalid_layout(kind, message),
		other => other,
	}
}
