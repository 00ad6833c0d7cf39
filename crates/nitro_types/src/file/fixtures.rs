//! Builders for synthetic resources used across the unit tests.

use super::abnk::{self, ACELL_OFFSET, ACELL_RECORD_SIZE, FRAME_RECORD_SIZE};
use super::chunk::test_support::{chunk, resource};
use super::ncer::Obj;
use super::nmcr::Mobj;

/// Builds an NCLR holding `colors`.
pub fn nclr(colors: &[u16]) -> Vec<u8> {
	let mut payload = Vec::new();
	payload.extend_from_slice(&3u32.to_le_bytes());
	payload.extend_from_slice(&0u32.to_le_bytes());
	payload.extend_from_slice(&((colors.len() * 2) as u32).to_le_bytes());
	payload.extend_from_slice(&0x10u32.to_le_bytes());
	for c in colors {
		payload.extend_from_slice(&c.to_le_bytes());
	}
	resource(b"RLCN", &[chunk(b"TTLP", &payload)])
}

/// Builds an NCGR; `depth` is the on-disk code (3 = 4bpp, 4 = 8bpp).
pub fn ncgr(height: u16, width: u16, depth: u32, tiled: bool, data: &[u8]) -> Vec<u8> {
	let mut payload = Vec::new();
	payload.extend_from_slice(&height.to_le_bytes());
	payload.extend_from_slice(&width.to_le_bytes());
	payload.extend_from_slice(&depth.to_le_bytes());
	payload.extend_from_slice(&0u32.to_le_bytes());
	payload.extend_from_slice(&u32::from(!tiled).to_le_bytes());
	payload.extend_from_slice(&(data.len() as u32).to_le_bytes());
	payload.extend_from_slice(&0x18u32.to_le_bytes());
	payload.extend_from_slice(data);
	resource(b"RGCN", &[chunk(b"RAHC", &payload)])
}

/// Builds an NCER; `cell_type` 1 uses 16-byte cell records.
pub fn ncer(cell_type: u16, cells: &[&[Obj]]) -> Vec<u8> {
	let mut payload = Vec::new();
	payload.extend_from_slice(&(cells.len() as u16).to_le_bytes());
	payload.extend_from_slice(&cell_type.to_le_bytes());
	payload.extend_from_slice(&0x18u32.to_le_bytes());
	payload.extend_from_slice(&0u32.to_le_bytes());
	payload.extend_from_slice(&[0; 12]);
	let mut offset = 0usize;
	for objs in cells {
		payload.extend_from_slice(&(objs.len() as u16).to_le_bytes());
		payload.extend_from_slice(&0u16.to_le_bytes());
		payload.extend_from_slice(&((offset * Obj::SIZE) as u32).to_le_bytes());
		if cell_type == 1 {
			payload.extend_from_slice(&[0; 8]);
		}
		offset += objs.len();
	}
	for obj in cells.iter().flat_map(|objs| objs.iter()) {
		for attr in obj.attrs {
			payload.extend_from_slice(&attr.to_le_bytes());
		}
	}
	resource(b"RECN", &[chunk(b"KBEC", &payload)])
}

/// Description of one acell for [`abnk_chunk`].
#[derive(Debug, Clone)]
pub struct AcellDef {
	pub loop_start: u16,
	pub frame_type: u16,
	pub play_mode: u32,
	/// `(duration, frame data)` per frame
	pub frames: Vec<(u16, Vec<u8>)>,
}

impl AcellDef {
	fn new(frame_type: u16, loop_start: u16, frames: Vec<(u16, Vec<u8>)>) -> Self {
		Self {
			loop_start,
			frame_type,
			play_mode: abnk::play_mode::FORWARD_LOOP,
			frames,
		}
	}

	/// Frames of `(index, duration)`.
	pub fn type0(frames: &[(u16, u16)], loop_start: u16) -> Self {
		let frames = frames.iter().map(|&(index, duration)| (duration, index.to_le_bytes().to_vec())).collect();
		Self::new(0, loop_start, frames)
	}

	/// Frames of `(index, duration, rotation, scale_x, scale_y, x, y)`.
	pub fn type1(frames: &[(u16, u16, u16, i32, i32, i16, i16)], loop_start: u16) -> Self {
		let frames = frames
			.iter()
			.map(|&(index, duration, rotation, sx, sy, x, y)| {
				let mut data = Vec::with_capacity(16);
				data.extend_from_slice(&index.to_le_bytes());
				data.extend_from_slice(&rotation.to_le_bytes());
				data.extend_from_slice(&sx.to_le_bytes());
				data.extend_from_slice(&sy.to_le_bytes());
				data.extend_from_slice(&x.to_le_bytes());
				data.extend_from_slice(&y.to_le_bytes());
				(duration, data)
			})
			.collect();
		Self::new(1, loop_start, frames)
	}

	/// Frames of `(index, duration, x, y)`.
	pub fn type2(frames: &[(u16, u16, i16, i16)], loop_start: u16) -> Self {
		let frames = frames
			.iter()
			.map(|&(index, duration, x, y)| {
				let mut data = Vec::with_capacity(8);
				data.extend_from_slice(&index.to_le_bytes());
				data.extend_from_slice(&0u16.to_le_bytes());
				data.extend_from_slice(&x.to_le_bytes());
				data.extend_from_slice(&y.to_le_bytes());
				(duration, data)
			})
			.collect();
		Self::new(2, loop_start, frames)
	}
}

/// Builds a `KNBA` chunk, prefix included.
pub fn abnk_chunk(acells: &[AcellDef]) -> Vec<u8> {
	let frame_count: usize = acells.iter().map(|a| a.frames.len()).sum();
	let frame_offset = ACELL_OFFSET as usize + ACELL_RECORD_SIZE * acells.len();
	let data_offset = frame_offset + FRAME_RECORD_SIZE * frame_count;

	let mut payload = Vec::new();
	payload.extend_from_slice(&(acells.len() as u16).to_le_bytes());
	payload.extend_from_slice(&(frame_count as u16).to_le_bytes());
	payload.extend_from_slice(&ACELL_OFFSET.to_le_bytes());
	payload.extend_from_slice(&(frame_offset as u32).to_le_bytes());
	payload.extend_from_slice(&(data_offset as u32).to_le_bytes());
	payload.extend_from_slice(&[0; 8]);

	let mut first_frame = 0usize;
	for acell in acells {
		payload.extend_from_slice(&(acell.frames.len() as u16).to_le_bytes());
		payload.extend_from_slice(&acell.loop_start.to_le_bytes());
		payload.extend_from_slice(&acell.frame_type.to_le_bytes());
		payload.extend_from_slice(&1u16.to_le_bytes());
		payload.extend_from_slice(&acell.play_mode.to_le_bytes());
		payload.extend_from_slice(&((first_frame * FRAME_RECORD_SIZE) as u32).to_le_bytes());
		first_frame += acell.frames.len();
	}

	let mut data = Vec::new();
	for (duration, frame) in acells.iter().flat_map(|a| a.frames.iter()) {
		payload.extend_from_slice(&(data.len() as u32).to_le_bytes());
		payload.extend_from_slice(&duration.to_le_bytes());
		payload.extend_from_slice(&0xBEEFu16.to_le_bytes());
		data.extend_from_slice(frame);
	}
	payload.extend_from_slice(&data);
	chunk(b"KNBA", &payload)
}

/// Builds an NANR with one `KNBA` chunk.
pub fn nanr(acells: &[AcellDef]) -> Vec<u8> {
	resource(b"RNAN", &[abnk_chunk(acells)])
}

/// Builds an NMAR with one `KNBA` chunk.
pub fn nmar(acells: &[AcellDef]) -> Vec<u8> {
	resource(b"RAMN", &[abnk_chunk(acells)])
}

/// Builds an NMCR; each multi-cell declares as many acells as it has objects.
pub fn nmcr(mcells: &[&[Mobj]]) -> Vec<u8> {
	let mut payload = Vec::new();
	payload.extend_from_slice(&(mcells.len() as u16).to_le_bytes());
	payload.extend_from_slice(&0u16.to_le_bytes());
	payload.extend_from_slice(&0x14u32.to_le_bytes());
	payload.extend_from_slice(&((0x14 + 8 * mcells.len()) as u32).to_le_bytes());
	payload.extend_from_slice(&[0; 8]);
	let mut offset = 0usize;
	for mobjs in mcells {
		payload.extend_from_slice(&(mobjs.len() as u16).to_le_bytes());
		payload.extend_from_slice(&(mobjs.len() as u16).to_le_bytes());
		payload.extend_from_slice(&((offset * Mobj::SIZE) as u32).to_le_bytes());
		offset += mobjs.len();
	}
	for mobj in mcells.iter().flat_map(|m| m.iter()) {
		payload.extend_from_slice(&mobj.acell_index.to_le_bytes());
		payload.extend_from_slice(&mobj.x.to_le_bytes());
		payload.extend_from_slice(&mobj.y.to_le_bytes());
		payload.extend_from_slice(&mobj.flags.to_le_bytes());
	}
	resource(b"RCMN", &[chunk(b"KBCM", &payload)])
}

/// Builds a NARC storing `entries` back to back.
pub fn narc(entries: &[&[u8]]) -> Vec<u8> {
	let mut fat = Vec::new();
	fat.extend_from_slice(&(entries.len() as u32).to_le_bytes());
	let mut blob = Vec::new();
	for entry in entries {
		fat.extend_from_slice(&(blob.len() as u32).to_le_bytes());
		blob.extend_from_slice(entry);
		fat.extend_from_slice(&(blob.len() as u32).to_le_bytes());
	}
	// root directory entry of an empty name table
	let fnt = [8u32.to_le_bytes(), 0x0001_0000u32.to_le_bytes()].concat();
	resource(b"NARC", &[chunk(b"BTAF", &fat), chunk(b"BTNF", &fnt), chunk(b"GMIF", &blob)])
}
