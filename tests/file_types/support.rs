//! Byte builders for synthetic Nitro resources.

/// Appends little-endian fields to a buffer.
pub(crate) trait PutLe {
	fn put_u16(&mut self, v: u16);
	fn put_u32(&mut self, v: u32);
}

impl PutLe for Vec<u8> {
	fn put_u16(&mut self, v: u16) {
		self.extend_from_slice(&v.to_le_bytes());
	}

	fn put_u32(&mut self, v: u32) {
		self.extend_from_slice(&v.to_le_bytes());
	}
}

pub(crate) fn chunk(magic: &[u8; 4], payload: &[u8]) -> Vec<u8> {
	let mut out = Vec::new();
	out.extend_from_slice(magic);
	out.put_u32(payload.len() as u32 + 8);
	out.extend_from_slice(payload);
	out
}

pub(crate) fn resource(magic: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
	let body: usize = chunks.iter().map(Vec::len).sum();
	let mut out = Vec::new();
	out.extend_from_slice(magic);
	out.put_u16(0xFEFF);
	out.put_u16(0x0100);
	out.put_u32(16 + body as u32);
	out.put_u16(16);
	out.put_u16(chunks.len() as u16);
	for c in chunks {
		out.extend_from_slice(c);
	}
	out
}

/// 4bpp tiled NCGR of `width` x `height` tiles.
pub(crate) fn tiles(width: u16, height: u16, data: &[u8]) -> Vec<u8> {
	let mut p = Vec::new();
	p.put_u16(height);
	p.put_u16(width);
	p.put_u32(3);
	p.put_u32(0);
	p.put_u32(0);
	p.put_u32(data.len() as u32);
	p.put_u32(0x18);
	p.extend_from_slice(data);
	resource(b"RGCN", &[chunk(b"RAHC", &p)])
}

pub(crate) fn palette(colors: &[u16]) -> Vec<u8> {
	let mut p = Vec::new();
	p.put_u32(3);
	p.put_u32(0);
	p.put_u32(colors.len() as u32 * 2);
	p.put_u32(0x10);
	for &c in colors {
		p.put_u16(c);
	}
	resource(b"RLCN", &[chunk(b"TTLP", &p)])
}

/// NCER with one cell per entry; OBJs are raw attribute triples.
pub(crate) fn cells(cells: &[&[[u16; 3]]]) -> Vec<u8> {
	let mut p = Vec::new();
	p.put_u16(cells.len() as u16);
	p.put_u16(0);
	p.put_u32(0x18);
	p.put_u32(0);
	p.extend_from_slice(&[0; 12]);
	let mut first = 0;
	for objs in cells {
		p.put_u16(objs.len() as u16);
		p.put_u16(0);
		p.put_u32(first * 6);
		first += objs.len() as u32;
	}
	for attrs in cells.iter().flat_map(|c| c.iter()) {
		for &a in attrs {
			p.put_u16(a);
		}
	}
	resource(b"RECN", &[chunk(b"KBEC", &p)])
}

/// `KNBA` bank of type-0 acells, each a list of `(cell, duration)`.
pub(crate) fn bank(magic: &[u8; 4], acells: &[&[(u16, u16)]]) -> Vec<u8> {
	let frames: usize = acells.iter().map(|a| a.len()).sum();
	let frame_offset = 0x18 + 16 * acells.len();
	let mut p = Vec::new();
	p.put_u16(acells.len() as u16);
	p.put_u16(frames as u16);
	p.put_u32(0x18);
	p.put_u32(frame_offset as u32);
	p.put_u32((frame_offset + 8 * frames) as u32);
	p.extend_from_slice(&[0; 8]);
	let mut first = 0;
	for a in acells {
		p.put_u16(a.len() as u16);
		p.put_u16(0);
		p.put_u16(0);
		p.put_u16(1);
		p.put_u32(2);
		p.put_u32(first * 8);
		first += a.len() as u32;
	}
	for (i, &(_, duration)) in acells.iter().flat_map(|a| a.iter()).enumerate() {
		p.put_u32(i as u32 * 2);
		p.put_u16(duration);
		p.put_u16(0);
	}
	for &(cell, _) in acells.iter().flat_map(|a| a.iter()) {
		p.put_u16(cell);
	}
	resource(magic, &[chunk(b"KNBA", &p)])
}

/// NMCR with one multi-cell of `(acell, x, y)` objects.
pub(crate) fn multi_cell(objs: &[(u16, i16, i16)]) -> Vec<u8> {
	let mut p = Vec::new();
	p.put_u16(1);
	p.put_u16(0);
	p.put_u32(0x14);
	p.put_u32(0x1C);
	p.extend_from_slice(&[0; 8]);
	p.put_u16(objs.len() as u16);
	p.put_u16(objs.len() as u16);
	p.put_u32(0);
	for &(acell, x, y) in objs {
		p.put_u16(acell);
		p.put_u16(x as u16);
		p.put_u16(y as u16);
		p.put_u16(0);
	}
	resource(b"RCMN", &[chunk(b"KBCM", &p)])
}

pub(crate) fn archive(entries: &[&[u8]]) -> Vec<u8> {
	let mut fat = Vec::new();
	fat.put_u32(entries.len() as u32);
	let mut blob = Vec::new();
	for e in entries {
		fat.put_u32(blob.len() as u32);
		blob.extend_from_slice(e);
		fat.put_u32(blob.len() as u32);
		// entries are word aligned
		while blob.len() % 4 != 0 {
			blob.push(0xFF);
		}
	}
	let mut fnt = Vec::new();
	fnt.put_u32(8);
	fnt.put_u32(0x0001_0000);
	resource(b"NARC", &[chunk(b"BTAF", &fat), chunk(b"BTNF", &fnt), chunk(b"GMIF", &blob)])
}

/// LZ10 stream with greedy short-distance back-references.
pub(crate) fn lz10(data: &[u8]) -> Vec<u8> {
	let mut out = vec![0x10, data.len() as u8, (data.len() >> 8) as u8, (data.len() >> 16) as u8];
	let mut pos = 0;
	while pos < data.len() {
		let flags = out.len();
		out.push(0);
		for bit in (0..8).rev() {
			if pos >= data.len() {
				break;
			}
			let (len, distance) = (1..=16.min(pos))
				.map(|d| {
					let len = (0..18).take_while(|&k| pos + k < data.len() && data[pos + k] == data[pos + k - d]).count();
					(len, d)
				})
				.max_by_key(|&(len, d)| (len, usize::MAX - d))
				.unwrap_or((0, 0));
			if len >= 3 {
				out[flags] |= 1 << bit;
				out.push((((len - 3) << 4) | ((distance - 1) >> 8)) as u8);
				out.push((distance - 1) as u8);
				pos += len;
			} else {
				out.push(data[pos]);
				pos += 1;
			}
		}
	}
	out
}
