//! Hardware sprite attributes (OBJ).
//!
//! Each OBJ is three u16 attribute words:
//!
//! ```text
//! attr0  bits 0-7   Y (signed)
//!        bits 8-9   transform mode (3 = affine, double size)
//!        bits 14-15 shape (square, wide, tall)
//! attr1  bits 0-8   X (signed)
//!        bit  12/13 horizontal / vertical flip, when not affine
//!        bits 14-15 size
//! attr2  bits 0-9   tile index
//!        bits 10-11 priority
//!        bits 12-15 palette bank
//! ```

use std::fmt;

use crate::render::Rect;

/// Destination `(width, height)` by shape, then size.
pub const SIZES: [[(i32, i32); 4]; 3] = [
	[(8, 8), (16, 16), (32, 32), (64, 64)],
	[(16, 8), (32, 8), (32, 16), (64, 32)],
	[(8, 16), (8, 32), (16, 32), (32, 64)],
];

/// Shape code with no valid size.
pub const SHAPE_INVALID: u16 = 3;

/// One sprite placement inside a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Obj {
	/// The three attribute words, as stored
	pub attrs: [u16; 3],
}

impl Obj {
	/// Size of one record on disk.
	pub const SIZE: usize = 6;

	/// Creates an OBJ from its attribute words.
	pub const fn new(attr0: u16, attr1: u16, attr2: u16) -> Self {
		Self {
			attrs: [attr0, attr1, attr2],
		}
	}

	/// Signed Y origin.
	pub fn y(&self) -> i32 {
		i32::from(self.attrs[0] as u8 as i8)
	}

	/// Signed X origin, 9 bits.
	pub fn x(&self) -> i32 {
		i32::from(((self.attrs[1] << 7) as i16) >> 7)
	}

	/// Shape code.
	pub fn shape(&self) -> u16 {
		self.attrs[0] >> 14
	}

	/// Size code.
	pub fn size(&self) -> u16 {
		self.attrs[1] >> 14
	}

	/// Transform mode: 0 normal, 1 affine, 2 disabled, 3 affine double size.
	pub fn transform_mode(&self) -> u16 {
		(self.attrs[0] >> 8) & 3
	}

	/// Returns `true` when the destination rectangle is doubled.
	pub fn is_double_size(&self) -> bool {
		self.transform_mode() == 3
	}

	/// Horizontal flip flag.
	pub fn flip_x(&self) -> bool {
		(self.attrs[0] >> 8) & 1 == 0 && (self.attrs[1] >> 12) & 1 == 1
	}

	/// Vertical flip flag.
	pub fn flip_y(&self) -> bool {
		(self.attrs[0] >> 8) & 1 == 0 && (self.attrs[1] >> 13) & 1 == 1
	}

	/// First tile index.
	pub fn tile(&self) -> usize {
		usize::from(self.attrs[2] & 0x3FF)
	}

	/// Render priority.
	pub fn priority(&self) -> u8 {
		((self.attrs[2] >> 10) & 3) as u8
	}

	/// Palette bank.
	pub fn palette_bank(&self) -> u8 {
		(self.attrs[2] >> 12) as u8
	}

	/// Pixel `(width, height)` of the sprite itself, or `None` for the
	/// invalid shape.
	pub fn dimensions(&self) -> Option<(i32, i32)> {
		let shape = self.shape();
		if shape == SHAPE_INVALID {
			return None;
		}
		Some(SIZES[usize::from(shape)][usize::from(self.size())])
	}

	/// Destination rectangle, doubled for double-size sprites.
	pub fn bounds(&self) -> Rect {
		let Some((w, h)) = self.dimensions() else {
			return Rect::ZERO;
		};
		let (x, y) = (self.x(), self.y());
		if self.is_double_size() {
			return Rect::with_size(x, y, w * 2, h * 2);
		}
		Rect::with_size(x, y, w, h)
	}

	/// Rectangle the sprite's pixels cover, centered in [`Obj::bounds`].
	pub fn footprint(&self) -> Rect {
		let Some((w, h)) = self.dimensions() else {
			return Rect::ZERO;
		};
		let (mut x, mut y) = (self.x(), self.y());
		if self.is_double_size() {
			x += w / 2;
			y += h / 2;
		}
		Rect::with_size(x, y, w, h)
	}
}

impl fmt::Display for Obj {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"OBJ(tile {}, at ({}, {}), shape {}, size {})",
			self.tile(),
			self.x(),
			self.y(),
			self.shape(),
			self.size()
		)
	}
}
