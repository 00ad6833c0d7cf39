//! Colors and palettes.
//!
//! Two color representations are used:
//!
//! - [`Color`]: straight-alpha 8-bit RGBA, used for palette entries and
//!   exported images.
//! - [`Rgba64`]: alpha-premultiplied 16-bit RGBA, used while compositing so
//!   that blending is a plain weighted sum.

use std::fmt;

/// Straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 255)
	}

	/// Creates a transparent black color.
	pub const fn transparent() -> Self {
		Self::new(0, 0, 0, 0)
	}

	/// Same color with alpha forced to zero.
	pub const fn with_transparency(self) -> Self {
		Self::new(self.r, self.g, self.b, 0)
	}

	/// Converts to premultiplied 16-bit form.
	pub fn to_rgba64(self) -> Rgba64 {
		let a = u32::from(self.a) * 0x101;
		let premultiply = |c: u8| (u32::from(c) * 0x101 * a / 0xFFFF) as u16;
		Rgba64 {
			r: premultiply(self.r),
			g: premultiply(self.g),
			b: premultiply(self.b),
			a: a as u16,
		}
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::transparent()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Alpha-premultiplied 16-bit RGBA color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgba64 {
	/// Red component, premultiplied
	pub r: u16,
	/// Green component, premultiplied
	pub g: u16,
	/// Blue component, premultiplied
	pub b: u16,
	/// Alpha component
	pub a: u16,
}

impl Rgba64 {
	/// Fully transparent.
	pub const TRANSPARENT: Rgba64 = Rgba64 {
		r: 0,
		g: 0,
		b: 0,
		a: 0,
	};

	/// Converts back to straight-alpha 8-bit form.
	pub fn to_color(self) -> Color {
		if self.a == 0 {
			return Color::transparent();
		}
		let a = u32::from(self.a);
		let unpremultiply = |c: u16| ((u32::from(c) * 0xFFFF / a) >> 8) as u8;
		Color::new(unpremultiply(self.r), unpremultiply(self.g), unpremultiply(self.b), (self.a >> 8) as u8)
	}

	/// Composites `self` underneath `top`: `top` wins where it is opaque.
	pub fn under(self, top: Rgba64) -> Rgba64 {
		let k = 0xFFFF - u32::from(top.a);
		let mix = |t: u16, b: u16| (u32::from(t) + u32::from(b) * k / 0xFFFF) as u16;
		Rgba64 {
			r: mix(top.r, self.r),
			g: mix(top.g, self.g),
			b: mix(top.b, self.b),
			a: mix(top.a, self.a),
		}
	}

	fn distance(self, other: Rgba64) -> u64 {
		let d = |x: u16, y: u16| {
			let v = i64::from(x) - i64::from(y);
			(v * v) as u64
		};
		d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b) + d(self.a, other.a)
	}
}

/// Converts a 15-bit BGR555 color (as stored in NCLR files) into a fully
/// opaque color.
///
/// Each 5-bit channel `c` is widened as `(c * 0xFFFF + 15) / 31` to 16 bits,
/// then narrowed to 8 bits.
pub fn rgb15_to_color(value: u16) -> Color {
	let widen = |c: u16| (((u32::from(c & 0x1F) * 0xFFFF + 15) / 31) >> 8) as u8;
	Color::rgb(widen(value), widen(value >> 5), widen(value >> 10))
}

/// An indexed color table.
///
/// Images that draw from the same palette share it through an `Arc`, which
/// also lets compositing recognize two images as sharing a palette by
/// pointer identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
	colors: Vec<Color>,
}

impl Palette {
	/// Creates a palette from a list of colors.
	pub fn new(colors: Vec<Color>) -> Self {
		Self {
			colors,
		}
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	/// Returns `true` when the palette has no entries.
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	/// All entries.
	pub fn colors(&self) -> &[Color] {
		&self.colors
	}

	/// Looks up an entry; indices past the end read as transparent.
	#[inline]
	pub fn get(&self, index: u8) -> Color {
		self.colors.get(usize::from(index)).copied().unwrap_or_default()
	}

	/// Makes entry `index` transparent, if it exists.
	pub fn set_transparent(&mut self, index: u8) {
		if let Some(color) = self.colors.get_mut(usize::from(index)) {
			*color = color.with_transparency();
		}
	}

	/// Returns the palette with entry 0 made transparent, as sprites use it.
	pub fn with_transparent_zero(mut self) -> Self {
		self.set_transparent(0);
		self
	}

	/// Finds the entry closest to `c`.
	///
	/// Exact matches win. Fully transparent colors map to index 0. Otherwise
	/// the entry with the smallest squared distance is chosen, lowest index on
	/// ties.
	pub fn index_of(&self, c: Rgba64) -> u8 {
		if c.a == 0 {
			return 0;
		}
		let mut best = (0u8, u64::MAX);
		for (i, entry) in self.colors.iter().enumerate().take(256) {
			let d = entry.to_rgba64().distance(c);
			if d == 0 {
				return i as u8;
			}
			if d < best.1 {
				best = (i as u8, d);
			}
		}
		best.0
	}
}
