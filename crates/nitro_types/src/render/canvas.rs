//! Image abstractions used by the compositor.
//!
//! Everything that can be drawn from implements [`Image`]; everything that
//! can be drawn onto implements [`Canvas`]. Paletted images additionally
//! expose their raw indices so that copies between images sharing one
//! palette skip color conversion entirely.

use std::sync::Arc;

use super::color::{Color, Palette, Rgba64};
use super::geom::{Point, Rect};

/// A readable image with integer bounds.
pub trait Image {
	/// Pixel bounds. Coordinates outside read as transparent.
	fn bounds(&self) -> Rect;

	/// Premultiplied color at `(x, y)`.
	fn rgba64_at(&self, x: i32, y: i32) -> Rgba64;

	/// Palette, for paletted images.
	fn palette(&self) -> Option<&Arc<Palette>> {
		None
	}

	/// Palette index at `(x, y)`; zero outside the bounds or for unpaletted
	/// images.
	fn index_at(&self, _x: i32, _y: i32) -> u8 {
		0
	}
}

/// A writable image.
pub trait Canvas: Image {
	/// Stores a color at `(x, y)`. Writes outside the bounds are dropped.
	fn set_rgba64(&mut self, x: i32, y: i32, c: Rgba64);

	/// Paletted view of this canvas, if it is one.
	fn as_indexed_mut(&mut self) -> Option<&mut IndexedImage> {
		None
	}
}

/// Returns `true` when both images draw from the very same palette object.
pub fn same_palette(a: Option<&Arc<Palette>>, b: Option<&Arc<Palette>>) -> bool {
	match (a, b) {
		(Some(a), Some(b)) => Arc::ptr_eq(a, b),
		_ => false,
	}
}

/// An owned paletted image: one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
	rect: Rect,
	stride: usize,
	pix: Vec<u8>,
	palette: Arc<Palette>,
}

impl IndexedImage {
	/// Creates an image filled with index 0.
	pub fn new(rect: Rect, palette: Arc<Palette>) -> Self {
		Self {
			rect,
			stride: rect.width() as usize,
			pix: vec![0; rect.area()],
			palette,
		}
	}

	/// Wraps existing pixels, row-major with a stride of `rect.width()`.
	///
	/// The buffer is resized to fit the rectangle, padding with index 0.
	pub fn from_pixels(rect: Rect, mut pix: Vec<u8>, palette: Arc<Palette>) -> Self {
		pix.resize(rect.area(), 0);
		Self {
			rect,
			stride: rect.width() as usize,
			pix,
			palette,
		}
	}

	/// Quantizes an RGBA image onto `palette`.
	///
	/// Every pixel maps to its exact palette entry when one exists, otherwise
	/// to the nearest. Fully transparent pixels map to index 0.
	pub fn from_rgba<I: Image + ?Sized>(src: &I, palette: Arc<Palette>) -> Self {
		let rect = src.bounds();
		let mut out = Self::new(rect, palette);
		for y in rect.min.y..rect.max.y {
			for x in rect.min.x..rect.max.x {
				let index = out.palette.index_of(src.rgba64_at(x, y));
				out.set_index(x, y, index);
			}
		}
		out
	}

	/// Raw pixel indices, row-major.
	pub fn pixels(&self) -> &[u8] {
		&self.pix
	}

	/// Width in pixels.
	pub fn width(&self) -> u32 {
		self.rect.width() as u32
	}

	/// Height in pixels.
	pub fn height(&self) -> u32 {
		self.rect.height() as u32
	}

	fn offset(&self, x: i32, y: i32) -> Option<usize> {
		if !self.rect.contains(Point::new(x, y)) {
			return None;
		}
		let dx = (x - self.rect.min.x) as usize;
		let dy = (y - self.rect.min.y) as usize;
		Some(dy * self.stride + dx)
	}

	/// Stores a palette index at `(x, y)`. Writes outside are dropped.
	#[inline]
	pub fn set_index(&mut self, x: i32, y: i32, index: u8) {
		if let Some(i) = self.offset(x, y) {
			self.pix[i] = index;
		}
	}

	/// Shares the palette with another owner.
	pub fn palette_arc(&self) -> Arc<Palette> {
		Arc::clone(&self.palette)
	}

	/// Straight-alpha color at `(x, y)`.
	pub fn color_at(&self, x: i32, y: i32) -> Color {
		match self.offset(x, y) {
			Some(i) => self.palette.get(self.pix[i]),
			None => Color::transparent(),
		}
	}

	/// Returns a copy moved so its top-left corner sits at the origin.
	pub fn normalized(&self) -> IndexedImage {
		let mut out = self.clone();
		out.rect = Rect::with_size(0, 0, self.rect.width(), self.rect.height());
		out
	}

	/// Converts to an 8-bit RGBA image for export, with the top-left corner
	/// at the image origin.
	pub fn to_rgba_image(&self) -> image::RgbaImage {
		let min = self.rect.min;
		image::RgbaImage::from_fn(self.width(), self.height(), |x, y| {
			let c = self.color_at(min.x + x as i32, min.y + y as i32);
			image::Rgba([c.r, c.g, c.b, c.a])
		})
	}
}

impl Image for IndexedImage {
	fn bounds(&self) -> Rect {
		self.rect
	}

	fn rgba64_at(&self, x: i32, y: i32) -> Rgba64 {
		self.color_at(x, y).to_rgba64()
	}

	fn palette(&self) -> Option<&Arc<Palette>> {
		Some(&self.palette)
	}

	#[inline]
	fn index_at(&self, x: i32, y: i32) -> u8 {
		self.offset(x, y).map_or(0, |i| self.pix[i])
	}
}

impl Canvas for IndexedImage {
	fn set_rgba64(&mut self, x: i32, y: i32, c: Rgba64) {
		let index = self.palette.index_of(c);
		self.set_index(x, y, index);
	}

	fn as_indexed_mut(&mut self) -> Option<&mut IndexedImage> {
		Some(self)
	}
}

/// An owned direct-color image holding premultiplied 16-bit pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaCanvas {
	rect: Rect,
	pix: Vec<Rgba64>,
}

impl RgbaCanvas {
	/// Creates a fully transparent canvas.
	pub fn new(rect: Rect) -> Self {
		Self {
			rect,
			pix: vec![Rgba64::TRANSPARENT; rect.area()],
		}
	}

	fn offset(&self, x: i32, y: i32) -> Option<usize> {
		if !self.rect.contains(Point::new(x, y)) {
			return None;
		}
		let dx = (x - self.rect.min.x) as usize;
		let dy = (y - self.rect.min.y) as usize;
		Some(dy * self.rect.width() as usize + dx)
	}

	/// Converts to an 8-bit RGBA image for export.
	pub fn to_rgba_image(&self) -> image::RgbaImage {
		let min = self.rect.min;
		image::RgbaImage::from_fn(self.rect.width() as u32, self.rect.height() as u32, |x, y| {
			let c = self.rgba64_at(min.x + x as i32, min.y + y as i32).to_color();
			image::Rgba([c.r, c.g, c.b, c.a])
		})
	}
}

impl Image for RgbaCanvas {
	fn bounds(&self) -> Rect {
		self.rect
	}

	fn rgba64_at(&self, x: i32, y: i32) -> Rgba64 {
		self.offset(x, y).map_or(Rgba64::TRANSPARENT, |i| self.pix[i])
	}
}

impl Canvas for RgbaCanvas {
	fn set_rgba64(&mut self, x: i32, y: i32, c: Rgba64) {
		if let Some(i) = self.offset(x, y) {
			self.pix[i] = c;
		}
	}
}
