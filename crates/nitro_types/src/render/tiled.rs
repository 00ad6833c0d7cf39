//! Zero-copy views into tile pixel data.

use std::sync::Arc;

use super::canvas::Image;
use super::color::{Palette, Rgba64};
use super::geom::{Point, Rect};

/// How a [`TileView`] addresses its pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileLayout {
	/// Consecutive 8x8 blocks, `stride` blocks per row.
	Tiled {
		/// Tiles per row
		stride: usize,
	},
	/// Plain raster rows of `stride` pixels.
	Linear {
		/// Pixels per row
		stride: usize,
	},
}

/// A read-only paletted image borrowing unpacked tile pixels.
///
/// Pixels past the end of the borrowed data read as index 0.
#[derive(Debug, Clone)]
pub struct TileView<'a> {
	pix: &'a [u8],
	rect: Rect,
	layout: TileLayout,
	palette: Arc<Palette>,
}

impl<'a> TileView<'a> {
	/// Creates a view of `width` x `height` pixels starting at `pix[0]`.
	pub fn new(pix: &'a [u8], width: i32, height: i32, layout: TileLayout, palette: Arc<Palette>) -> Self {
		Self {
			pix,
			rect: Rect::with_size(0, 0, width.max(0), height.max(0)),
			layout,
			palette,
		}
	}

	/// A view with no pixels.
	pub fn empty(palette: Arc<Palette>) -> Self {
		Self {
			pix: &[],
			rect: Rect::ZERO,
			layout: TileLayout::Linear {
				stride: 0,
			},
			palette,
		}
	}

	/// Addressing mode.
	pub fn layout(&self) -> TileLayout {
		self.layout
	}

	fn offset(&self, x: i32, y: i32) -> Option<usize> {
		if !self.rect.contains(Point::new(x, y)) {
			return None;
		}
		let x = (x - self.rect.min.x) as usize;
		let y = (y - self.rect.min.y) as usize;
		let i = match self.layout {
			TileLayout::Tiled {
				stride,
			} => {
				let (tx, ty) = (x % 8, y % 8);
				((y - ty) * stride + (x - tx)) * 8 + ty * 8 + tx
			}
			TileLayout::Linear {
				stride,
			} => y * stride + x,
		};
		Some(i)
	}
}

impl Image for TileView<'_> {
	fn bounds(&self) -> Rect {
		self.rect
	}

	fn rgba64_at(&self, x: i32, y: i32) -> Rgba64 {
		self.palette.get(self.index_at(x, y)).to_rgba64()
	}

	fn palette(&self) -> Option<&Arc<Palette>> {
		Some(&self.palette)
	}

	fn index_at(&self, x: i32, y: i32) -> u8 {
		self.offset(x, y).and_then(|i| self.pix.get(i)).copied().unwrap_or(0)
	}
}
