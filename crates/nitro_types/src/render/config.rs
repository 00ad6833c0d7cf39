//! Rendering options.

use super::geom::{Point, Rect};

/// Width of the default canvas.
pub const DEFAULT_WIDTH: i32 = 192;

/// Height of the default canvas.
pub const DEFAULT_HEIGHT: i32 = 96;

/// Options for [`Animation`](super::Animation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
	/// Canvas width in pixels
	pub width: i32,
	/// Canvas height in pixels
	pub height: i32,
	/// Canvas point the top-level animation is anchored to
	pub origin: Point,
	/// Upsample cells 8x with Scale2x before rotating them
	pub supersample: bool,
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self {
			width: DEFAULT_WIDTH,
			height: DEFAULT_HEIGHT,
			origin: Point::new(DEFAULT_WIDTH / 2, DEFAULT_HEIGHT),
			supersample: true,
		}
	}
}

impl RenderConfig {
	/// Default canvas without supersampling; cheaper, with jaggier rotations.
	pub fn fast() -> Self {
		Self {
			supersample: false,
			..Self::default()
		}
	}

	/// Canvas rectangle.
	pub fn bounds(&self) -> Rect {
		Rect::with_size(0, 0, self.width, self.height)
	}
}
