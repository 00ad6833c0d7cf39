//! Integer geometry for rasterizing.

use std::fmt;
use std::ops::{Add, Sub};

/// A point on the pixel grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
	/// X coordinate
	pub x: i32,
	/// Y coordinate
	pub y: i32,
}

impl Point {
	/// The origin.
	pub const ZERO: Point = Point::new(0, 0);

	/// Creates a point.
	pub const fn new(x: i32, y: i32) -> Self {
		Self {
			x,
			y,
		}
	}

	/// Rotates the point clockwise by `turns` (1.0 is a full turn).
	///
	/// The result is truncated back onto the pixel grid.
	pub fn rotate(self, turns: f64) -> Point {
		if turns == 0.0 {
			return self;
		}
		let (sin, cos) = (turns * std::f64::consts::TAU).sin_cos();
		let x = f64::from(self.x);
		let y = f64::from(self.y);
		Point::new((x * cos - y * sin) as i32, (x * sin + y * cos) as i32)
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl fmt::Display for Point {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {})", self.x, self.y)
	}
}

/// A half-open rectangle `[min, max)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
	/// Top-left corner (inclusive)
	pub min: Point,
	/// Bottom-right corner (exclusive)
	pub max: Point,
}

impl Rect {
	/// The empty rectangle at the origin.
	pub const ZERO: Rect = Rect::new(0, 0, 0, 0);

	/// Creates a rectangle from its corners.
	pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
		Self {
			min: Point::new(x0, y0),
			max: Point::new(x1, y1),
		}
	}

	/// Creates a rectangle at `(x, y)` with the given size.
	pub const fn with_size(x: i32, y: i32, width: i32, height: i32) -> Self {
		Self::new(x, y, x + width, y + height)
	}

	/// Width in pixels, zero when inverted.
	pub fn width(&self) -> i32 {
		(self.max.x - self.min.x).max(0)
	}

	/// Height in pixels, zero when inverted.
	pub fn height(&self) -> i32 {
		(self.max.y - self.min.y).max(0)
	}

	/// Number of pixels covered.
	pub fn area(&self) -> usize {
		self.width() as usize * self.height() as usize
	}

	/// Returns `true` when the rectangle covers no pixels.
	pub fn is_empty(&self) -> bool {
		self.min.x >= self.max.x || self.min.y >= self.max.y
	}

	/// Returns `true` if `p` lies inside the rectangle.
	pub fn contains(&self, p: Point) -> bool {
		self.min.x <= p.x && p.x < self.max.x && self.min.y <= p.y && p.y < self.max.y
	}

	/// Moves the rectangle by `p`.
	pub fn translate(&self, p: Point) -> Rect {
		Rect {
			min: self.min + p,
			max: self.max + p,
		}
	}

	/// Smallest rectangle containing both. Empty rectangles are ignored.
	pub fn union(&self, other: &Rect) -> Rect {
		if self.is_empty() {
			return *other;
		}
		if other.is_empty() {
			return *self;
		}
		Rect::new(
			self.min.x.min(other.min.x),
			self.min.y.min(other.min.y),
			self.max.x.max(other.max.x),
			self.max.y.max(other.max.y),
		)
	}

	/// Largest rectangle contained in both, or [`Rect::ZERO`].
	pub fn intersect(&self, other: &Rect) -> Rect {
		let r = Rect::new(
			self.min.x.max(other.min.x),
			self.min.y.max(other.min.y),
			self.max.x.min(other.max.x),
			self.max.y.min(other.max.y),
		);
		if r.is_empty() { Rect::ZERO } else { r }
	}

	/// Rectangle centered on the origin that contains this one.
	pub fn symmetric(&self) -> Rect {
		let x = self.min.x.abs().max(self.max.x.abs());
		let y = self.min.y.abs().max(self.max.y.abs());
		Rect::new(-x, -y, x, y)
	}

	/// Multiplies both corners by `factor`.
	pub fn scale(&self, factor: i32) -> Rect {
		Rect::new(self.min.x * factor, self.min.y * factor, self.max.x * factor, self.max.y * factor)
	}
}

impl fmt::Display for Rect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.min, self.max)
	}
}
