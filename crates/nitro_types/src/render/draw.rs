//! Compositing primitives.
//!
//! Both primitives paint *under* the destination: a destination pixel that
//! already holds something opaque is never overwritten. Sprites are drawn
//! front to back, so the first object drawn ends up on top.
//!
//! When source and destination draw from the same palette object and the
//! destination is paletted, raw indices are copied and index 0 is treated as
//! transparent. Every other combination goes through premultiplied
//! [`Rgba64`] colors.

use super::canvas::{Canvas, Image, IndexedImage, same_palette};
use super::color::Rgba64;
use super::geom::{Point, Rect};

/// Clips `r` (placed at `dp` in the destination) to both images.
fn clip(r: Rect, dst: Rect, dp: Point, src: Rect, sp: Point) -> Rect {
	r.intersect(&dst).intersect(&src.translate(dp - sp))
}

/// Paints `src` under `dst` over the rectangle `r`, aligning `r.min` in the
/// destination with `sp` in the source.
pub fn draw_under<D, S>(dst: &mut D, r: Rect, src: &S, sp: Point)
where
	D: Canvas + ?Sized,
	S: Image + ?Sized,
{
	if same_palette(dst.palette(), src.palette())
		&& let Some(indexed) = dst.as_indexed_mut()
	{
		draw_paletted_under(indexed, r, src, sp);
		return;
	}
	draw_generic_under(dst, r, src, sp);
}

fn draw_paletted_under<S: Image + ?Sized>(dst: &mut IndexedImage, r: Rect, src: &S, sp: Point) {
	let dp = r.min;
	let r = clip(r, dst.bounds(), dp, src.bounds(), sp);
	let delta = sp - dp;
	for y in r.min.y..r.max.y {
		for x in r.min.x..r.max.x {
			if dst.index_at(x, y) != 0 {
				continue;
			}
			dst.set_index(x, y, src.index_at(x + delta.x, y + delta.y));
		}
	}
}

fn draw_generic_under<D, S>(dst: &mut D, r: Rect, src: &S, sp: Point)
where
	D: Canvas + ?Sized,
	S: Image + ?Sized,
{
	let dp = r.min;
	let r = clip(r, dst.bounds(), dp, src.bounds(), sp);
	let delta = sp - dp;
	for y in r.min.y..r.max.y {
		for x in r.min.x..r.max.x {
			let d = dst.rgba64_at(x, y);
			if d.a == 0xFFFF {
				continue;
			}
			let s = src.rgba64_at(x + delta.x, y + delta.y);
			if s.a == 0 {
				continue;
			}
			let c = if d.a == 0 { s } else { s.under(d) };
			dst.set_rgba64(x, y, c);
		}
	}
}

/// Sine and cosine of a clockwise rotation by `turns`, rounded to 1/4096.
fn sin_cos(turns: f64) -> (f64, f64) {
	let (sin, cos) = (turns * std::f64::consts::TAU).sin_cos();
	let round = |v: f64| (v * 4096.0).round() / 4096.0;
	(-round(sin), round(cos))
}

/// Inverse-maps every destination pixel of `r` back into `src` and paints
/// the result under `dst`.
///
/// `dp` in the destination corresponds to `sp` in the source. `sx` and `sy`
/// scale destination offsets into source offsets (pass the reciprocal of the
/// visual scale). `turns` rotates clockwise, 1.0 being a full turn.
///
/// Destination pixels that are already opaque are skipped, as are
/// transparent source pixels.
#[allow(clippy::too_many_arguments)]
pub fn rotate<D, S>(dst: &mut D, r: Rect, dp: Point, src: &S, sp: Point, sx: f64, sy: f64, turns: f64)
where
	D: Canvas + ?Sized,
	S: Image + ?Sized,
{
	let (sin, cos) = sin_cos(turns);
	let r = r.intersect(&dst.bounds());
	let src_bounds = src.bounds();
	let source_of = |x: i32, y: i32| {
		let dx = f64::from(x - dp.x);
		let dy = f64::from(y - dp.y);
		let u = ((dx * cos - dy * sin) * sx).floor() as i32;
		let v = ((dx * sin + dy * cos) * sy).floor() as i32;
		Point::new(sp.x + u, sp.y + v)
	};

	if same_palette(dst.palette(), src.palette())
		&& let Some(dst) = dst.as_indexed_mut()
	{
		for y in r.min.y..r.max.y {
			for x in r.min.x..r.max.x {
				if dst.index_at(x, y) != 0 {
					continue;
				}
				let p = source_of(x, y);
				if !src_bounds.contains(p) {
					continue;
				}
				let index = src.index_at(p.x, p.y);
				if index != 0 {
					dst.set_index(x, y, index);
				}
			}
		}
		return;
	}

	for y in r.min.y..r.max.y {
		for x in r.min.x..r.max.x {
			let d = dst.rgba64_at(x, y);
			if d.a != 0 {
				continue;
			}
			let p = source_of(x, y);
			if !src_bounds.contains(p) {
				continue;
			}
			let s = src.rgba64_at(p.x, p.y);
			if s.a != 0 {
				dst.set_rgba64(x, y, s);
			}
		}
	}
}

/// Doubles an image in both directions, keeping the origin in place.
///
/// Edges are kept sharp with the Scale2x rule: each source pixel becomes a
/// 2x2 block whose corners take a neighbour's color when the two neighbours
/// meeting at that corner agree and the other two differ.
pub fn scale2x(src: &IndexedImage) -> IndexedImage {
	let r = src.bounds();
	let mut dst = IndexedImage::new(r.scale(2), src.palette_arc());
	// Outside pixels clamp to the edge.
	let at = |x: i32, y: i32| {
		let x = x.clamp(r.min.x, r.max.x - 1);
		let y = y.clamp(r.min.y, r.max.y - 1);
		src.index_at(x, y)
	};
	for y in r.min.y..r.max.y {
		for x in r.min.x..r.max.x {
			let p = at(x, y);
			let a = at(x, y - 1);
			let b = at(x + 1, y);
			let c = at(x - 1, y);
			let d = at(x, y + 1);
			let (mut e0, mut e1, mut e2, mut e3) = (p, p, p, p);
			if a != d && c != b {
				if c == a {
					e0 = c;
				}
				if a == b {
					e1 = b;
				}
				if d == c {
					e2 = c;
				}
				if b == d {
					e3 = d;
				}
			}
			dst.set_index(2 * x, 2 * y, e0);
			dst.set_index(2 * x + 1, 2 * y, e1);
			dst.set_index(2 * x, 2 * y + 1, e2);
			dst.set_index(2 * x + 1, 2 * y + 1, e3);
		}
	}
	dst
}

/// Applies [`scale2x`] three times.
pub fn scale8x(src: &IndexedImage) -> IndexedImage {
	scale2x(&scale2x(&scale2x(src)))
}
