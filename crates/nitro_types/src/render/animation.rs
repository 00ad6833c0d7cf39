//! Hierarchical animation playback.
//!
//! A finished frame is assembled from the top down:
//!
//! ```text
//! NMAR acell -> frame -> multi-cell (NMCR) -> objects -> NANR acell -> frame -> cell (NCER) -> OBJs
//! ```
//!
//! The top-level NMAR acell is sampled by absolute time. The NANR acells
//! keep their own [`PlaybackState`], advanced between rendered frames, so
//! sub-animations run independently of their parent.

use std::sync::Arc;

use crate::file::{
	Acell, Frame, NanrFile, NcerFile, NcgrFile, NclrFile, NitroError, NmarFile, NmcrFile, ResourceKind,
};

use super::canvas::{Image, IndexedImage};
use super::color::Palette;
use super::config::RenderConfig;
use super::draw::{draw_under, rotate, scale8x};
use super::geom::{Point, Rect};

/// Upsampling factor of supersampled cells.
const SUPERSAMPLE: f64 = 8.0;

/// Ticks per second of animation durations.
pub const TICKS_PER_SECOND: u32 = 60;

/// The resources an animation is assembled from.
#[derive(Debug, Clone, Copy)]
pub struct Resources<'a> {
	/// Tile pixels
	pub tiles: &'a NcgrFile,
	/// Palette; sub-palette 0 is used
	pub palette: &'a NclrFile,
	/// Cell bank
	pub cells: &'a NcerFile,
	/// Animated cells placed by the multi-cells
	pub animations: &'a NanrFile,
	/// Multi-cell bank
	pub multi_cells: &'a NmcrFile,
	/// Top-level animation; acell 0 drives the whole playback
	pub multi_cell_animations: &'a NmarFile,
}

/// Accumulated rotation and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
	turns: f64,
	scale_x: f64,
	scale_y: f64,
}

impl Transform {
	fn of(frame: &Frame) -> Self {
		let (scale_x, scale_y) = frame.scale();
		Self {
			turns: frame.turns(),
			scale_x,
			scale_y,
		}
	}

	fn then(self, frame: &Frame) -> Self {
		let (sx, sy) = frame.scale();
		Self {
			turns: self.turns + frame.turns(),
			scale_x: self.scale_x * sx,
			scale_y: self.scale_y * sy,
		}
	}

	fn is_rotated(&self) -> bool {
		self.turns.rem_euclid(1.0) != 0.0
	}

	fn is_identity(&self) -> bool {
		!self.is_rotated() && self.scale_x == 1.0 && self.scale_y == 1.0
	}
}

/// A pre-rendered cell.
#[derive(Debug, Clone)]
struct CachedCell {
	plain: IndexedImage,
	/// 8x upsampled copy, origin preserved
	scaled: Option<IndexedImage>,
	/// Plain bounds made symmetric about the cell origin
	extent: Rect,
}

impl CachedCell {
	/// Destination rectangle, relative to the cell origin, that can receive
	/// pixels under `tr`.
	fn reach(&self, tr: Transform) -> Rect {
		let rx = f64::from(self.extent.max.x) * tr.scale_x.abs();
		let ry = f64::from(self.extent.max.y) * tr.scale_y.abs();
		if !tr.is_rotated() {
			let (x, y) = (rx.ceil() as i32, ry.ceil() as i32);
			return Rect::new(-x, -y, x, y);
		}
		let r = rx.hypot(ry).ceil() as i32;
		Rect::new(-r, -r, r, r)
	}
}

/// Playback position of one animated cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackState {
	/// Index of the frame showing
	pub frame: usize,
	/// Ticks left before the frame changes
	pub remaining: u32,
}

impl PlaybackState {
	/// Creates a state positioned at the start of `acell`.
	pub fn new(acell: &Acell) -> Self {
		let mut state = Self::default();
		state.reset(acell);
		state
	}

	/// Rewinds to the first frame with a non-zero duration.
	pub fn reset(&mut self, acell: &Acell) {
		self.frame = 0;
		self.remaining = acell.frames.first().map_or(0, |f| f.duration);
		self.advance(acell, 0);
	}

	/// Moves forward by `dt` ticks, wrapping into the loop region.
	///
	/// Acells without a playable loop region are left untouched.
	pub fn advance(&mut self, acell: &Acell, dt: u32) {
		if acell.frames.is_empty() || acell.loop_duration() == 0 {
			return;
		}
		let mut dt = dt;
		while dt >= self.remaining {
			dt -= self.remaining;
			self.frame += 1;
			if self.frame >= acell.frames.len() {
				self.frame = acell.loop_start;
			}
			self.remaining = acell.frames[self.frame].duration;
		}
		self.remaining -= dt;
	}

	/// The frame showing in `acell`.
	pub fn current<'a>(&self, acell: &'a Acell) -> Option<&'a Frame> {
		acell.frames.get(self.frame)
	}
}

/// Output of [`Animation::render`].
#[derive(Debug, Clone, Default)]
pub struct Rendered {
	/// Finished frames, in order
	pub frames: Vec<IndexedImage>,
	/// Display time of each frame, in ticks
	pub delays: Vec<u32>,
}

impl Rendered {
	/// Number of frames.
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Returns `true` when nothing was rendered.
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// Total display time in ticks.
	pub fn total_ticks(&self) -> u32 {
		self.delays.iter().sum()
	}

	/// Delays converted to hundredths of a second.
	///
	/// Each boundary is rounded down on its own, so the sum of the result
	/// always equals the total duration converted the same way.
	pub fn delays_centiseconds(&self) -> Vec<u32> {
		let to_cs = |t: u32| (u64::from(t) * 100 / u64::from(TICKS_PER_SECOND)) as u32;
		let mut t = 0u32;
		self.delays
			.iter()
			.map(|&d| {
				let next = t + d;
				let cs = to_cs(next) - to_cs(t);
				t = next;
				cs
			})
			.collect()
	}
}

/// Renders the frames of a multi-cell animation.
#[derive(Debug, Clone)]
pub struct Animation<'a> {
	resources: Resources<'a>,
	config: RenderConfig,
	palette: Arc<Palette>,
	cells: Vec<CachedCell>,
	states: Vec<PlaybackState>,
}

impl<'a> Animation<'a> {
	/// Prepares an animation, pre-rendering every cell.
	///
	/// Fails when the NMAR has no acell to drive playback or the NCLR has no
	/// complete sub-palette.
	pub fn new(resources: Resources<'a>, config: RenderConfig) -> Result<Self, NitroError> {
		if resources.multi_cell_animations.is_empty() {
			return Err(NitroError::IndexOutOfRange {
				kind: ResourceKind::Nmar,
				index: 0,
				count: 0,
			});
		}
		if resources.palette.sub_palette_count() == 0 {
			return Err(NitroError::IndexOutOfRange {
				kind: ResourceKind::Nclr,
				index: 0,
				count: 0,
			});
		}

		let palette = Arc::new(resources.palette.sub_palette(0).with_transparent_zero());
		let cells = (0..resources.cells.len())
			.map(|i| {
				let plain = resources.cells.render_cell(i, resources.tiles, &palette);
				let extent = plain.bounds().symmetric();
				let scaled = config.supersample.then(|| scale8x(&plain));
				CachedCell {
					plain,
					scaled,
					extent,
				}
			})
			.collect::<Vec<_>>();
		let states = resources.animations.acells().iter().map(PlaybackState::new).collect();

		log::debug!(
			"animation: {} cells cached, {} animated cells, supersample {}",
			cells.len(),
			resources.animations.len(),
			config.supersample
		);
		Ok(Self {
			resources,
			config,
			palette,
			cells,
			states,
		})
	}

	/// Rendering options.
	pub fn config(&self) -> &RenderConfig {
		&self.config
	}

	/// Palette every frame is drawn with.
	pub fn palette(&self) -> &Arc<Palette> {
		&self.palette
	}

	/// Pre-rendered image of cell `i`, at its original size.
	pub fn cell_image(&self, i: usize) -> Option<&IndexedImage> {
		self.cells.get(i).map(|c| &c.plain)
	}

	/// Playback states of the animated cells, indexed like the NANR.
	pub fn states(&self) -> &[PlaybackState] {
		&self.states
	}

	/// Length of the top-level animation in ticks.
	pub fn total_duration(&self) -> u32 {
		self.top().map_or(0, Acell::total_duration)
	}

	fn top(&self) -> Result<&'a Acell, NitroError> {
		let acells = self.resources.multi_cell_animations.acells();
		acells.first().ok_or(NitroError::IndexOutOfRange {
			kind: ResourceKind::Nmar,
			index: 0,
			count: acells.len(),
		})
	}

	/// Rewinds every animated cell.
	pub fn reset(&mut self) {
		let acells = self.resources.animations.acells();
		for (state, acell) in self.states.iter_mut().zip(acells) {
			state.reset(acell);
		}
	}

	/// Advances every animated cell by `dt` ticks.
	pub fn advance(&mut self, dt: u32) {
		let acells = self.resources.animations.acells();
		for (state, acell) in self.states.iter_mut().zip(acells) {
			state.advance(acell, dt);
		}
	}

	/// Renders the frame at tick `t` of the top-level animation, with the
	/// animated cells at their current playback state.
	pub fn render_frame(&self, t: u32) -> Result<IndexedImage, NitroError> {
		let mut canvas = IndexedImage::new(self.config.bounds(), Arc::clone(&self.palette));
		let (frame, _) = self.top()?.frame_at(t)?;
		let dp = self.config.origin + Point::new(frame.x, frame.y);
		let index = usize::from(frame.index);
		if index < self.resources.multi_cells.len() {
			self.render_mcell(&mut canvas, dp, index, Transform::of(&frame));
		} else {
			log::warn!(
				"NMAR frame at tick {t} references multi-cell {index}, bank holds {}",
				self.resources.multi_cells.len()
			);
		}
		Ok(canvas)
	}

	fn render_mcell(&self, canvas: &mut IndexedImage, dp: Point, index: usize, tr: Transform) {
		let acells = self.resources.animations.acells();
		for mobj in self.resources.multi_cells.mcell(index) {
			let i = usize::from(mobj.acell_index);
			let (Some(acell), Some(state)) = (acells.get(i), self.states.get(i)) else {
				log::warn!("multi-cell {index} references acell {i}, bank holds {}", acells.len());
				continue;
			};
			let Some(frame) = state.current(acell) else {
				continue;
			};
			let offset = Point::new(i32::from(mobj.x), i32::from(mobj.y)).rotate(tr.turns);
			let pos = dp + offset + Point::new(frame.x, frame.y).rotate(tr.turns);
			let cell = usize::from(frame.index);
			if cell < self.cells.len() {
				self.draw_cell(canvas, pos, cell, tr.then(frame));
			} else {
				log::warn!("acell {i} references cell {cell}, bank holds {}", self.cells.len());
			}
		}
	}

	fn draw_cell(&self, canvas: &mut IndexedImage, dp: Point, i: usize, tr: Transform) {
		let cell = &self.cells[i];
		if tr.is_identity() {
			let r = cell.plain.bounds();
			draw_under(canvas, r.translate(dp), &cell.plain, r.min);
			return;
		}
		if tr.scale_x == 0.0 || tr.scale_y == 0.0 {
			return;
		}
		let r = cell.reach(tr).translate(dp);
		match &cell.scaled {
			Some(scaled) => rotate(
				canvas,
				r,
				dp,
				scaled,
				Point::ZERO,
				SUPERSAMPLE / tr.scale_x,
				SUPERSAMPLE / tr.scale_y,
				tr.turns,
			),
			None => rotate(canvas, r, dp, &cell.plain, Point::ZERO, 1.0 / tr.scale_x, 1.0 / tr.scale_y, tr.turns),
		}
	}

	/// Tick of the next visible change after `t`: the top-level frame ending
	/// or any animated cell changing frame, whichever comes first.
	pub fn next_event(&self, t: u32) -> Result<u32, NitroError> {
		let (frame, elapsed) = self.top()?.frame_at(t)?;
		let mut least = frame.duration - elapsed;
		for state in &self.states {
			if state.remaining > 0 && state.remaining < least {
				least = state.remaining;
			}
		}
		if least == 0 {
			log::warn!("no progress scheduled at tick {t}, stepping one tick");
			least = 1;
		}
		Ok(t + least)
	}

	/// Renders the whole top-level animation once through.
	///
	/// Animated cells are rewound first. A new frame is emitted whenever
	/// anything visible changes.
	pub fn render(&mut self) -> Result<Rendered, NitroError> {
		self.reset();
		let total = self.total_duration();
		let mut rendered = Rendered::default();
		let mut t = 0;
		while t < total {
			log::trace!("rendering tick {t}");
			rendered.frames.push(self.render_frame(t)?);
			let next = self.next_event(t)?;
			rendered.delays.push(next - t);
			self.advance(next - t);
			t = next;
		}
		log::debug!("animation: {} frames over {total} ticks", rendered.len());
		Ok(rendered)
	}
}
