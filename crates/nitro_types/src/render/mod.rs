//! Compositing and animation playback.
//!
//! Cells are composed onto [`IndexedImage`]s that all share one
//! [`Palette`], so most drawing reduces to copying palette indices. The
//! [`Animation`] engine walks the NMAR / NMCR / NANR / NCER hierarchy and
//! emits one frame per visible change.

mod animation;
mod canvas;
mod color;
mod config;
mod draw;
mod geom;
mod tiled;


pub use animation::{Animation, PlaybackState, Rendered, Resources, TICKS_PER_SECOND};
pub use canvas::{Canvas, Image, IndexedImage, RgbaCanvas, same_palette};
pub use color::{Color, Palette, Rgba64, rgb15_to_color};
pub use config::{DEFAULT_HEIGHT, DEFAULT_WIDTH, RenderConfig};
pub use draw::{draw_under, rotate, scale2x, scale8x};
pub use geom::{Point, Rect};
pub use tiled::{TileLayout, TileView};
