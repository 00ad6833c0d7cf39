//! This crate provides core data types and file format support for the `nitro-rs` project.
//!
//! # File Formats
//!
//! - **NARC**: Archives holding the other resources, optionally LZ-compressed
//! - **NCGR**: Tile pixels, 4 or 8 bits per pixel
//! - **NCLR**: RGB555 palettes, split into 16-color sub-palettes
//! - **NCER**: Cells, each a list of hardware sprites (OBJs)
//! - **NANR** / **NMAR**: Animation banks of timed frames
//! - **NMCR**: Multi-cells placing several animated cells together
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use nitro_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let narc = NarcFile::open("a/0/2/0")?;
//! let tiles = narc.open_as_tiles(0)?;
//! let palette = narc.open_as_palette(1)?;
//! let cells = narc.open_as_cell_bank(2)?;
//! let animations = narc.open_as_animation_bank(3)?;
//! let multi_cells = narc.open_as_multicell_bank(4)?;
//! let multi_cell_animations = narc.open_as_multicell_animation_bank(5)?;
//!
//! let resources = Resources {
//! 	tiles: &tiles,
//! 	palette: &palette,
//! 	cells: &cells,
//! 	animations: &animations,
//! 	multi_cells: &multi_cells,
//! 	multi_cell_animations: &multi_cell_animations,
//! };
//! let mut animation = Animation::new(resources, RenderConfig::default())?;
//! let rendered = animation.render()?;
//! println!("{} frames", rendered.len());
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use nitro_types::file::{NcerFile, NcgrFile, NclrFile};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tiles = NcgrFile::open("sprite.ncgr")?;
//! let palette = Arc::new(NclrFile::open("sprite.nclr")?.sub_palette(0).with_transparent_zero());
//! let cell = NcerFile::open("sprite.ncer")?.render_cell(0, &tiles, &palette);
//! cell.to_rgba_image().save("cell.png")?;
//! # Ok(())
//! # }
//! ```

pub mod file;

pub mod render;

/// `use nitro_types::prelude::*;` to import commonly used items.
pub mod prelude;
