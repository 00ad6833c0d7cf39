//! Prelude module for `nitro_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use nitro_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let config = RenderConfig::fast();
//! let narc = NarcFile::open("pokegra.narc");
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	Acell,
	BitDepth,
	CipherDirection,
	Frame,
	Header,
	LzConfig,
	Mobj,

	// Resource files
	NanrFile,
	NarcFile,
	NcerFile,
	NcgrFile,
	NclrFile,
	// Errors
	NitroError,
	NmarFile,
	NmcrFile,

	Obj,
	ResourceKind,
	Rgb15,
};

// Rendering types
#[doc(inline)]
pub use crate::render::{
	Animation, Canvas, Color, Image, IndexedImage, Palette, PlaybackState, Point, Rect, RenderConfig, Rendered,
	Resources,
};

// Re-export the modules for advanced usage
#[doc(inline)]
pub use crate::{file, render};
