//! `nitro-rs` extracts sprites and animations from Nitro resource archives.
//!
//! See [`nitro_types`] for the file formats and the renderer.
pub use nitro_internal::*;
