//! This module is separated into its own crate so that the facade stays thin, and should not be used directly.

/// `use nitro::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export nitro_types for convenience
pub use nitro_types;

// Re-export commonly used types at crate root
pub use nitro_types::file::{NarcFile, NitroError, ResourceKind};
pub use nitro_types::render::{Animation, RenderConfig, Rendered, Resources};
