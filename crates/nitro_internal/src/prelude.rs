//! Prelude module for `nitro_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use nitro_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let config = RenderConfig::default();
//! assert_eq!(config.bounds(), Rect::new(0, 0, 192, 96));
//! let point = Point::new(0, -20).rotate(0.5);
//! assert_eq!(point, Point::new(0, 20));
//! ```

// Re-export everything from nitro_types::prelude
#[doc(inline)]
pub use nitro_types::prelude::*;

// Re-export the entire nitro_types module for advanced usage
#[doc(inline)]
pub use nitro_types;
