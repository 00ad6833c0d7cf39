//! File type support for Nitro graphics resources.

mod error;

pub mod abnk;
pub mod chunk;
pub mod lz;
pub mod nanr;
pub mod narc;
pub mod ncer;
pub mod ncgr;
pub mod nclr;
pub mod nmar;
pub mod nmcr;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export unified error type
pub use error::{NitroError, ResourceKind};

// Re-export main file types
pub use abnk::{Acell, Frame};
pub use chunk::Header;
pub use lz::LzConfig;
pub use nanr::File as NanrFile;
pub use narc::{Entry as NarcEntry, File as NarcFile};
pub use ncer::{File as NcerFile, Obj};
pub use ncgr::{BitDepth, Direction as CipherDirection, File as NcgrFile};
pub use nclr::{File as NclrFile, Rgb15};
pub use nmar::File as NmarFile;
pub use nmcr::{File as NmcrFile, Mobj};
