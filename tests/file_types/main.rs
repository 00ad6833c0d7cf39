//! Integration tests for `nitro-rs` over synthetic archives.

mod animation;
mod archive;
mod support;
