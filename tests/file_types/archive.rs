//! Archive and cell rendering checks.

use std::sync::Arc;

use anyhow::Result;
use nitro_rs::nitro_types::file::{NarcFile, NcerFile, NcgrFile, NclrFile, NitroError, ResourceKind, lz};
use nitro_rs::nitro_types::render::Image;

use crate::support;

fn gray_ramp() -> Vec<u16> {
	(0..16).map(|i| i * 0x0421).collect()
}

/// Square 8x8 OBJ at (0, 0) using tile 0.
const SQUARE_AT_ORIGIN: [u16; 3] = [0x0000, 0x0000, 0x0000];

#[test_log::test]
fn test_render_cell_from_archive() -> Result<()> {
	let bytes = support::archive(&[
		&support::tiles(1, 1, &[0; 32]),
		&support::palette(&gray_ramp()),
		&support::cells(&[&[SQUARE_AT_ORIGIN]]),
	]);
	let narc = NarcFile::from_bytes(&bytes)?;
	assert_eq!(narc.file_count(), 3);

	let tiles = narc.open_as_tiles(0)?;
	let palette = Arc::new(narc.open_as_palette(1)?.sub_palette(0).with_transparent_zero());
	let cells = narc.open_as_cell_bank(2)?;
	assert_eq!(cells.len(), 1);

	let cell = cells.render_cell(0, &tiles, &palette);
	assert_eq!((cell.width(), cell.height()), (8, 8));
	assert!(cell.pixels().iter().all(|&i| i == 0));

	let rgba = cell.to_rgba_image();
	assert_eq!(rgba.dimensions(), (8, 8));
	assert!(rgba.pixels().all(|p| p.0[3] == 0));
	Ok(())
}

#[test_log::test]
fn test_compressed_entries() -> Result<()> {
	let tiles = support::tiles(1, 1, &[0x21; 32]);
	let packed = support::lz10(&tiles);
	assert!(lz::is_compressed(&packed));

	let narc = NarcFile::from_bytes(&support::archive(&[&packed, &tiles]))?;
	assert_eq!(narc.open_raw(0)?, packed.as_slice());
	assert_eq!(narc.open_entry(0)?.as_ref(), tiles.as_slice());

	let a = narc.open_as_tiles(0)?;
	let b = narc.open_as_tiles(1)?;
	assert_eq!(a, b);
	assert_eq!(&a.pixels()[..4], &[1, 2, 1, 2]);
	Ok(())
}

#[test_log::test]
fn test_wrong_entry_kind() -> Result<()> {
	let narc = NarcFile::from_bytes(&support::archive(&[&support::palette(&gray_ramp())]))?;
	let err = narc.open_as_tiles(0).unwrap_err();
	assert!(matches!(
		err,
		NitroError::BadMagic {
			kind: ResourceKind::Ncgr,
			..
		}
	));
	assert!(matches!(narc.open_entry(1).unwrap_err(), NitroError::IndexOutOfRange { .. }));
	Ok(())
}

#[test_log::test]
fn test_truncated_archive() {
	let mut bytes = support::archive(&[&[1, 2, 3, 4]]);
	bytes.truncate(bytes.len() - 2);
	let err = NarcFile::from_bytes(&bytes).unwrap_err();
	assert!(matches!(err, NitroError::UnexpectedEof { .. }));
}

#[test_log::test]
fn test_open_from_disk() -> Result<()> {
	let path = std::env::temp_dir().join(format!("nitro-rs-test-{}.narc", std::process::id()));
	std::fs::write(&path, support::archive(&[b"data"]))?;
	let narc = NarcFile::open(&path);
	std::fs::remove_file(&path)?;
	assert_eq!(narc?.open_raw(0)?, b"data");

	let missing = NarcFile::open(path.with_extension("missing")).unwrap_err();
	assert!(matches!(missing, NitroError::Io(_)));
	Ok(())
}

#[test]
fn test_cell_with_opaque_tiles() {
	let mut data = vec![0x33; 32];
	data.extend_from_slice(&[0x44; 32]);
	let tiles = NcgrFile::from_bytes(&support::tiles(2, 1, &data)).unwrap();
	let palette = Arc::new(
		NclrFile::from_bytes(&support::palette(&gray_ramp()))
			.unwrap()
			.sub_palette(0)
			.with_transparent_zero(),
	);
	// wide 16x8 at (-8, -4), then a square 8x8 at (4, 0) using tile 0
	let cells = NcerFile::from_bytes(&support::cells(&[&[
		[0x40FC, 0x01F8, 0],
		[0x0000, 0x0004, 0],
	]]))
	.unwrap();
	let cell = cells.render_cell(0, &tiles, &palette);
	assert_eq!(cell.bounds().min.x, -8);
	assert_eq!(cell.bounds().max.y, 8);
	// the first OBJ stays on top where the two overlap
	assert_eq!(cell.index_at(5, 2), 4);
	assert_eq!(cell.index_at(-8, -4), 3);
	// the square reaches below the wide OBJ
	assert_eq!(cell.index_at(5, 6), 3);
	// gap in the union stays transparent
	assert_eq!(cell.index_at(-8, 6), 0);
}
