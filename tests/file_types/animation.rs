//! End-to-end animation rendering from one archive.

use anyhow::Result;
use nitro_rs::prelude::*;

use crate::support;

/// Archive layout shared by the tests: tiles, palette, cells, NANR, NMCR, NMAR.
fn sprite_archive(acells: &[&[(u16, u16)]], top: &[(u16, u16)]) -> Vec<u8> {
	let mut data = vec![0x55; 32];
	data.extend_from_slice(&[0x66; 32]);
	let colors: Vec<u16> = (0..16).map(|i| 0x7FFF - i).collect();
	// two 8x8 cells centered on their origin, one per tile
	let cells = support::cells(&[&[[0x00FC, 0x01FC, 0]], &[[0x00FC, 0x01FC, 1]]]);
	support::archive(&[
		&support::lz10(&support::tiles(2, 1, &data)),
		&support::palette(&colors),
		&cells,
		&support::bank(b"RNAN", acells),
		&support::multi_cell(&[(0, -16, -8), (1, 16, -8)]),
		&support::lz10(&support::bank(b"RAMN", &[top])),
	])
}

fn open(narc: &NarcFile) -> Result<(NcgrFile, NclrFile, NcerFile, NanrFile, NmcrFile, NmarFile)> {
	Ok((
		narc.open_as_tiles(0)?,
		narc.open_as_palette(1)?,
		narc.open_as_cell_bank(2)?,
		narc.open_as_animation_bank(3)?,
		narc.open_as_multicell_bank(4)?,
		narc.open_as_multicell_animation_bank(5)?,
	))
}

#[test_log::test]
fn test_render_animation() -> Result<()> {
	// left object alternates cells every 6 ticks, right one every 8
	let narc = NarcFile::from_bytes(&sprite_archive(&[&[(0, 6), (1, 6)], &[(1, 8), (0, 8)]], &[(0, 24)]))?;
	let (tiles, palette, cells, animations, multi_cells, multi_cell_animations) = open(&narc)?;
	let mut animation = Animation::new(
		Resources {
			tiles: &tiles,
			palette: &palette,
			cells: &cells,
			animations: &animations,
			multi_cells: &multi_cells,
			multi_cell_animations: &multi_cell_animations,
		},
		RenderConfig::default(),
	)?;
	assert_eq!(animation.total_duration(), 24);

	let rendered = animation.render()?;
	// changes at 6, 8, 12, 16, 18
	assert_eq!(rendered.delays, vec![6, 2, 4, 4, 2, 6]);
	assert_eq!(rendered.total_ticks(), 24);
	assert_eq!(rendered.delays_centiseconds().iter().sum::<u32>(), 40);

	// objects sit at (80, 88) and (112, 88)
	let expected = [(5, 6), (6, 6), (6, 5), (5, 5), (5, 6), (6, 6)];
	for (frame, (left, right)) in rendered.frames.iter().zip(expected) {
		assert_eq!((frame.width(), frame.height()), (192, 96));
		assert_eq!(frame.index_at(80, 88), left);
		assert_eq!(frame.index_at(112, 88), right);
		assert_eq!(frame.index_at(96, 88), 0);
	}
	Ok(())
}

#[test_log::test]
fn test_rgba_export() -> Result<()> {
	let narc = NarcFile::from_bytes(&sprite_archive(&[&[(0, 1)], &[(1, 1)]], &[(0, 2)]))?;
	let (tiles, palette, cells, animations, multi_cells, multi_cell_animations) = open(&narc)?;
	let frame = Animation::new(
		Resources {
			tiles: &tiles,
			palette: &palette,
			cells: &cells,
			animations: &animations,
			multi_cells: &multi_cells,
			multi_cell_animations: &multi_cell_animations,
		},
		RenderConfig::fast(),
	)?
	.render_frame(0)?;

	let rgba = frame.to_rgba_image();
	assert_eq!(rgba.get_pixel(0, 0).0[3], 0);
	let c = rgba.get_pixel(80, 88).0;
	assert_eq!(c[3], 255);
	assert_eq!(Color::new(c[0], c[1], c[2], c[3]), frame.color_at(80, 88));
	Ok(())
}
