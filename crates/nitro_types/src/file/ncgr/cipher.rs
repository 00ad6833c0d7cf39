//! XOR key stream used to obscure some tile payloads.
//!
//! Each little-endian u16 pair is XORed with the low 16 bits of a running
//! seed, which then advances as `seed * 0x41C64E6D + 0x6073`. A trailing odd
//! byte is left alone.

/// Multiplier of the seed step.
pub const SEED_MULTIPLIER: u32 = 0x41C6_4E6D;

/// Increment of the seed step.
pub const SEED_INCREMENT: u32 = 0x6073;

/// Order in which pairs are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	/// First pair to last, seeded from the first pair.
	Forward,
	/// Last pair to first, seeded from the last pair.
	Reverse,
}

#[inline]
fn step(seed: u32) -> u32 {
	seed.wrapping_mul(SEED_MULTIPLIER).wrapping_add(SEED_INCREMENT)
}

#[inline]
fn xor_pair(pair: &mut [u8], seed: u32) {
	pair[0] ^= seed as u8;
	pair[1] ^= (seed >> 8) as u8;
}

/// XORs `data` with the key stream starting at `seed`.
pub fn apply(data: &mut [u8], seed: u16, direction: Direction) {
	let even = data.len() & !1;
	let pairs = data[..even].chunks_exact_mut(2);
	let mut seed = u32::from(seed);
	match direction {
		Direction::Forward => {
			for pair in pairs {
				xor_pair(pair, seed);
				seed = step(seed);
			}
		}
		Direction::Reverse => {
			for pair in pairs.rev() {
				xor_pair(pair, seed);
				seed = step(seed);
			}
		}
	}
}

/// Seed a decryption pass in `direction` would use, if there is a pair.
pub fn stored_seed(data: &[u8], direction: Direction) -> Option<u16> {
	let even = data.len() & !1;
	if even == 0 {
		return None;
	}
	let pair = match direction {
		Direction::Forward => &data[..2],
		Direction::Reverse => &data[even - 2..even],
	};
	Some(u16::from_le_bytes([pair[0], pair[1]]))
}
