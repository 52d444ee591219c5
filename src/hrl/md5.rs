// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashrelay
// File: src/hrl/md5.rs
//
// MD5 implemented from scratch as per RFC 1321. All additions wrap mod 2^32.

use std::mem;

use digest::{
	consts::U16, FixedOutput, FixedOutputReset, HashMarker, Output,
	OutputSizeUser, Reset, Update,
};

use crate::hrl::pad::md_padding;

pub mod constants {
	pub const WORD_A: u32 = 0x6745_2301;
	pub const WORD_B: u32 = 0xefcd_ab89;
	pub const WORD_C: u32 = 0x98ba_dcfe;
	pub const WORD_D: u32 = 0x1032_5476;

	/// The 64 sine-derived step constants, T[i] = floor(2^32 * |sin(i + 1)|).
	#[rustfmt::skip]
	pub const T: [u32; 64] = [
		0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee,
		0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
		0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be,
		0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,

		0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa,
		0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
		0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed,
		0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,

		0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c,
		0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
		0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05,
		0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,

		0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039,
		0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
		0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1,
		0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
	];
}
use constants::*;

/// MD5 hasher state. Fresh state per digest computation; nothing is shared
/// between invocations.
#[derive(Debug, Clone)]
pub struct Md5 {
	state: [u32; 4],
	message_length: u64,
	unprocessed_data: Vec<u8>,
}

impl Default for Md5 {
	fn default() -> Self {
		Self {
			state: [WORD_A, WORD_B, WORD_C, WORD_D],
			message_length: 0,
			unprocessed_data: Vec::new(),
		}
	}
}

impl Md5 {
	fn consume(&mut self, data: &[u8]) {
		self.unprocessed_data.extend_from_slice(data);
		let whole =
			self.unprocessed_data.len() - self.unprocessed_data.len() % 64;
		let buffered = mem::take(&mut self.unprocessed_data);
		let (blocks, remaining) = buffered.split_at(whole);
		for block in blocks.chunks_exact(64) {
			self.process_block(block);
		}
		self.message_length = self.message_length.wrapping_add(whole as u64);
		self.unprocessed_data.extend_from_slice(remaining);
	}

	fn finalize_state(&mut self) {
		let total =
			self.message_length + self.unprocessed_data.len() as u64;
		let tail = md_padding(total);
		self.consume(&tail);
		debug_assert!(self.unprocessed_data.is_empty());
	}

	fn write_digest(&self, out: &mut [u8]) {
		for (chunk, word) in out.chunks_exact_mut(4).zip(self.state.iter()) {
			chunk.copy_from_slice(&word.to_le_bytes());
		}
	}

	#[rustfmt::skip]
	fn process_block(&mut self, block: &[u8]) {
		let mut x = [0u32; 16];
		for (word, chunk) in x.iter_mut().zip(block.chunks_exact(4)) {
			*word = u32::from_le_bytes(chunk.try_into().expect("4-byte chunk"));
		}

		let [mut a, mut b, mut c, mut d] = self.state;

		// F(X,Y,Z) = XY v not(X) Z
		macro_rules! F {
			($x:ident, $y:ident, $z:ident) => {
				($x & $y) | (!$x & $z)
			};
		}

		// G(X,Y,Z) = XZ v Y not(Z)
		macro_rules! G {
			($x:ident, $y:ident, $z:ident) => {
				($x & $z) | ($y & !$z)
			};
		}

		// H(X,Y,Z) = X xor Y xor Z
		macro_rules! H {
			($x:ident, $y:ident, $z:ident) => {
				$x ^ $y ^ $z
			};
		}

		// I(X,Y,Z) = Y xor (X v not(Z))
		macro_rules! I {
			($x:ident, $y:ident, $z:ident) => {
				$y ^ ($x | !$z)
			};
		}

		/* Each step computes a = b + ((a + f(b,c,d) + X[k] + T[i]) <<< s). */
		macro_rules! step {
			($f:ident, $a:ident $b:ident $c:ident $d:ident, $k:literal, $s:literal, $i:literal) => {
				$a = $b.wrapping_add(
					$a.wrapping_add($f!($b, $c, $d))
						.wrapping_add(x[$k])
						.wrapping_add(T[$i])
						.rotate_left($s),
				);
			};
		}

		/* Round 1. */
		step!(F, a b c d,  0,  7,  0); step!(F, d a b c,  1, 12,  1); step!(F, c d a b,  2, 17,  2); step!(F, b c d a,  3, 22,  3);
		step!(F, a b c d,  4,  7,  4); step!(F, d a b c,  5, 12,  5); step!(F, c d a b,  6, 17,  6); step!(F, b c d a,  7, 22,  7);
		step!(F, a b c d,  8,  7,  8); step!(F, d a b c,  9, 12,  9); step!(F, c d a b, 10, 17, 10); step!(F, b c d a, 11, 22, 11);
		step!(F, a b c d, 12,  7, 12); step!(F, d a b c, 13, 12, 13); step!(F, c d a b, 14, 17, 14); step!(F, b c d a, 15, 22, 15);

		/* Round 2. */
		step!(G, a b c d,  1,  5, 16); step!(G, d a b c,  6,  9, 17); step!(G, c d a b, 11, 14, 18); step!(G, b c d a,  0, 20, 19);
		step!(G, a b c d,  5,  5, 20); step!(G, d a b c, 10,  9, 21); step!(G, c d a b, 15, 14, 22); step!(G, b c d a,  4, 20, 23);
		step!(G, a b c d,  9,  5, 24); step!(G, d a b c, 14,  9, 25); step!(G, c d a b,  3, 14, 26); step!(G, b c d a,  8, 20, 27);
		step!(G, a b c d, 13,  5, 28); step!(G, d a b c,  2,  9, 29); step!(G, c d a b,  7, 14, 30); step!(G, b c d a, 12, 20, 31);

		/* Round 3. */
		step!(H, a b c d,  5,  4, 32); step!(H, d a b c,  8, 11, 33); step!(H, c d a b, 11, 16, 34); step!(H, b c d a, 14, 23, 35);
		step!(H, a b c d,  1,  4, 36); step!(H, d a b c,  4, 11, 37); step!(H, c d a b,  7, 16, 38); step!(H, b c d a, 10, 23, 39);
		step!(H, a b c d, 13,  4, 40); step!(H, d a b c,  0, 11, 41); step!(H, c d a b,  3, 16, 42); step!(H, b c d a,  6, 23, 43);
		step!(H, a b c d,  9,  4, 44); step!(H, d a b c, 12, 11, 45); step!(H, c d a b, 15, 16, 46); step!(H, b c d a,  2, 23, 47);

		/* Round 4. */
		step!(I, a b c d,  0,  6, 48); step!(I, d a b c,  7, 10, 49); step!(I, c d a b, 14, 15, 50); step!(I, b c d a,  5, 21, 51);
		step!(I, a b c d, 12,  6, 52); step!(I, d a b c,  3, 10, 53); step!(I, c d a b, 10, 15, 54); step!(I, b c d a,  1, 21, 55);
		step!(I, a b c d,  8,  6, 56); step!(I, d a b c, 15, 10, 57); step!(I, c d a b,  6, 15, 58); step!(I, b c d a, 13, 21, 59);
		step!(I, a b c d,  4,  6, 60); step!(I, d a b c, 11, 10, 61); step!(I, c d a b,  2, 15, 62); step!(I, b c d a,  9, 21, 63);

		/* Increment each register by the value it had before this block. */
		self.state[0] = self.state[0].wrapping_add(a);
		self.state[1] = self.state[1].wrapping_add(b);
		self.state[2] = self.state[2].wrapping_add(c);
		self.state[3] = self.state[3].wrapping_add(d);
	}
}

impl HashMarker for Md5 {}

impl OutputSizeUser for Md5 {
	type OutputSize = U16;
}

impl Update for Md5 {
	fn update(&mut self, data: &[u8]) {
		self.consume(data);
	}
}

impl FixedOutput for Md5 {
	fn finalize_into(mut self, out: &mut Output<Self>) {
		self.finalize_state();
		self.write_digest(out);
	}
}

impl FixedOutputReset for Md5 {
	fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
		self.finalize_state();
		self.write_digest(out);
		Reset::reset(self);
	}
}

impl Reset for Md5 {
	fn reset(&mut self) {
		*self = Self::default();
	}
}

/// One-shot MD5 of a UTF-8 string, rendered as 32 lowercase hex characters.
pub fn md5_hex(input: &str) -> String {
	use digest::Digest;
	hex::encode(Md5::digest(input.as_bytes()))
}
