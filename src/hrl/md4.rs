// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashrelay
// File: src/hrl/md4.rs
//
// MD4 implemented from scratch as per RFC 1320. Shares the padding rule and
// register layout with MD5 but runs 48 steps over three rounds.

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

	/// Round 2 additive constant, the square root of 2 in fixed point.
	pub const K2: u32 = 0x5a82_7999;
	/// Round 3 additive constant, the square root of 3 in fixed point.
	pub const K3: u32 = 0x6ed9_eba1;
}
use constants::*;

/// MD4 hasher state. Also the core of the NTLM digest, which feeds it
/// UTF-16LE bytes.
#[derive(Debug, Clone)]
pub struct Md4 {
	state: [u32; 4],
	message_length: u64,
	unprocessed_data: Vec<u8>,
}

impl Default for Md4 {
	fn default() -> Self {
		Self {
			state: [WORD_A, WORD_B, WORD_C, WORD_D],
			message_length: 0,
			unprocessed_data: Vec::new(),
		}
	}
}

impl Md4 {
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

		// G(X,Y,Z) = XY v XZ v YZ
		macro_rules! G {
			($x:ident, $y:ident, $z:ident) => {
				($x & $y) | ($x & $z) | ($y & $z)
			};
		}

		// H(X,Y,Z) = X xor Y xor Z
		macro_rules! H {
			($x:ident, $y:ident, $z:ident) => {
				$x ^ $y ^ $z
			};
		}

		/* Round 1: a = (a + F(b,c,d) + X[k]) <<< s. */
		macro_rules! r1 {
			($a:ident $b:ident $c:ident $d:ident $k:literal $s:literal) => {
				$a = $a
					.wrapping_add(F!($b, $c, $d))
					.wrapping_add(x[$k])
					.rotate_left($s);
			};
		}

		r1!(a b c d  0  3); r1!(d a b c  1  7); r1!(c d a b  2 11); r1!(b c d a  3 19);
		r1!(a b c d  4  3); r1!(d a b c  5  7); r1!(c d a b  6 11); r1!(b c d a  7 19);
		r1!(a b c d  8  3); r1!(d a b c  9  7); r1!(c d a b 10 11); r1!(b c d a 11 19);
		r1!(a b c d 12  3); r1!(d a b c 13  7); r1!(c d a b 14 11); r1!(b c d a 15 19);

		/* Round 2: a = (a + G(b,c,d) + X[k] + 5A827999) <<< s. */
		macro_rules! r2 {
			($a:ident $b:ident $c:ident $d:ident $k:literal $s:literal) => {
				$a = $a
					.wrapping_add(G!($b, $c, $d))
					.wrapping_add(x[$k])
					.wrapping_add(K2)
					.rotate_left($s);
			};
		}

		r2!(a b c d  0  3); r2!(d a b c  4  5); r2!(c d a b  8  9); r2!(b c d a 12 13);
		r2!(a b c d  1  3); r2!(d a b c  5  5); r2!(c d a b  9  9); r2!(b c d a 13 13);
		r2!(a b c d  2  3); r2!(d a b c  6  5); r2!(c d a b 10  9); r2!(b c d a 14 13);
		r2!(a b c d  3  3); r2!(d a b c  7  5); r2!(c d a b 11  9); r2!(b c d a 15 13);

		/* Round 3: a = (a + H(b,c,d) + X[k] + 6ED9EBA1) <<< s. */
		macro_rules! r3 {
			($a:ident $b:ident $c:ident $d:ident $k:literal $s:literal) => {
				$a = $a
					.wrapping_add(H!($b, $c, $d))
					.wrapping_add(x[$k])
					.wrapping_add(K3)
					.rotate_left($s);
			};
		}

		r3!(a b c d  0  3); r3!(d a b c  8  9); r3!(c d a b  4 11); r3!(b c d a 12 15);
		r3!(a b c d  2  3); r3!(d a b c 10  9); r3!(c d a b  6 11); r3!(b c d a 14 15);
		r3!(a b c d  1  3); r3!(d a b c  9  9); r3!(c d a b  5 11); r3!(b c d a 13 15);
		r3!(a b c d  3  3); r3!(d a b c 11  9); r3!(c d a b  7 11); r3!(b c d a 15 15);

		/* Increment each register by the value it had before this block. */
		self.state[0] = self.state[0].wrapping_add(a);
		self.state[1] = self.state[1].wrapping_add(b);
		self.state[2] = self.state[2].wrapping_add(c);
		self.state[3] = self.state[3].wrapping_add(d);
	}
}

impl HashMarker for Md4 {}

impl OutputSizeUser for Md4 {
	type OutputSize = U16;
}

impl Update for Md4 {
	fn update(&mut self, data: &[u8]) {
		self.consume(data);
	}
}

impl FixedOutput for Md4 {
	fn finalize_into(mut self, out: &mut Output<Self>) {
		self.finalize_state();
		self.write_digest(out);
	}
}

impl FixedOutputReset for Md4 {
	fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
		self.finalize_state();
		self.write_digest(out);
		Reset::reset(self);
	}
}

impl Reset for Md4 {
	fn reset(&mut self) {
		*self = Self::default();
	}
}

/// One-shot MD4 of a UTF-8 string, rendered as 32 lowercase hex characters.
pub fn md4_hex(input: &str) -> String {
	use digest::Digest;
	hex::encode(Md4::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use digest::Digest;

	// test vectors from https://www.rfc-editor.org/rfc/rfc1320
	#[test]
	fn test_md4_rfc_vectors() {
		let test_vectors = [
			("", "31d6cfe0d16ae931b73c59d7e0c089c0"),
			("a", "bde52cb31de33e46245e05fbdbd6fb24"),
			("abc", "a448017aaf21d8525fc10ae87aa6729d"),
			("message digest", "d9130a8164549fe818874806e1c7014b"),
			(
				"abcdefghijklmnopqrstuvwxyz",
				"d79e1c308aa5bbcdeea8ed63df412da9",
			),
			(
				"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
				"043f8582f241db351ce627e153e7f0e4",
			),
			(
				"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
				"e33b4ddc9c38f2199c3e7b164fcc0536",
			),
		];
		for (input, correct) in test_vectors {
			assert_eq!(md4_hex(input), correct);
		}
	}

	#[test]
	fn test_md4_split_updates_match_one_shot() {
		let mut hasher = Md4::default();
		Update::update(&mut hasher, b"mess");
		Update::update(&mut hasher, b"age digest");
		let split = hasher.finalize_fixed_reset();
		assert_eq!(hex::encode(split), md4_hex("message digest"));
	}

	#[test]
	fn test_md4_digest_is_little_endian() {
		// The digest serializes a,b,c,d least significant byte first; the
		// empty-message vector pins the register order.
		let digest = Md4::digest(b"");
		assert_eq!(digest[0], 0x31);
		assert_eq!(digest[15], 0xc0);
	}
}
