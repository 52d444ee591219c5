// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashrelay
// File: src/hrl/pad.rs
//
// Merkle-Damgard padding shared by the MD4 and MD5 cores (RFC 1320/1321).

/// Returns the padding tail for a message of `byte_len` bytes: a single
/// `0x80`, zero bytes until the total length is 56 (mod 64), then the bit
/// length as a 64-bit little-endian integer.
///
/// The length field is `byte_len * 8` with wrapping multiplication, matching
/// the reference behavior of encoding only the low bits of the bit count.
/// Exact for every input below 2^61 bytes, which covers anything this crate
/// will ever see.
pub fn md_padding(byte_len: u64) -> Vec<u8> {
	let rem = (byte_len % 64) as usize;
	let zeros = if rem < 56 { 55 - rem } else { 119 - rem };
	let mut tail = Vec::with_capacity(zeros + 9);
	tail.push(0x80);
	tail.resize(1 + zeros, 0x00);
	tail.extend_from_slice(&byte_len.wrapping_mul(8).to_le_bytes());
	tail
}
