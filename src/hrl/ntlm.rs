// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashrelay
// File: src/hrl/ntlm.rs

//! NTLM (NT hash) support: unsalted MD4 over the UTF-16LE bytes of the
//! input. Reproduced here for the demo's educational purpose; this is a
//! known-weak legacy format, not a recommendation.

use digest::Digest;

use crate::hrl::md4::Md4;

/// Encodes a string as UTF-16LE: each code unit emitted least significant
/// byte first.
///
/// Code points beyond the Basic Multilingual Plane are emitted as surrogate
/// pairs, i.e. the same code-unit stream a UTF-16 host string would hold.
/// That matches the reference NTLM convention and is the contract here, even
/// though it means such inputs hash their surrogate halves rather than a
/// single 32-bit code point.
pub fn utf16le_bytes(input: &str) -> Vec<u8> {
	let mut bytes = Vec::with_capacity(input.len() * 2);
	for unit in input.encode_utf16() {
		bytes.extend_from_slice(&unit.to_le_bytes());
	}
	bytes
}

/// One-shot NT hash of a string, rendered as 32 lowercase hex characters.
pub fn ntlm_hex(input: &str) -> String {
	hex::encode(Md4::digest(utf16le_bytes(input)))
}
