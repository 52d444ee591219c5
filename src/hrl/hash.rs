// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashrelay
// File: src/hrl/hash.rs
//
// Algorithm selection and digest dispatch for submitted strings.

use digest::DynDigest;

use crate::hrl::md4::Md4;
use crate::hrl::md5::Md5;
use crate::hrl::ntlm::utf16le_bytes;

/// Digest algorithms accepted on submission.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
	Md5,
	Md4,
	Ntlm,
}

impl Algorithm {
	pub fn name(&self) -> &'static str {
		match self {
			Algorithm::Md5 => "md5",
			Algorithm::Md4 => "md4",
			Algorithm::Ntlm => "ntlm",
		}
	}
}

/// Hashes candidate strings with a selected algorithm.
///
/// Owns the input-encoding rule along with the compression core: MD5 and MD4
/// take the UTF-8 bytes of the candidate, NTLM takes UTF-16LE bytes and runs
/// them through MD4. Each call is independent; the inner state is reset
/// after every digest.
pub struct Digester {
	digest: Box<dyn DynDigest>,
	utf16: bool,
}

impl Digester {
	pub fn new(algorithm: Algorithm) -> Self {
		match algorithm {
			Algorithm::Md5 => Self {
				digest: Box::new(Md5::default()),
				utf16: false,
			},
			Algorithm::Md4 => Self {
				digest: Box::new(Md4::default()),
				utf16: false,
			},
			Algorithm::Ntlm => Self {
				digest: Box::new(Md4::default()),
				utf16: true,
			},
		}
	}

	pub fn process_string(&mut self, candidate: &str) -> Vec<u8> {
		if self.utf16 {
			self.digest.update(&utf16le_bytes(candidate));
		} else {
			self.digest.update(candidate.as_bytes());
		}
		self.digest.finalize_reset().to_vec()
	}

	/// Digest of `candidate` as 32 lowercase hex characters.
	pub fn hex_string(&mut self, candidate: &str) -> String {
		hex::encode(self.process_string(candidate))
	}
}
