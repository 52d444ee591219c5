// SPDX-License-Identifier: MIT OR Apache-2.0
use digest::Digest;
use hashrelay::hrl::md4::Md4;
use hashrelay::hrl::md5::Md5;
use hashrelay::hrl::ntlm::{ntlm_hex, utf16le_bytes};
use hex_literal::hex;

const PHRASE: &str = "Jeder wackere Bayer vertilgt bequem zwo Pfund Kalbshaxen.";

#[test]
fn lib_md5_hash() {
	let mut hasher = Md5::new();
	hasher.update(PHRASE.as_bytes());
	let result = hasher.finalize();
	assert_eq!(result[..], hex!("ad05bcfc97af63bf7ebf568220b19d7e"));
}

#[test]
fn lib_md4_hash() {
	let mut hasher = Md4::new();
	hasher.update(PHRASE.as_bytes());
	let result = hasher.finalize();
	assert_eq!(result[..], hex!("18744ab6124baa392ee1cc9b1552a403"));
}

#[test]
fn lib_md5_password_hash() {
	let result = Md5::digest(b"password");
	assert_eq!(result[..], hex!("5f4dcc3b5aa765d61d8327deb882cf99"));
}

#[test]
fn lib_ntlm_password_hash() {
	let mut hasher = Md4::new();
	hasher.update(&utf16le_bytes("password"));
	let result = hasher.finalize();
	assert_eq!(result[..], hex!("8846f7eaee8fb117ad06bdd830b7586c"));
	assert_eq!(ntlm_hex("password"), "8846f7eaee8fb117ad06bdd830b7586c");
}

#[test]
fn lib_md5_multi_block_message() {
	// 80 bytes span two compression blocks once padded.
	let long = "1234567890".repeat(8);
	let result = Md5::digest(long.as_bytes());
	assert_eq!(result[..], hex!("57edf4a22be3c955ac49da2e2107b67a"));
}

#[test]
fn lib_md5_incremental_matches_one_shot() {
	let mut hasher = Md5::new();
	for chunk in PHRASE.as_bytes().chunks(7) {
		hasher.update(chunk);
	}
	assert_eq!(hasher.finalize(), Md5::digest(PHRASE.as_bytes()));
}

#[test]
fn lib_md4_incremental_matches_one_shot() {
	let mut hasher = Md4::new();
	for chunk in PHRASE.as_bytes().chunks(5) {
		hasher.update(chunk);
	}
	assert_eq!(hasher.finalize(), Md4::digest(PHRASE.as_bytes()));
}
