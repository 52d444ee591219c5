// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashrelay
// File: src/lib.rs

pub mod hrl {
	pub mod app;
	pub mod hash;
	pub mod md4;
	pub mod md5;
	pub mod ntlm;
	pub mod pad;
	pub mod sink;
	pub mod submit;
}
