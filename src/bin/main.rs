// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashrelay
// File: main.rs

use hashrelay::hrl::app;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	app::run()?;
	Ok(())
}
