// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashrelay
// File: src/hrl/app.rs
//
// Command line front end. Parses the submission mode and sink flags, then
// drives the submission pipeline.

use std::io::BufRead;

use clap::{crate_name, Arg};
use clap_complete::{generate, Generator, Shell};

use crate::hrl::hash::Algorithm;
use crate::hrl::sink::{LedgerSink, Sink, StdoutSink, WebhookSink};
use crate::hrl::submit::{submit, SubmitError};

const HELP_TEMPLATE: &str = "{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

fn algorithm_arg() -> Arg {
	Arg::new("algorithm")
		.short('a')
		.long("algorithm")
		.value_parser(clap::value_parser!(Algorithm))
		.help("Digest algorithm to apply")
		.required(true)
		.display_order(1)
}

fn ledger_arg() -> Arg {
	Arg::new("ledger")
		.short('l')
		.long("ledger")
		.value_name("FILE")
		.help("Append each digest to this file, one per line")
		.display_order(2)
}

fn webhook_arg() -> Arg {
	Arg::new("webhook")
		.short('w')
		.long("webhook")
		.value_name("URL")
		.help("POST each digest to this http(s) endpoint as JSON")
		.display_order(3)
}

fn build_cli() -> clap::Command {
	clap::Command::new(crate_name!())
		.color(clap::ColorChoice::Never)
		.help_template(HELP_TEMPLATE)
		.bin_name(crate_name!())
		.version(clap::crate_version!())
		.about("Hash strings with md5, md4 or ntlm and relay the digests")
		.subcommand_required(true)
		.arg_required_else_help(true)
		.subcommand(
			clap::command!("string")
				.about("Hash a single string")
				.display_order(1)
				.arg_required_else_help(true)
				.arg(
					Arg::new("CANDIDATE")
						.help("String to hash")
						.required(true),
				)
				.arg(algorithm_arg())
				.arg(ledger_arg())
				.arg(webhook_arg()),
		)
		.subcommand(
			clap::command!("stdio")
				.about("Hash every line read from stdin")
				.display_order(2)
				.arg(algorithm_arg())
				.arg(ledger_arg())
				.arg(webhook_arg()),
		)
		.subcommand(
			clap::command!("generate-auto-completions")
				.about("Generate shell completions")
				.arg(
					Arg::new("SHELL")
						.required(true)
						.value_parser(clap::value_parser!(Shell))
						.help("Shell to generate completions for"),
				),
		)
}

/// Builds the sink chain from the common flags. Without a ledger or webhook
/// flag the digest goes to stdout.
fn collect_sinks(
	matches: &clap::ArgMatches,
) -> Result<Vec<Box<dyn Sink>>, Box<dyn std::error::Error>> {
	let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
	if let Some(path) = matches.get_one::<String>("ledger") {
		sinks.push(Box::new(LedgerSink::new(path)));
	}
	if let Some(url) = matches.get_one::<String>("webhook") {
		sinks.push(Box::new(WebhookSink::new(url)?));
	}
	if sinks.is_empty() {
		sinks.push(Box::new(StdoutSink));
	}
	Ok(sinks)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
	let capp = build_cli();
	let m = capp.get_matches();

	match m.subcommand() {
		Some(("string", s)) => {
			let candidate = match s.get_one::<String>("CANDIDATE") {
				Some(c) => c,
				None => {
					eprintln!("Please enter a value.");
					std::process::exit(1);
				}
			};
			let algorithm = match s.get_one::<Algorithm>("algorithm") {
				Some(a) => *a,
				None => panic!("Algorithm not found."),
			};
			let mut sinks = collect_sinks(s)?;
			match submit(candidate, algorithm, &mut sinks) {
				Ok(_) => {}
				Err(SubmitError::InvalidInput) => {
					eprintln!("Please enter a value.");
					std::process::exit(1);
				}
				Err(err) => return Err(Box::new(err)),
			}
		}
		Some(("stdio", s)) => {
			let algorithm = match s.get_one::<Algorithm>("algorithm") {
				Some(a) => *a,
				None => panic!("Algorithm not found."),
			};
			let mut sinks = collect_sinks(s)?;
			let stdin = std::io::stdin();
			for line in stdin.lock().lines() {
				let line = match line {
					Ok(l) => l,
					Err(e) => {
						eprintln!("Error: {}", e);
						std::process::exit(1);
					}
				};
				match submit(&line, algorithm, &mut sinks) {
					Ok(_) => {}
					Err(SubmitError::InvalidInput) => {
						eprintln!("Please enter a value.");
					}
					Err(err) => return Err(Box::new(err)),
				}
			}
		}
		Some(("generate-auto-completions", s)) => {
			if let Some(gen) = s.get_one::<Shell>("SHELL") {
				let mut capp = build_cli();
				print_completions(*gen, &mut capp);
			};
		}
		_ => {}
	}
	Ok(())
}

fn print_completions<G: Generator>(gen: G, cmd: &mut clap::Command) {
	generate(
		gen,
		cmd,
		cmd.get_name().to_string(),
		&mut std::io::stdout(),
	);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_cli_definition_is_consistent() {
		build_cli().debug_assert();
	}

	#[test]
	fn test_string_subcommand_parses_flags() {
		let m = build_cli()
			.try_get_matches_from([
				"hashrelay",
				"string",
				"password",
				"-a",
				"md5",
				"--ledger",
				"hashes.txt",
			])
			.expect("valid invocation");
		let (name, s) = m.subcommand().expect("subcommand present");
		assert_eq!(name, "string");
		assert_eq!(
			s.get_one::<String>("CANDIDATE").map(String::as_str),
			Some("password")
		);
		assert_eq!(
			s.get_one::<Algorithm>("algorithm").copied(),
			Some(Algorithm::Md5)
		);
		assert_eq!(
			s.get_one::<String>("ledger").map(String::as_str),
			Some("hashes.txt")
		);
	}

	#[test]
	fn test_string_subcommand_requires_algorithm() {
		assert!(build_cli()
			.try_get_matches_from(["hashrelay", "string", "password"])
			.is_err());
	}

	#[test]
	fn test_collect_sinks_defaults_to_stdout() {
		let m = build_cli()
			.try_get_matches_from(["hashrelay", "stdio", "-a", "ntlm"])
			.expect("valid invocation");
		let (_, s) = m.subcommand().expect("subcommand present");
		let sinks = collect_sinks(s).expect("sink chain builds");
		assert_eq!(sinks.len(), 1);
	}

	#[test]
	fn test_collect_sinks_rejects_bad_webhook_url() {
		let m = build_cli()
			.try_get_matches_from([
				"hashrelay",
				"stdio",
				"-a",
				"md4",
				"--webhook",
				"ftp://example.com/hook",
			])
			.expect("parse succeeds, validation happens later");
		let (_, s) = m.subcommand().expect("subcommand present");
		assert!(collect_sinks(s).is_err());
	}
}
