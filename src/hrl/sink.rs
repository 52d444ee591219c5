// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashrelay
// File: src/hrl/sink.rs

//! Downstream delivery of digests. Every sink consumes the hex digest
//! verbatim and never sees the original submission.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::json;
use url::Url;

/// A destination for a computed digest.
pub trait Sink {
	fn deliver(&mut self, hash: &str) -> Result<(), SinkError>;
}

/// Error type for sink delivery failures.
#[derive(Debug)]
pub enum SinkError {
	Io {
		source: std::io::Error,
		path: PathBuf,
	},
	InvalidUrl {
		url: String,
		reason: String,
	},
	Http {
		source: reqwest::Error,
	},
	Rejected {
		status: u16,
	},
}

impl fmt::Display for SinkError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Io { source, path } => {
				write!(
					f,
					"could not append to ledger {}: {}",
					path.display(),
					source
				)
			}
			Self::InvalidUrl { url, reason } => {
				write!(f, "webhook URL {} is not usable: {}", url, reason)
			}
			Self::Http { source } => {
				write!(f, "webhook request failed: {}", source)
			}
			Self::Rejected { status } => {
				write!(f, "webhook endpoint answered with status {}", status)
			}
		}
	}
}

impl std::error::Error for SinkError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io { source, .. } => Some(source),
			Self::Http { source } => Some(source),
			_ => None,
		}
	}
}

/// Prints the digest on its own line. The CLI default when no other sink is
/// requested.
pub struct StdoutSink;

impl Sink for StdoutSink {
	fn deliver(&mut self, hash: &str) -> Result<(), SinkError> {
		println!("{}", hash);
		Ok(())
	}
}

/// Appends `hash + "\n"` to a growing plaintext ledger, creating the file on
/// first use. No header, no metadata, one digest per line.
pub struct LedgerSink {
	path: PathBuf,
}

impl LedgerSink {
	pub fn new(path: impl AsRef<Path>) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
		}
	}
}

impl Sink for LedgerSink {
	fn deliver(&mut self, hash: &str) -> Result<(), SinkError> {
		let mut file = OpenOptions::new()
			.create(true)
			.append(true)
			.open(&self.path)
			.map_err(|source| SinkError::Io {
				source,
				path: self.path.clone(),
			})?;
		writeln!(file, "{}", hash).map_err(|source| SinkError::Io {
			source,
			path: self.path.clone(),
		})
	}
}

/// JSON body sent to a chat-notification endpoint. The digest string is
/// embedded verbatim.
pub fn notification_payload(hash: &str) -> serde_json::Value {
	json!({ "text": hash })
}

/// POSTs a JSON notification with the digest to an http(s) endpoint.
pub struct WebhookSink {
	endpoint: Url,
	client: Client,
}

impl WebhookSink {
	pub fn new(url: &str) -> Result<Self, SinkError> {
		let endpoint =
			Url::parse(url).map_err(|err| SinkError::InvalidUrl {
				url: url.to_string(),
				reason: err.to_string(),
			})?;
		if !matches!(endpoint.scheme(), "http" | "https") {
			return Err(SinkError::InvalidUrl {
				url: url.to_string(),
				reason: "only http and https endpoints are supported"
					.to_string(),
			});
		}
		let client = Client::builder()
			.timeout(Duration::from_secs(10))
			.build()
			.map_err(|source| SinkError::Http { source })?;
		Ok(Self { endpoint, client })
	}
}

impl Sink for WebhookSink {
	fn deliver(&mut self, hash: &str) -> Result<(), SinkError> {
		let response = self
			.client
			.post(self.endpoint.clone())
			.json(&notification_payload(hash))
			.send()
			.map_err(|source| SinkError::Http { source })?;
		if !response.status().is_success() {
			return Err(SinkError::Rejected {
				status: response.status().as_u16(),
			});
		}
		Ok(())
	}
}
