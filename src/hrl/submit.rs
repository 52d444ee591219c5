// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashrelay
// File: src/hrl/submit.rs

//! The submission pipeline: validate the candidate, hash it once, and hand
//! the hex digest to every configured sink in order.

use std::fmt;

use crate::hrl::hash::{Algorithm, Digester};
use crate::hrl::sink::{Sink, SinkError};

#[derive(Debug)]
pub enum SubmitError {
	/// The candidate was empty. Nothing is hashed and no sink is touched.
	InvalidInput,
	/// A sink refused the digest. Delivery stops at the failing sink.
	SinkUnavailable { source: SinkError },
}

impl fmt::Display for SubmitError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::InvalidInput => write!(f, "Please enter a value."),
			Self::SinkUnavailable { source } => {
				write!(f, "could not deliver digest: {}", source)
			}
		}
	}
}

impl std::error::Error for SubmitError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::InvalidInput => None,
			Self::SinkUnavailable { source } => Some(source),
		}
	}
}

impl From<SinkError> for SubmitError {
	fn from(source: SinkError) -> Self {
		Self::SinkUnavailable { source }
	}
}

/// Hashes `candidate` with `algorithm` and delivers the hex digest to each
/// sink in order. Returns the digest so callers can report it.
pub fn submit(
	candidate: &str,
	algorithm: Algorithm,
	sinks: &mut [Box<dyn Sink>],
) -> Result<String, SubmitError> {
	if candidate.is_empty() {
		return Err(SubmitError::InvalidInput);
	}
	let hash = Digester::new(algorithm).hex_string(candidate);
	for sink in sinks.iter_mut() {
		sink.deliver(&hash)?;
	}
	Ok(hash)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;
	use std::rc::Rc;

	struct RecordingSink {
		delivered: Rc<RefCell<Vec<String>>>,
	}

	impl Sink for RecordingSink {
		fn deliver(&mut self, hash: &str) -> Result<(), SinkError> {
			self.delivered.borrow_mut().push(hash.to_string());
			Ok(())
		}
	}

	struct FailingSink;

	impl Sink for FailingSink {
		fn deliver(&mut self, _hash: &str) -> Result<(), SinkError> {
			Err(SinkError::Rejected { status: 503 })
		}
	}

	#[test]
	fn test_submit_delivers_digest_to_every_sink() {
		let first = Rc::new(RefCell::new(Vec::new()));
		let second = Rc::new(RefCell::new(Vec::new()));
		let mut sinks: Vec<Box<dyn Sink>> = vec![
			Box::new(RecordingSink {
				delivered: Rc::clone(&first),
			}),
			Box::new(RecordingSink {
				delivered: Rc::clone(&second),
			}),
		];
		let hash = submit("password", Algorithm::Md5, &mut sinks)
			.expect("submission succeeds");
		assert_eq!(hash, "5f4dcc3b5aa765d61d8327deb882cf99");
		assert_eq!(first.borrow().as_slice(), [hash.clone()]);
		assert_eq!(second.borrow().as_slice(), [hash]);
	}

	#[test]
	fn test_submit_rejects_empty_candidate_before_hashing() {
		let delivered = Rc::new(RefCell::new(Vec::new()));
		let mut sinks: Vec<Box<dyn Sink>> = vec![Box::new(RecordingSink {
			delivered: Rc::clone(&delivered),
		})];
		let err = submit("", Algorithm::Md5, &mut sinks)
			.expect_err("empty candidate is invalid");
		assert!(matches!(err, SubmitError::InvalidInput));
		assert_eq!(err.to_string(), "Please enter a value.");
		assert!(delivered.borrow().is_empty());
	}

	#[test]
	fn test_submit_stops_at_failing_sink() {
		let reached = Rc::new(RefCell::new(Vec::new()));
		let mut sinks: Vec<Box<dyn Sink>> = vec![
			Box::new(FailingSink),
			Box::new(RecordingSink {
				delivered: Rc::clone(&reached),
			}),
		];
		let err = submit("password", Algorithm::Md5, &mut sinks)
			.expect_err("failing sink aborts submission");
		assert!(matches!(err, SubmitError::SinkUnavailable { .. }));
		assert!(reached.borrow().is_empty());
	}

	#[test]
	fn test_submit_ntlm_uses_utf16_encoding() {
		let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
		let hash = submit("password", Algorithm::Ntlm, &mut sinks)
			.expect("submission succeeds");
		assert_eq!(hash, "8846f7eaee8fb117ad06bdd830b7586c");
	}
}
