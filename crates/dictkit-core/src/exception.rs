//! Error types shared by dictkit crates.

use std::time::Duration;
use thiserror::Error;

/// Errors raised while fetching or configuring dictionaries.
///
/// The loader never hands these to consumers: a failed fetch is logged and
/// resolves as an empty dictionary. They surface from the HTTP fetcher and
/// the settings loader, which propagate them normally.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DictError {
	/// The request never produced a response.
	#[error("Transport error: {0}")]
	Transport(String),

	/// The server answered with a non-success HTTP status.
	#[error("HTTP status {status}: {message}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body or reason phrase.
		message: String,
	},

	/// The response envelope reported a failure.
	#[error("API error {code}: {message}")]
	Api {
		/// Business code from the envelope.
		code: String,
		/// Message from the envelope.
		message: String,
	},

	/// The body could not be decoded.
	#[error("Decode error: {0}")]
	Decode(#[from] serde_json::Error),

	/// The fetch for a code did not settle in time.
	#[error("Fetch for dictionary '{code}' timed out after {after:?}")]
	Timeout {
		/// Dictionary code being fetched.
		code: String,
		/// Configured timeout.
		after: Duration,
	},

	/// Invalid or unreadable settings.
	#[error("Configuration error: {0}")]
	Config(String),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

impl DictError {
	/// Whether the error was produced by the remote side rather than locally.
	pub fn is_remote(&self) -> bool {
		matches!(self, Self::Status { .. } | Self::Api { .. })
	}
}

/// Result type alias for dictkit operations.
pub type DictResult<T> = Result<T, DictError>;
