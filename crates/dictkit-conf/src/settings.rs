//! Dictionary service settings

use dictkit_core::{DictError, DictResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings of the dictionary service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictSettings {
	/// Base URL of the admin API, without trailing slash
	pub base_url: String,

	/// Path of the dictionary endpoint below `base_url`
	pub dict_path: String,

	/// Upper bound for a single dictionary fetch in milliseconds
	///
	/// `None` or `0` lets a fetch run forever.
	pub fetch_timeout_ms: Option<u64>,

	/// HTTP request timeout in milliseconds
	pub request_timeout_ms: u64,
}

impl Default for DictSettings {
	fn default() -> Self {
		Self {
			base_url: "http://localhost:8000".to_string(),
			dict_path: "/common/dict".to_string(),
			fetch_timeout_ms: Some(30_000),
			request_timeout_ms: 10_000,
		}
	}
}

impl DictSettings {
	/// Fetch timeout to hand to the loader
	pub fn fetch_timeout(&self) -> Option<Duration> {
		match self.fetch_timeout_ms {
			Some(0) | None => None,
			Some(ms) => Some(Duration::from_millis(ms)),
		}
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_millis(self.request_timeout_ms)
	}

	/// URL that dictionary codes are appended to
	pub fn dict_url_prefix(&self) -> String {
		format!("{}{}", self.base_url.trim_end_matches('/'), self.dict_path)
	}

	/// Check the settings for values the HTTP client cannot work with
	///
	/// # Examples
	///
	/// ```
	/// use dictkit_conf::DictSettings;
	///
	/// let mut settings = DictSettings::default();
	/// assert!(settings.validate().is_ok());
	///
	/// settings.base_url = "ftp://files.example.com".to_string();
	/// assert!(settings.validate().is_err());
	/// ```
	pub fn validate(&self) -> DictResult<()> {
		let base_url = self.base_url.trim();
		if base_url.is_empty() {
			return Err(DictError::Config("base_url must not be empty".to_string()));
		}
		if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
			return Err(DictError::Config(format!(
				"base_url must be an http(s) URL, got '{}'",
				self.base_url
			)));
		}
		if !self.dict_path.starts_with('/') {
			return Err(DictError::Config(format!(
				"dict_path must start with '/', got '{}'",
				self.dict_path
			)));
		}
		if self.request_timeout_ms == 0 {
			return Err(DictError::Config(
				"request_timeout_ms must be greater than zero".to_string(),
			));
		}
		Ok(())
	}
}
