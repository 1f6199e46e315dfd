//! reqwest-based dictionary fetcher

use crate::response::ApiRes;
use async_trait::async_trait;
use dictkit_conf::DictSettings;
use dictkit_core::{DictError, DictItem, DictResult};
use dictkit_loader::DictFetcher;
use std::fmt;

/// Fetches dictionaries from the admin API over HTTP
///
/// # Examples
///
/// ```
/// use dictkit_conf::DictSettings;
/// use dictkit_http::HttpDictFetcher;
///
/// let settings = DictSettings {
/// 	base_url: "https://admin.example.com/api/".to_string(),
/// 	..Default::default()
/// };
/// let fetcher = HttpDictFetcher::from_settings(&settings).unwrap();
///
/// assert_eq!(
/// 	fetcher.dict_url("notice_type"),
/// 	"https://admin.example.com/api/common/dict/notice_type"
/// );
/// ```
#[derive(Clone)]
pub struct HttpDictFetcher {
	client: reqwest::Client,
	url_prefix: String,
}

impl HttpDictFetcher {
	/// Build a fetcher with its own client configured from `settings`
	pub fn from_settings(settings: &DictSettings) -> DictResult<Self> {
		settings.validate()?;
		let client = reqwest::Client::builder()
			.timeout(settings.request_timeout())
			.build()
			.map_err(|e| DictError::Config(format!("failed to build HTTP client: {e}")))?;
		Ok(Self::with_client(client, settings))
	}

	/// Build a fetcher on top of an existing client
	///
	/// Useful when the application already configures headers, proxies or
	/// TLS on a shared client.
	pub fn with_client(client: reqwest::Client, settings: &DictSettings) -> Self {
		Self {
			client,
			url_prefix: settings.dict_url_prefix(),
		}
	}

	/// URL of the dictionary `code`, with the code encoded as one path segment
	pub fn dict_url(&self, code: &str) -> String {
		format!("{}/{}", self.url_prefix, urlencoding::encode(code))
	}
}

fn transport_error(error: reqwest::Error) -> DictError {
	DictError::Transport(error.to_string())
}

#[async_trait]
impl DictFetcher for HttpDictFetcher {
	async fn fetch(&self, code: &str) -> DictResult<Vec<DictItem>> {
		let url = self.dict_url(code);
		tracing::debug!(code, url = %url, "requesting dictionary");

		let response = self.client.get(&url).send().await.map_err(transport_error)?;
		let status = response.status();
		let body = response.bytes().await.map_err(transport_error)?;

		if !status.is_success() {
			let text = String::from_utf8_lossy(&body).trim().to_string();
			let message = if text.is_empty() {
				status.canonical_reason().unwrap_or("unknown status").to_string()
			} else {
				text
			};
			return Err(DictError::Status {
				status: status.as_u16(),
				message,
			});
		}

		let envelope: ApiRes<Vec<DictItem>> = serde_json::from_slice(&body)?;
		Ok(envelope.into_result()?.unwrap_or_default())
	}
}

impl fmt::Debug for HttpDictFetcher {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HttpDictFetcher")
			.field("url_prefix", &self.url_prefix)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("gender", "http://localhost:8000/common/dict/gender")]
	#[case("a b/c", "http://localhost:8000/common/dict/a%20b%2Fc")]
	#[case("", "http://localhost:8000/common/dict/")]
	fn test_dict_url(#[case] code: &str, #[case] expected: &str) {
		let fetcher = HttpDictFetcher::from_settings(&DictSettings::default()).unwrap();
		assert_eq!(fetcher.dict_url(code), expected);
	}

	#[rstest]
	fn test_invalid_settings_rejected() {
		let settings = DictSettings {
			base_url: String::new(),
			..Default::default()
		};
		assert!(matches!(
			HttpDictFetcher::from_settings(&settings),
			Err(DictError::Config(_))
		));
	}
}
