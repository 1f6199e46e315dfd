//! # dictkit
//!
//! Cached, coalescing dictionary loading for admin front-ends.
//!
//! Admin screens label enum-like values (gender, status, notice type, ...)
//! through *dictionaries*: ordered lists of `{label, value}` items fetched
//! from the backend by code. dictkit fetches each code at most once at a
//! time, keeps successful results in a shared store and hands consumers
//! reactive bindings that fill in when the data arrives.
//!
//! ## Crates
//!
//! - [`dictkit_core`]: [`DictItem`], [`DictError`], [`Signal`]
//! - [`dictkit_cache`]: [`DictStore`]
//! - [`dictkit_loader`]: [`DictLoader`], [`DictFetcher`], [`DictRefs`]
//! - [`dictkit_conf`]: [`DictSettings`], [`SettingsLoader`]
//! - `dictkit_http`: `HttpDictFetcher` (feature `http`, on by default)
//!
//! ## Quick Start
//!
//! ```
//! use dictkit::{DictItem, DictKit, fetcher_fn};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let loader = DictKit::with_fetcher(
//! 	fetcher_fn(|_code: String| async { Ok(vec![DictItem::new("Male", 1), DictItem::new("Female", 2)]) }),
//! 	Some(Duration::from_secs(5)),
//! );
//!
//! let mut refs = loader.use_dict(["gender"]);
//! refs.settled().await;
//! assert_eq!(refs.items("gender").unwrap().len(), 2);
//! # }
//! ```

pub use dictkit_cache::{DictEntryInfo, DictStore, DictStoreStatistics};
pub use dictkit_conf::{ConfigSource, DictSettings, EnvSource, SettingsLoader, TomlSource};
pub use dictkit_core::{DictError, DictItem, DictItems, DictResult, Signal, empty_items};
pub use dictkit_loader::{
	DEFAULT_FETCH_TIMEOUT, DictFetcher, DictLoader, DictRefs, FnFetcher, PendingRequests,
	fetcher_fn,
};

#[cfg(feature = "http")]
pub use dictkit_http::{ApiRes, HttpDictFetcher};

use std::time::Duration;

/// Entry points wiring a ready-to-use [`DictLoader`]
pub struct DictKit;

impl DictKit {
	/// Loader fetching over HTTP as described by `settings`
	///
	/// # Examples
	///
	/// ```
	/// use dictkit::{DictKit, DictSettings};
	/// use std::time::Duration;
	///
	/// let settings = DictSettings {
	/// 	base_url: "https://admin.example.com/api".to_string(),
	/// 	fetch_timeout_ms: Some(5_000),
	/// 	..Default::default()
	/// };
	/// let loader = DictKit::from_settings(&settings).unwrap();
	///
	/// assert_eq!(loader.fetch_timeout(), Some(Duration::from_secs(5)));
	/// assert!(loader.store().is_empty());
	/// ```
	#[cfg(feature = "http")]
	pub fn from_settings(settings: &DictSettings) -> DictResult<DictLoader> {
		let fetcher = HttpDictFetcher::from_settings(settings)?;
		tracing::debug!(
			url_prefix = %settings.dict_url_prefix(),
			fetch_timeout = ?settings.fetch_timeout(),
			"dictionary loader configured"
		);
		Ok(Self::with_fetcher(fetcher, settings.fetch_timeout()))
	}

	/// Loader configured from `DICTKIT_*` environment variables over the defaults
	#[cfg(feature = "http")]
	pub fn from_env() -> DictResult<DictLoader> {
		let settings = SettingsLoader::new().with_env().build()?;
		Self::from_settings(&settings)
	}

	/// Loader around a custom fetcher with a fresh store
	pub fn with_fetcher(fetcher: impl DictFetcher + 'static, timeout: Option<Duration>) -> DictLoader {
		DictLoader::new(fetcher).with_fetch_timeout(timeout)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[rstest]
	#[tokio::test]
	async fn test_with_fetcher_wires_fresh_store() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = calls.clone();
		let loader = DictKit::with_fetcher(
			fetcher_fn(move |code: String| {
				let counter = counter.clone();
				async move {
					counter.fetch_add(1, Ordering::SeqCst);
					Ok(vec![DictItem::new(code, 1)])
				}
			}),
			None,
		);

		assert_eq!(loader.fetch_timeout(), None);
		assert_eq!(loader.load("status").await[0].label, "status");
		assert_eq!(loader.load("status").await.len(), 1);
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[cfg(feature = "http")]
	#[rstest]
	fn test_from_settings_rejects_invalid_settings() {
		let settings = DictSettings {
			dict_path: "common/dict".to_string(),
			..Default::default()
		};
		assert!(matches!(
			DictKit::from_settings(&settings),
			Err(DictError::Config(_))
		));
	}

	#[cfg(feature = "http")]
	#[rstest]
	fn test_from_settings_disables_timeout() {
		let settings = DictSettings {
			fetch_timeout_ms: Some(0),
			..Default::default()
		};
		let loader = DictKit::from_settings(&settings).unwrap();
		assert_eq!(loader.fetch_timeout(), None);
	}

	#[cfg(feature = "http")]
	#[rstest]
	#[serial_test::serial(dictkit_env)]
	fn test_from_env() {
		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			std::env::set_var("DICTKIT_FETCH_TIMEOUT_MS", "2500");
		}

		let loader = DictKit::from_env().unwrap();
		assert_eq!(loader.fetch_timeout(), Some(Duration::from_millis(2500)));

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// This test uses #[serial] to ensure exclusive access to environment variables.
		unsafe {
			std::env::remove_var("DICTKIT_FETCH_TIMEOUT_MS");
		}
	}
}
