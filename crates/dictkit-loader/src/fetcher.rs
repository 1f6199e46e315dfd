//! Fetch collaborator seam

use async_trait::async_trait;
use dictkit_core::{DictItem, DictResult};
use std::future::Future;
use std::sync::Arc;

/// Source of dictionary contents
///
/// Implemented by the HTTP client in `dictkit-http`; tests and embedders can
/// plug in anything else. Errors returned here never reach dictionary
/// consumers, the loader logs them and resolves the code as empty.
#[async_trait]
pub trait DictFetcher: Send + Sync {
	/// Fetch the ordered items of the dictionary `code`
	async fn fetch(&self, code: &str) -> DictResult<Vec<DictItem>>;
}

#[async_trait]
impl<T: DictFetcher + ?Sized> DictFetcher for Arc<T> {
	async fn fetch(&self, code: &str) -> DictResult<Vec<DictItem>> {
		(**self).fetch(code).await
	}
}

/// [`DictFetcher`] backed by an async closure
///
/// Created with [`fetcher_fn`].
pub struct FnFetcher<F> {
	f: F,
}

/// Adapt an async closure taking the code into a [`DictFetcher`]
///
/// # Examples
///
/// ```
/// use dictkit_core::{DictError, DictItem};
/// use dictkit_loader::{DictFetcher, fetcher_fn};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let fetcher = fetcher_fn(|code: String| async move {
/// 	match code.as_str() {
/// 		"gender" => Ok(vec![DictItem::new("Male", 1)]),
/// 		_ => Err(DictError::Transport(format!("unknown dictionary {code}"))),
/// 	}
/// });
///
/// assert_eq!(fetcher.fetch("gender").await.unwrap().len(), 1);
/// assert!(fetcher.fetch("status").await.is_err());
/// # }
/// ```
pub fn fetcher_fn<F, Fut>(f: F) -> FnFetcher<F>
where
	F: Fn(String) -> Fut + Send + Sync,
	Fut: Future<Output = DictResult<Vec<DictItem>>> + Send,
{
	FnFetcher { f }
}

#[async_trait]
impl<F, Fut> DictFetcher for FnFetcher<F>
where
	F: Fn(String) -> Fut + Send + Sync,
	Fut: Future<Output = DictResult<Vec<DictItem>>> + Send,
{
	async fn fetch(&self, code: &str) -> DictResult<Vec<DictItem>> {
		(self.f)(code.to_string()).await
	}
}
