//! Coalescing dictionary loader

use crate::fetcher::DictFetcher;
use crate::pending::{PendingRequests, Registration, Settle, SharedFetch};
use crate::refs::DictRefs;
use dictkit_cache::DictStore;
use dictkit_core::{DictError, DictItem, DictItems, DictResult, empty_items};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// Fetch timeout applied unless configured otherwise
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

enum Resolution {
	Ready(DictItems),
	Pending(SharedFetch),
}

/// Dictionary service shared by every consumer of the application
///
/// Built once at start-up and cloned wherever dictionaries are needed; all
/// clones share the store, the fetcher and the in-flight registry.
///
/// # Examples
///
/// ```
/// use dictkit_cache::DictStore;
/// use dictkit_core::DictItem;
/// use dictkit_loader::{DictLoader, fetcher_fn};
/// use std::time::Duration;
///
/// let store = DictStore::new();
/// store.set_dict("gender", vec![DictItem::new("Male", 1)]);
///
/// let loader = DictLoader::new(fetcher_fn(|_code: String| async { Ok(Vec::new()) }))
/// 	.with_store(store)
/// 	.with_fetch_timeout(Some(Duration::from_secs(5)));
///
/// assert!(loader.store().contains("gender"));
/// assert_eq!(loader.fetch_timeout(), Some(Duration::from_secs(5)));
/// ```
#[derive(Clone)]
pub struct DictLoader {
	store: DictStore,
	fetcher: Arc<dyn DictFetcher>,
	pending: PendingRequests,
	fetch_timeout: Option<Duration>,
}

impl DictLoader {
	/// Create a loader with an empty store and the default fetch timeout
	pub fn new(fetcher: impl DictFetcher + 'static) -> Self {
		Self::with_shared_fetcher(Arc::new(fetcher))
	}

	/// Create a loader around a fetcher that is already shared
	pub fn with_shared_fetcher(fetcher: Arc<dyn DictFetcher>) -> Self {
		Self {
			store: DictStore::new(),
			fetcher,
			pending: PendingRequests::new(),
			fetch_timeout: Some(DEFAULT_FETCH_TIMEOUT),
		}
	}

	/// Use `store` as the cache
	pub fn with_store(mut self, store: DictStore) -> Self {
		self.store = store;
		self
	}

	/// Bound how long a single fetch may run; `None` waits forever
	///
	/// A fetch that times out counts as failed: the code resolves as empty
	/// and nothing is cached.
	pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
		self.fetch_timeout = timeout;
		self
	}

	pub fn store(&self) -> &DictStore {
		&self.store
	}

	pub fn fetch_timeout(&self) -> Option<Duration> {
		self.fetch_timeout
	}

	/// Number of fetches in flight
	pub fn pending_count(&self) -> usize {
		self.pending.len()
	}

	/// Whether a fetch is in flight for `code`
	pub fn is_pending(&self, code: &str) -> bool {
		self.pending.contains(code)
	}

	/// Forget every in-flight fetch
	///
	/// See [`PendingRequests::clear`].
	pub fn clear_pending(&self) {
		self.pending.clear();
	}

	/// Bind the dictionaries `codes` to reactive signals
	///
	/// Every binding is empty when this returns, except for codes already in
	/// the store, which are bound to the cached list right away. The others
	/// are filled in by background tasks once their fetch settles, with the
	/// empty list if it failed. A code listed twice shares one binding.
	///
	/// Must be called within a tokio runtime.
	pub fn use_dict<I, S>(&self, codes: I) -> DictRefs
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut refs = DictRefs::default();
		for code in codes {
			let code = code.as_ref();
			let binding = refs.reset_binding(code);
			match self.resolve(code) {
				Resolution::Ready(items) => binding.set(items),
				Resolution::Pending(fetch) => {
					refs.track(tokio::spawn(async move {
						binding.set(fetch.await);
					}));
				}
			}
		}
		refs
	}

	/// Resolve a single dictionary
	///
	/// Follows the same cache and coalescing rules as [`DictLoader::use_dict`].
	/// An empty code resolves to the empty list without any lookup.
	///
	/// Fetches run on the current tokio runtime; polled outside one, an
	/// uncached code resolves as empty and nothing is cached.
	pub async fn load(&self, code: &str) -> DictItems {
		match self.resolve(code) {
			Resolution::Ready(items) => items,
			Resolution::Pending(fetch) => fetch.await,
		}
	}

	fn resolve(&self, code: &str) -> Resolution {
		if code.is_empty() {
			return Resolution::Ready(empty_items());
		}

		if let Some(items) = self.store.get_dict(code) {
			tracing::debug!(code, "dictionary served from cache");
			return Resolution::Ready(items);
		}

		let registration = self.pending.attach_or_dispatch(code, || self.store.peek_dict(code));
		match registration {
			Registration::Cached(items) => Resolution::Ready(items),
			Registration::Attached(fetch) => {
				tracing::debug!(code, "attached to in-flight dictionary fetch");
				Resolution::Pending(fetch)
			}
			Registration::Dispatched(fetch, settle) => {
				self.dispatch(code, settle);
				Resolution::Pending(fetch)
			}
		}
	}

	/// Spawn the fetch for `code`, settling its registration when done
	///
	/// Without a tokio runtime nothing is spawned: `settle` is dropped, which
	/// deregisters the code and resolves its callers as empty.
	fn dispatch(&self, code: &str, settle: Settle) {
		let Ok(runtime) = Handle::try_current() else {
			tracing::error!(code, "failed to load dictionary: no tokio runtime to fetch on");
			return;
		};
		tracing::debug!(code, id = settle.id(), "dispatching dictionary fetch");

		let store = self.store.clone();
		let fetcher = Arc::clone(&self.fetcher);
		let timeout = self.fetch_timeout;
		let task_code = code.to_string();

		runtime.spawn(async move {
			let items = match fetch_items(fetcher.as_ref(), &task_code, timeout).await {
				Ok(items) => {
					let items: DictItems = items.into();
					store.set_dict(&task_code, items.clone());
					items
				}
				Err(error) => {
					tracing::error!(code = %task_code, %error, "failed to load dictionary");
					empty_items()
				}
			};
			settle.deliver(items);
		});
	}
}

async fn fetch_items(
	fetcher: &dyn DictFetcher,
	code: &str,
	timeout: Option<Duration>,
) -> DictResult<Vec<DictItem>> {
	match timeout {
		Some(after) => match tokio::time::timeout(after, fetcher.fetch(code)).await {
			Ok(result) => result,
			Err(_) => Err(DictError::Timeout {
				code: code.to_string(),
				after,
			}),
		},
		None => fetcher.fetch(code).await,
	}
}

impl fmt::Debug for DictLoader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DictLoader")
			.field("store", &self.store)
			.field("pending", &self.pending)
			.field("fetch_timeout", &self.fetch_timeout)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fetcher::fetcher_fn;
	use rstest::rstest;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[rstest]
	#[tokio::test]
	async fn test_load_caches_result() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = calls.clone();
		let loader = DictLoader::new(fetcher_fn(move |_code: String| {
			counter.fetch_add(1, Ordering::SeqCst);
			async { Ok(vec![DictItem::new("Male", 1)]) }
		}));

		let first = loader.load("gender").await;
		let second = loader.load("gender").await;

		assert_eq!(first.len(), 1);
		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert!(!loader.is_pending("gender"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_empty_code_never_fetches() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = calls.clone();
		let loader = DictLoader::new(fetcher_fn(move |code: String| {
			counter.fetch_add(1, Ordering::SeqCst);
			async move { Err(DictError::Transport(format!("unexpected fetch for {code:?}"))) }
		}));

		assert!(loader.load("").await.is_empty());
		assert_eq!(calls.load(Ordering::SeqCst), 0);
		assert_eq!(loader.pending_count(), 0);
		assert_eq!(loader.store().statistics().total_requests, 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_timeout_error_is_reported() {
		let fetcher = fetcher_fn(|_code: String| async {
			std::future::pending::<DictResult<Vec<DictItem>>>().await
		});

		let result = fetch_items(&fetcher, "gender", Some(Duration::from_millis(10))).await;

		match result {
			Err(DictError::Timeout { code, after }) => {
				assert_eq!(code, "gender");
				assert_eq!(after, Duration::from_millis(10));
			}
			other => panic!("expected timeout, got {other:?}"),
		}
	}

	#[rstest]
	fn test_load_outside_tokio_resolves_empty() {
		let loader = DictLoader::new(fetcher_fn(|_code: String| async {
			Ok(vec![DictItem::new("Male", 1)])
		}));

		let (sender, receiver) = std::sync::mpsc::channel();
		let outside = loader.clone();
		std::thread::spawn(move || {
			let items = futures::executor::block_on(outside.load("gender"));
			let _ = sender.send(items);
		});
		let items = receiver
			.recv_timeout(Duration::from_secs(5))
			.expect("load outside a tokio runtime must not block");

		assert!(items.is_empty());
		assert!(!loader.is_pending("gender"));
		assert!(!loader.store().contains("gender"));

		// Other clones keep working afterwards
		let runtime = tokio::runtime::Builder::new_current_thread()
			.enable_all()
			.build()
			.unwrap();
		assert_eq!(runtime.block_on(loader.load("gender")).len(), 1);
		assert!(loader.store().contains("gender"));
	}

	#[rstest]
	fn test_default_timeout() {
		let loader = DictLoader::new(fetcher_fn(|_code: String| async { Ok(Vec::new()) }));
		assert_eq!(loader.fetch_timeout(), Some(DEFAULT_FETCH_TIMEOUT));
	}
}
