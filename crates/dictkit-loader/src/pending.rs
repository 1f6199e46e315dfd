//! In-flight fetch registry

use dictkit_core::{DictItems, empty_items};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;

/// Pending fetch shared by every caller attached to it
pub(crate) type SharedFetch = Shared<BoxFuture<'static, DictItems>>;

struct PendingFetch {
	id: u64,
	fetch: SharedFetch,
}

/// Outcome of registering interest in a code
pub(crate) enum Registration {
	/// The code was cached by a fetch that settled just before the lookup.
	Cached(DictItems),
	/// Another caller's fetch is still running.
	Attached(SharedFetch),
	/// A new registration was made for this caller, who must now start the
	/// fetch and hand its result to the [`Settle`].
	Dispatched(SharedFetch, Settle),
}

/// Map from dictionary code to the fetch currently running for it
///
/// Each entry lives exactly as long as its fetch: it is removed when the
/// fetch settles, successfully or not. Entries carry a fetch id so a settling
/// fetch only ever removes its own registration.
#[derive(Clone, Default)]
pub struct PendingRequests {
	inner: Arc<Mutex<HashMap<String, PendingFetch>>>,
	next_id: Arc<AtomicU64>,
}

impl PendingRequests {
	pub fn new() -> Self {
		Self::default()
	}

	/// Attach to the fetch running for `code`, or register a new one
	///
	/// `lookup` runs only when nothing is in flight; it lets the caller
	/// re-check the store under the registry lock, which closes the window
	/// between a fetch caching its result and deregistering itself.
	///
	/// Nothing is started under the lock. A [`Registration::Dispatched`]
	/// caller starts the fetch afterwards; dropping its [`Settle`] unused
	/// deregisters the code and resolves every attached caller as empty.
	pub(crate) fn attach_or_dispatch<L>(&self, code: &str, lookup: L) -> Registration
	where
		L: FnOnce() -> Option<DictItems>,
	{
		let mut inner = self.inner.lock();
		if let Some(pending) = inner.get(code) {
			return Registration::Attached(pending.fetch.clone());
		}
		if let Some(items) = lookup() {
			return Registration::Cached(items);
		}

		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let (sender, receiver) = oneshot::channel();
		let fetch_code = code.to_string();
		let fetch = async move {
			match receiver.await {
				Ok(items) => items,
				Err(_) => {
					tracing::warn!(code = %fetch_code, "dictionary fetch ended without a result");
					empty_items()
				}
			}
		}
		.boxed()
		.shared();

		inner.insert(
			code.to_string(),
			PendingFetch {
				id,
				fetch: fetch.clone(),
			},
		);
		drop(inner);

		let settle = Settle {
			id,
			sender,
			guard: self.settle_guard(code, id),
		};
		Registration::Dispatched(fetch, settle)
	}

	/// Remove the registration `id` for `code`
	///
	/// Returns `false` when the code is registered under another id or not at all.
	pub(crate) fn complete(&self, code: &str, id: u64) -> bool {
		let mut inner = self.inner.lock();
		match inner.get(code) {
			Some(pending) if pending.id == id => {
				inner.remove(code);
				true
			}
			_ => false,
		}
	}

	/// Guard that completes registration `id` when dropped
	fn settle_guard(&self, code: &str, id: u64) -> SettleGuard {
		SettleGuard {
			pending: self.clone(),
			code: code.to_string(),
			id,
		}
	}

	/// Whether a fetch is in flight for `code`
	pub fn contains(&self, code: &str) -> bool {
		self.inner.lock().contains_key(code)
	}

	/// Number of fetches in flight
	pub fn len(&self) -> usize {
		self.inner.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.lock().is_empty()
	}

	/// Forget every registration
	///
	/// Running fetches keep going and still cache their result, but the next
	/// request for their code dispatches a fresh fetch.
	pub fn clear(&self) {
		self.inner.lock().clear();
	}
}

impl fmt::Debug for PendingRequests {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut codes: Vec<String> = self.inner.lock().keys().cloned().collect();
		codes.sort();
		f.debug_struct("PendingRequests").field("codes", &codes).finish()
	}
}

/// Completion side of a dispatched fetch
///
/// Owned by the fetch task. [`Settle::deliver`] hands the result to every
/// attached caller, then deregisters the code; dropping it instead (panic,
/// cancellation, a task that never started) resolves them as empty.
pub(crate) struct Settle {
	id: u64,
	sender: oneshot::Sender<DictItems>,
	guard: SettleGuard,
}

impl Settle {
	pub(crate) fn id(&self) -> u64 {
		self.id
	}

	pub(crate) fn deliver(self, items: DictItems) {
		let Settle { sender, guard, .. } = self;
		let _ = sender.send(items);
		drop(guard);
	}
}

/// Removes an in-flight registration when the fetch owning it is dropped
///
/// Held inside a [`Settle`], so the entry goes away on success, on failure and
/// when the task panics or is cancelled.
pub(crate) struct SettleGuard {
	pending: PendingRequests,
	code: String,
	id: u64,
}

impl Drop for SettleGuard {
	fn drop(&mut self) {
		self.pending.complete(&self.code, self.id);
	}
}
