//! Signal - Observable Value Container
//!
//! `Signal<T>` holds a value that consumers can read at any time and observe
//! for changes. The dictionary loader returns one signal per requested code:
//! it starts out empty and is overwritten once the dictionary resolves.
//!
//! ## Key Features
//!
//! - **Shared**: clones observe and write the same value.
//! - **Observable**: `subscribe()` hands out a `tokio::sync::watch::Receiver`,
//!   `changed()` waits for the next write.
//! - **Thread-safe**: signals are `Send + Sync`, so resolution tasks spawned on a
//!   multi-threaded runtime can write them.
//!
//! ## Example
//!
//! ```
//! use dictkit_core::reactive::Signal;
//!
//! let count = Signal::new(0);
//! assert_eq!(count.get(), 0);
//!
//! count.set(42);
//! assert_eq!(count.get(), 42);
//!
//! count.update(|n| *n += 1);
//! assert_eq!(count.get(), 43);
//! ```

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

static NEXT_SIGNAL_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a signal, shared by all of its clones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalId(u64);

impl SignalId {
	fn next() -> Self {
		Self(NEXT_SIGNAL_ID.fetch_add(1, Ordering::Relaxed))
	}
}

/// An observable value shared between its writer and any number of readers
///
/// ## Cloning
///
/// `Signal<T>` implements `Clone`; all clones share the same underlying
/// `watch` channel, so a write through one clone is visible through all.
pub struct Signal<T> {
	/// Unique identifier for this signal
	id: SignalId,
	/// The value and its change notifications
	sender: Arc<watch::Sender<T>>,
}

impl<T> Signal<T> {
	/// Create a new Signal with the given initial value
	pub fn new(value: T) -> Self {
		let (sender, _) = watch::channel(value);
		Self {
			id: SignalId::next(),
			sender: Arc::new(sender),
		}
	}

	/// Get a clone of the current value
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.sender.borrow().clone()
	}

	/// Run `f` against the current value without cloning it
	///
	/// # Example
	///
	/// ```
	/// use dictkit_core::reactive::Signal;
	///
	/// let names = Signal::new(vec!["a".to_string(), "b".to_string()]);
	/// assert_eq!(names.with(|v| v.len()), 2);
	/// ```
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.sender.borrow())
	}

	/// Replace the value and notify every observer
	pub fn set(&self, value: T) {
		self.sender.send_replace(value);
	}

	/// Mutate the value in place and notify every observer once
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		self.sender.send_modify(f);
	}

	/// Subscribe to changes
	///
	/// The returned receiver treats the current value as already seen.
	pub fn subscribe(&self) -> watch::Receiver<T> {
		self.sender.subscribe()
	}

	/// Wait until the next write to this signal
	///
	/// # Example
	///
	/// ```
	/// use dictkit_core::reactive::Signal;
	///
	/// # #[tokio::main(flavor = "current_thread")]
	/// # async fn main() {
	/// let status = Signal::new("loading");
	/// let writer = status.clone();
	/// tokio::spawn(async move { writer.set("ready") });
	///
	/// status.changed().await;
	/// assert_eq!(status.get(), "ready");
	/// # }
	/// ```
	pub async fn changed(&self) {
		let mut receiver = self.subscribe();
		// The sender lives as long as `self`, so the channel cannot close here.
		let _ = receiver.changed().await;
	}

	/// Get the identifier shared by all clones of this signal
	pub fn id(&self) -> SignalId {
		self.id
	}
}

impl<T> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			sender: Arc::clone(&self.sender),
		}
	}
}

impl<T: Default> Default for Signal<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("id", &self.id)
			.field("value", &*self.sender.borrow())
			.finish()
	}
}
