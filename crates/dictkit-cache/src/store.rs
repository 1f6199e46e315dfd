//! Shared dictionary store

use crate::entry::DictEntry;
use crate::statistics::{DictEntryInfo, DictStoreStatistics};
use dictkit_core::DictItems;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Keyed store of resolved dictionaries
///
/// Clones share the same map, so one store built at start-up can be handed
/// to every consumer. Empty codes are accepted everywhere and treated as
/// no-ops: they are never stored, never found and never deleted.
#[derive(Clone, Default)]
pub struct DictStore {
	entries: Arc<RwLock<HashMap<String, DictEntry>>>,
	hits: Arc<AtomicU64>,
	misses: Arc<AtomicU64>,
}

impl DictStore {
	/// Create an empty store
	pub fn new() -> Self {
		Self::default()
	}

	/// Cache the items for `code`, replacing any previous list
	///
	/// # Examples
	///
	/// ```
	/// use dictkit_cache::DictStore;
	/// use dictkit_core::DictItem;
	///
	/// let store = DictStore::new();
	/// store.set_dict("status", vec![DictItem::new("Enabled", 1)]);
	/// store.set_dict("status", vec![DictItem::new("Disabled", 2)]);
	///
	/// let items = store.get_dict("status").unwrap();
	/// assert_eq!(items.len(), 1);
	/// assert_eq!(items[0].label, "Disabled");
	///
	/// // Empty codes are ignored
	/// store.set_dict("", vec![DictItem::new("x", 0)]);
	/// assert_eq!(store.len(), 1);
	/// ```
	pub fn set_dict(&self, code: &str, items: impl Into<DictItems>) {
		if code.is_empty() {
			return;
		}
		let entry = DictEntry::new(items.into());
		self.entries.write().insert(code.to_string(), entry);
	}

	/// Get the cached items for `code`
	///
	/// Returns `None` when the code is empty or nothing is cached for it.
	pub fn get_dict(&self, code: &str) -> Option<DictItems> {
		if code.is_empty() {
			return None;
		}

		let items = self.entries.read().get(code).map(|entry| entry.items.clone());
		match items {
			Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
			None => self.misses.fetch_add(1, Ordering::Relaxed),
		};
		items
	}

	/// Like [`DictStore::get_dict`], without recording a lookup
	pub fn peek_dict(&self, code: &str) -> Option<DictItems> {
		if code.is_empty() {
			return None;
		}
		self.entries.read().get(code).map(|entry| entry.items.clone())
	}

	/// Remove the cached items for `code`
	///
	/// Returns whether an entry was removed.
	pub fn delete_dict(&self, code: &str) -> bool {
		if code.is_empty() {
			return false;
		}
		let removed = self.entries.write().remove(code).is_some();
		if removed {
			tracing::debug!(code, "dictionary evicted");
		}
		removed
	}

	/// Drop every cached dictionary
	pub fn clean_dict(&self) {
		let previous = std::mem::take(&mut *self.entries.write());
		tracing::debug!(count = previous.len(), "dictionary store cleared");
	}

	/// Whether a dictionary is cached for `code`
	///
	/// Unlike [`DictStore::get_dict`] this does not count as a lookup.
	pub fn contains(&self, code: &str) -> bool {
		!code.is_empty() && self.entries.read().contains_key(code)
	}

	/// List the cached codes in sorted order
	pub fn codes(&self) -> Vec<String> {
		let mut codes: Vec<String> = self.entries.read().keys().cloned().collect();
		codes.sort();
		codes
	}

	/// Number of cached dictionaries
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	/// Inspect a cached dictionary
	///
	/// # Examples
	///
	/// ```
	/// use dictkit_cache::DictStore;
	/// use dictkit_core::DictItem;
	///
	/// let store = DictStore::new();
	/// store.set_dict("gender", vec![DictItem::new("Male", 1), DictItem::new("Female", 2)]);
	///
	/// let info = store.inspect_entry("gender").unwrap();
	/// assert_eq!(info.code, "gender");
	/// assert_eq!(info.item_count, 2);
	///
	/// assert!(store.inspect_entry("nonexistent").is_none());
	/// ```
	pub fn inspect_entry(&self, code: &str) -> Option<DictEntryInfo> {
		self.entries.read().get(code).map(|entry| DictEntryInfo {
			code: code.to_string(),
			item_count: entry.items.len(),
			age: entry.age(),
		})
	}

	/// Get store statistics
	pub fn statistics(&self) -> DictStoreStatistics {
		let entries = self.entries.read();
		let hits = self.hits.load(Ordering::Relaxed);
		let misses = self.misses.load(Ordering::Relaxed);

		DictStoreStatistics {
			hits,
			misses,
			total_requests: hits + misses,
			entry_count: entries.len() as u64,
			item_count: entries.values().map(|entry| entry.items.len() as u64).sum(),
		}
	}

	/// Reset the hit and miss counters
	pub fn reset_statistics(&self) {
		self.hits.store(0, Ordering::Relaxed);
		self.misses.store(0, Ordering::Relaxed);
	}
}

impl fmt::Debug for DictStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DictStore")
			.field("codes", &self.codes())
			.field("hits", &self.hits.load(Ordering::Relaxed))
			.field("misses", &self.misses.load(Ordering::Relaxed))
			.finish()
	}
}
