//! Internal dictionary entry structure

use dictkit_core::DictItems;
use std::time::{Duration, Instant};

/// Resolved dictionary with the time it was cached
#[derive(Debug, Clone)]
pub(crate) struct DictEntry {
	pub(crate) items: DictItems,
	pub(crate) cached_at: Instant,
}

impl DictEntry {
	pub(crate) fn new(items: DictItems) -> Self {
		Self {
			items,
			cached_at: Instant::now(),
		}
	}

	pub(crate) fn age(&self) -> Duration {
		self.cached_at.elapsed()
	}
}
