//! Store statistics and entry information

use std::time::Duration;

/// Dictionary entry information for inspection
#[derive(Debug, Clone, PartialEq)]
pub struct DictEntryInfo {
	/// The dictionary code
	pub code: String,
	/// Number of items in the dictionary
	pub item_count: usize,
	/// Time since the dictionary was cached
	pub age: Duration,
}

/// Store statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictStoreStatistics {
	/// Number of lookups that found a dictionary
	pub hits: u64,
	/// Number of lookups that found nothing
	pub misses: u64,
	/// Total number of lookups
	pub total_requests: u64,
	/// Current number of cached dictionaries
	pub entry_count: u64,
	/// Total number of items across all cached dictionaries
	pub item_count: u64,
}

impl DictStoreStatistics {
	/// Calculate hit rate (0.0 to 1.0)
	///
	/// # Examples
	///
	/// ```
	/// use dictkit_cache::DictStoreStatistics;
	///
	/// let mut stats = DictStoreStatistics::default();
	/// stats.hits = 75;
	/// stats.misses = 25;
	/// stats.total_requests = 100;
	///
	/// assert_eq!(stats.hit_rate(), 0.75);
	/// ```
	pub fn hit_rate(&self) -> f64 {
		if self.total_requests == 0 {
			0.0
		} else {
			self.hits as f64 / self.total_requests as f64
		}
	}

	/// Calculate miss rate (0.0 to 1.0)
	pub fn miss_rate(&self) -> f64 {
		if self.total_requests == 0 {
			0.0
		} else {
			self.misses as f64 / self.total_requests as f64
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_statistics_rates_zero_requests() {
		let stats = DictStoreStatistics::default();
		assert_eq!(stats.hit_rate(), 0.0);
		assert_eq!(stats.miss_rate(), 0.0);
	}

	#[rstest]
	fn test_statistics_miss_rate() {
		let stats = DictStoreStatistics {
			hits: 1,
			misses: 3,
			total_requests: 4,
			..Default::default()
		};
		assert_eq!(stats.miss_rate(), 0.75);
	}
}
