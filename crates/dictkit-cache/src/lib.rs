//! Dictionary store for dictkit.
//!
//! [`DictStore`] is the single source of truth for resolved dictionaries:
//! a map from dictionary code to its ordered item list, shared by every
//! consumer that holds a clone of the store.
//!
//! The store owns no network logic. Entries are written by the loader after
//! a successful fetch and removed only through [`DictStore::delete_dict`] or
//! [`DictStore::clean_dict`] (for example on logout or tenant switch).
//!
//! ## Example
//!
//! ```
//! use dictkit_cache::DictStore;
//! use dictkit_core::DictItem;
//!
//! let store = DictStore::new();
//! store.set_dict("gender", vec![DictItem::new("Male", 1)]);
//!
//! assert_eq!(store.get_dict("gender").unwrap().len(), 1);
//! assert!(store.delete_dict("gender"));
//! assert!(store.get_dict("gender").is_none());
//! ```

mod entry;
mod statistics;
mod store;

pub use statistics::{DictEntryInfo, DictStoreStatistics};
pub use store::DictStore;
