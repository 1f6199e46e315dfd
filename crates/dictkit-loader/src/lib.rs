//! Dictionary loader for dictkit.
//!
//! [`DictLoader`] turns a list of dictionary codes into reactive bindings
//! and makes sure each code is fetched at most once at a time:
//!
//! 1. every binding starts out as an empty list;
//! 2. codes already in the [`DictStore`](dictkit_cache::DictStore) are served
//!    from it without touching the network;
//! 3. codes with a fetch in flight attach to that fetch;
//! 4. anything else dispatches a new fetch through the [`DictFetcher`],
//!    registered in [`PendingRequests`] until it settles.
//!
//! A failed fetch is logged and resolves as an empty list. Failures are not
//! cached, so the next request for the code tries again.
//!
//! ## Example
//!
//! ```
//! use dictkit_core::DictItem;
//! use dictkit_loader::{DictLoader, fetcher_fn};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let loader = DictLoader::new(fetcher_fn(|code: String| async move {
//! 	Ok(vec![DictItem::new(format!("{code} option"), 1)])
//! }));
//!
//! let mut refs = loader.use_dict(["gender"]);
//! assert!(refs.items("gender").unwrap().is_empty());
//!
//! refs.settled().await;
//! assert_eq!(refs.items("gender").unwrap()[0].label, "gender option");
//! assert!(loader.store().contains("gender"));
//! # }
//! ```

mod fetcher;
mod loader;
mod pending;
mod refs;

pub use fetcher::{DictFetcher, FnFetcher, fetcher_fn};
pub use loader::{DEFAULT_FETCH_TIMEOUT, DictLoader};
pub use pending::PendingRequests;
pub use refs::DictRefs;
