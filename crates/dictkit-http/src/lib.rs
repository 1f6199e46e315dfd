//! HTTP dictionary fetcher for dictkit.
//!
//! [`HttpDictFetcher`] implements [`DictFetcher`](dictkit_loader::DictFetcher)
//! against the admin API: `GET {base_url}/common/dict/{code}` answering with
//! an [`ApiRes`] envelope whose `data` is the item list.

mod client;
mod response;

pub use client::HttpDictFetcher;
pub use response::ApiRes;
