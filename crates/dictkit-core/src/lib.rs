//! Core types for dictkit.
//!
//! This crate holds the pieces every other dictkit crate agrees on:
//!
//! - **Types**: [`DictItem`] and the shared [`DictItems`] sequence
//! - **Exception**: the [`DictError`] taxonomy and [`DictResult`] alias
//! - **Reactive**: [`Signal`], the observable binding handed to consumers
//!
//! ## Example
//!
//! ```
//! use dictkit_core::{DictItem, Signal, empty_items};
//!
//! let binding = Signal::new(empty_items());
//! assert!(binding.get().is_empty());
//!
//! binding.set(vec![DictItem::new("Male", 1)].into());
//! assert_eq!(binding.get()[0].label, "Male");
//! ```

pub mod exception;
pub mod reactive;
pub mod types;

pub use exception::{DictError, DictResult};
pub use reactive::Signal;
pub use types::{DictItem, DictItems, empty_items};
