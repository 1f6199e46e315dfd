//! Reactive bindings handed out to dictionary consumers.

pub mod signal;

pub use signal::{Signal, SignalId};
