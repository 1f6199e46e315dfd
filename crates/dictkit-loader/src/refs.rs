//! Per-call dictionary bindings

use dictkit_core::{DictItems, Signal, empty_items};
use indexmap::IndexMap;
use std::fmt;
use tokio::task::JoinHandle;

/// Bindings returned by [`DictLoader::use_dict`](crate::DictLoader::use_dict)
///
/// Holds one [`Signal`] per distinct requested code, in request order. Each
/// signal starts empty and is overwritten when its dictionary resolves.
#[derive(Default)]
pub struct DictRefs {
	bindings: IndexMap<String, Signal<DictItems>>,
	tasks: Vec<JoinHandle<()>>,
}

impl DictRefs {
	/// Binding for `code`, reset to the empty list
	pub(crate) fn reset_binding(&mut self, code: &str) -> Signal<DictItems> {
		let binding = self
			.bindings
			.entry(code.to_string())
			.or_insert_with(|| Signal::new(empty_items()))
			.clone();
		binding.set(empty_items());
		binding
	}

	pub(crate) fn track(&mut self, task: JoinHandle<()>) {
		self.tasks.push(task);
	}

	/// Get the binding for `code`
	pub fn get(&self, code: &str) -> Option<&Signal<DictItems>> {
		self.bindings.get(code)
	}

	/// Current items bound to `code`
	pub fn items(&self, code: &str) -> Option<DictItems> {
		self.bindings.get(code).map(Signal::get)
	}

	/// Requested codes in request order, without duplicates
	pub fn codes(&self) -> impl Iterator<Item = &str> {
		self.bindings.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Signal<DictItems>)> {
		self.bindings.iter().map(|(code, binding)| (code.as_str(), binding))
	}

	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}

	/// Whether some binding is still waiting for its fetch
	pub fn is_loading(&self) -> bool {
		self.tasks.iter().any(|task| !task.is_finished())
	}

	/// Wait until every binding of this call has received its dictionary
	///
	/// Bindings keep working without this; it exists for callers that need
	/// the final values before moving on.
	pub async fn settled(&mut self) {
		for task in self.tasks.drain(..) {
			if let Err(error) = task.await {
				tracing::warn!(%error, "dictionary binding task did not complete");
			}
		}
	}

	/// Take the bindings, detaching from the pending resolutions
	pub fn into_bindings(self) -> IndexMap<String, Signal<DictItems>> {
		self.bindings
	}
}

impl fmt::Debug for DictRefs {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DictRefs")
			.field("codes", &self.bindings.keys().collect::<Vec<_>>())
			.field("loading", &self.is_loading())
			.finish()
	}
}
