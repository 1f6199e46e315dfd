//! Dictionary item types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// A single label/value option of a dictionary
///
/// The value is kept as raw JSON because the console serves both numeric
/// and string values (`{"label": "Male", "value": 1}`,
/// `{"label": "Enabled", "value": "1"}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictItem {
	/// Text shown to the user
	pub label: String,
	/// Value submitted back to the server
	pub value: Value,
	/// Whether the option is selectable
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub disabled: Option<bool>,
	/// Tag color used by status badges
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	/// Free-form extra payload
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extra: Option<String>,
}

impl DictItem {
	/// Create an item with only a label and a value
	///
	/// # Examples
	///
	/// ```
	/// use dictkit_core::DictItem;
	/// use serde_json::json;
	///
	/// let item = DictItem::new("Male", 1);
	/// assert_eq!(item.label, "Male");
	/// assert_eq!(item.value, json!(1));
	/// assert!(item.color.is_none());
	/// ```
	pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
		Self {
			label: label.into(),
			value: value.into(),
			disabled: None,
			color: None,
			extra: None,
		}
	}

	pub fn with_color(mut self, color: impl Into<String>) -> Self {
		self.color = Some(color.into());
		self
	}

	pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
		self.extra = Some(extra.into());
		self
	}

	pub fn disabled(mut self, disabled: bool) -> Self {
		self.disabled = Some(disabled);
		self
	}

	/// Whether the option can be picked. Items without the flag are enabled.
	pub fn is_enabled(&self) -> bool {
		!self.disabled.unwrap_or(false)
	}
}

/// Ordered, immutable sequence of dictionary items
///
/// Shared by the store, the in-flight fetch and every binding that observes
/// the code, so cloning never copies the items.
pub type DictItems = Arc<[DictItem]>;

/// The empty sequence bindings start with
pub fn empty_items() -> DictItems {
	Arc::from(Vec::new())
}
