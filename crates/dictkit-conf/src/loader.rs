//! Layered settings loader

use crate::settings::DictSettings;
use crate::sources::{ConfigSource, EnvSource, TomlSource};
use dictkit_core::{DictError, DictResult};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::PathBuf;

/// Builds [`DictSettings`] from defaults overridden by configured sources
///
/// Sources are applied in ascending priority; among equal priorities the one
/// added last wins.
#[derive(Default)]
pub struct SettingsLoader {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsLoader {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add any configuration source
	pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Add a TOML file
	pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
		self.with_source(TomlSource::file(path))
	}

	/// Add an inline TOML document
	pub fn with_toml_str(self, document: impl Into<String>) -> Self {
		self.with_source(TomlSource::inline(document))
	}

	/// Add environment variables with the default `DICTKIT_` prefix
	pub fn with_env(self) -> Self {
		self.with_source(EnvSource::new())
	}

	/// Add environment variables with a custom prefix
	pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
		self.with_source(EnvSource::with_prefix(prefix))
	}

	/// Merge every source over the defaults and validate the result
	pub fn build(&self) -> DictResult<DictSettings> {
		let mut merged: IndexMap<String, Value> = match serde_json::to_value(DictSettings::default())? {
			Value::Object(map) => map.into_iter().collect(),
			_ => IndexMap::new(),
		};

		let mut ordered: Vec<&dyn ConfigSource> = self.sources.iter().map(|s| s.as_ref()).collect();
		ordered.sort_by_key(|source| source.priority());

		for source in ordered {
			merged.extend(source.load()?);
		}

		let object: serde_json::Map<String, Value> = merged.into_iter().collect();
		let settings: DictSettings = serde_json::from_value(Value::Object(object))
			.map_err(|e| DictError::Config(format!("invalid dictionary settings: {e}")))?;
		settings.validate()?;
		Ok(settings)
	}
}
