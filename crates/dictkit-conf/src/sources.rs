//! Configuration sources for layered settings
//!
//! Provides the sources [`SettingsLoader`](crate::SettingsLoader) merges in
//! priority order (environment variables > TOML file > defaults).

use dictkit_core::{DictError, DictResult};
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> DictResult<IndexMap<String, Value>>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// TOML configuration source, read from a file or an inline document
pub struct TomlSource {
	origin: TomlOrigin,
}

enum TomlOrigin {
	File(PathBuf),
	Inline(String),
}

impl TomlSource {
	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self {
			origin: TomlOrigin::File(path.into()),
		}
	}

	pub fn inline(document: impl Into<String>) -> Self {
		Self {
			origin: TomlOrigin::Inline(document.into()),
		}
	}
}

impl ConfigSource for TomlSource {
	fn load(&self) -> DictResult<IndexMap<String, Value>> {
		let document = match &self.origin {
			TomlOrigin::File(path) => fs::read_to_string(path)?,
			TomlOrigin::Inline(document) => document.clone(),
		};

		let table: toml::Table = toml::from_str(&document)
			.map_err(|e| DictError::Config(format!("{}: {}", self.description(), e)))?;
		let value = serde_json::to_value(table)?;

		match value {
			Value::Object(map) => Ok(map.into_iter().collect()),
			_ => Err(DictError::Config(format!(
				"{}: expected a table at the top level",
				self.description()
			))),
		}
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		match &self.origin {
			TomlOrigin::File(path) => format!("TOML file: {}", path.display()),
			TomlOrigin::Inline(_) => "inline TOML".to_string(),
		}
	}
}

/// Environment variable configuration source
///
/// Reads variables starting with the prefix, strips it and lowercases the
/// rest: `DICTKIT_BASE_URL` becomes `base_url`. Keys ending in `_ms` are
/// parsed as milliseconds, with `none` mapping to an unset value.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Default prefix for dictkit variables
	pub const DEFAULT_PREFIX: &'static str = "DICTKIT_";

	/// Create a source reading variables with the default prefix
	///
	/// # Examples
	///
	/// ```
	/// use dictkit_conf::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::new();
	/// assert_eq!(source.description(), "Environment variables (prefix: DICTKIT_)");
	/// ```
	pub fn new() -> Self {
		Self::with_prefix(Self::DEFAULT_PREFIX)
	}

	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	fn parse_value(key: &str, raw: &str) -> DictResult<Value> {
		if !key.ends_with("_ms") {
			return Ok(Value::String(raw.to_string()));
		}

		let trimmed = raw.trim();
		if trimmed.eq_ignore_ascii_case("none") || trimmed.is_empty() {
			return Ok(Value::Null);
		}
		trimmed
			.parse::<u64>()
			.map(Value::from)
			.map_err(|_| DictError::Config(format!("{key} must be a number of milliseconds, got '{raw}'")))
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> DictResult<IndexMap<String, Value>> {
		let mut config = IndexMap::new();

		for (key, value) in std::env::vars() {
			let Some(stripped) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			let lower_key = stripped.to_lowercase();
			let parsed = Self::parse_value(&lower_key, &value)?;
			config.insert(lower_key, parsed);
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}
