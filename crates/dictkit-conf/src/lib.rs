//! Settings for dictkit.
//!
//! [`DictSettings`] describes where dictionaries come from and how long a
//! fetch may take. [`SettingsLoader`] builds it from layered sources, later
//! layers overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. a TOML file
//! 3. environment variables (`DICTKIT_BASE_URL`, `DICTKIT_FETCH_TIMEOUT_MS`, ...)
//!
//! ## Example
//!
//! ```
//! use dictkit_conf::SettingsLoader;
//! use std::time::Duration;
//!
//! let settings = SettingsLoader::new()
//! 	.with_toml_str("base_url = \"https://admin.example.com/api\"")
//! 	.build()
//! 	.unwrap();
//!
//! assert_eq!(settings.dict_url_prefix(), "https://admin.example.com/api/common/dict");
//! assert_eq!(settings.fetch_timeout(), Some(Duration::from_secs(30)));
//! ```

pub mod loader;
pub mod settings;
pub mod sources;

pub use loader::SettingsLoader;
pub use settings::DictSettings;
pub use sources::{ConfigSource, EnvSource, TomlSource};
