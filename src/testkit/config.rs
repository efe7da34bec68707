//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use std::path::Path;

use crate::infrastructure::config::Config;

/// Default configuration with a dummy API key.
pub fn config() -> Config {
    Config::parse_toml_with_key("", Some("test-key".into())).unwrap()
}

/// Default configuration storing history at `path`.
pub fn config_with_database(path: impl AsRef<Path>) -> Config {
    let mut config = config();
    config.database = path.as_ref().display().to_string();
    config
}
