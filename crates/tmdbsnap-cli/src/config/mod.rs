//! Application configuration module.
//!
//! Loads the TOML config file holding the TMDB API key, response language,
//! proxy routing, and snapshot output directory.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{API_KEY_ENV, AppConfig};
pub use paths::resolve_config_path;
