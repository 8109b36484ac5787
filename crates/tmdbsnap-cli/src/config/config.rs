//! `AppConfig` struct and TOML loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tmdbsnap_api::tmdb::{ProxyConfig, TmdbClient};
use tmdbsnap_snapshot::DEFAULT_OUTPUT_DIR;
use url::Url;

/// Environment variable that overrides `api_key` when set.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB v3 API key.
    #[serde(default, alias = "tmdb_api_key")]
    pub api_key: Option<String>,
    /// Response language (default: `zh-CN`).
    #[serde(default)]
    pub language: Option<String>,
    /// Snapshot root directory (default: `../tmdb_config`).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// API base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Proxy routing.
    #[serde(default)]
    pub proxy: ProxyConfig,
}

impl AppConfig {
    /// Loads config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or
    /// cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!(
                "config file {} not found; copy config.example.toml there and set api_key",
                path.display()
            );
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Replaces `api_key` with `value` when it is set and non-blank.
    pub fn apply_api_key_override(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|key| !key.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// Resolves the snapshot root: CLI override, then config, then default.
    #[must_use]
    pub fn output_root(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// Builds the TMDB client described by this config.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing, the base URL or a proxy
    /// URI is invalid, or the HTTP client cannot be built.
    pub fn tmdb_client(&self) -> Result<TmdbClient> {
        let mut builder = TmdbClient::builder()
            .api_key(self.api_key.clone().unwrap_or_default())
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .proxy(self.proxy.clone());
        if let Some(language) = &self.language {
            builder = builder.language(language);
        }
        if let Some(base_url) = &self.base_url {
            let url = Url::parse(base_url)
                .with_context(|| format!("invalid base_url `{base_url}`"))?;
            builder = builder.base_url(url);
        }
        Ok(builder.build()?)
    }
}
