//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, Proxy};
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::api::LocalMetadataGateway;
use super::error::{ConfigurationError, RequestError};
use super::types::{ProxyConfig, TmdbErrorResponse};

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "zh-CN";

/// API key value shipped in the example config; treated as unset.
pub const PLACEHOLDER_API_KEY: &str = "your_tmdb_api_key_here";

/// Upper bound on a single request, connection included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Query parameters injected into every request. Callers cannot override them.
const FIXED_PARAMS: [&str; 2] = ["api_key", "language"];

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client (timeout and proxies baked in).
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// v3 API key, sent as the `api_key` query parameter.
    api_key: String,
    /// Response language, sent as the `language` query parameter.
    language: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    language: Option<String>,
    user_agent: Option<String>,
    proxy: Option<ProxyConfig>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            language: None,
            user_agent: None,
            proxy: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the v3 API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the response language (default: `zh-CN`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the User-Agent (default: `tmdbsnap-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Routes requests through the given proxies when `proxy.enabled` is set.
    #[must_use]
    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Overrides the request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is unset, blank, or the example placeholder.
    /// - proxy routing is enabled with no URI or an unparsable URI.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient, ConfigurationError> {
        let api_key = self
            .api_key
            .map(|key| String::from(key.trim()))
            .filter(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY)
            .ok_or(ConfigurationError::MissingApiKey)?;

        let language = self
            .language
            .map(|lang| String::from(lang.trim()))
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE));

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).map_err(ConfigurationError::InvalidBaseUrl)?,
        };

        let user_agent = self.user_agent.unwrap_or_else(|| {
            String::from(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        });

        let mut builder = Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(REQUEST_TIMEOUT));

        if let Some(proxy) = self.proxy.filter(|p| p.enabled) {
            builder = apply_proxy(builder, &proxy)?;
            tracing::info!(
                http = proxy.http.as_deref().unwrap_or("-"),
                https = proxy.https.as_deref().unwrap_or("-"),
                "Proxy enabled"
            );
        }

        let http_client = builder.build().map_err(ConfigurationError::HttpClient)?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
            language,
        })
    }
}

/// Installs the configured proxies on the client builder.
fn apply_proxy(
    mut builder: ClientBuilder,
    proxy: &ProxyConfig,
) -> Result<ClientBuilder, ConfigurationError> {
    let http = proxy.http.as_deref().filter(|uri| !uri.trim().is_empty());
    let https = proxy.https.as_deref().filter(|uri| !uri.trim().is_empty());
    if http.is_none() && https.is_none() {
        return Err(ConfigurationError::EmptyProxy);
    }

    if let Some(uri) = http {
        let url = parse_proxy_uri("http", uri)?;
        let route = Proxy::http(url.as_str()).map_err(|e| invalid_proxy("http", uri, &e))?;
        builder = builder.proxy(route);
    }
    if let Some(uri) = https {
        let url = parse_proxy_uri("https", uri)?;
        let route = Proxy::https(url.as_str()).map_err(|e| invalid_proxy("https", uri, &e))?;
        builder = builder.proxy(route);
    }
    Ok(builder)
}

/// Parses a proxy URI strictly; a scheme is mandatory.
fn parse_proxy_uri(scheme: &'static str, uri: &str) -> Result<Url, ConfigurationError> {
    Url::parse(uri.trim()).map_err(|e| invalid_proxy(scheme, uri, &e))
}

fn invalid_proxy(
    scheme: &'static str,
    uri: &str,
    reason: &impl std::fmt::Display,
) -> ConfigurationError {
    ConfigurationError::InvalidProxy {
        scheme,
        uri: String::from(uri),
        reason: reason.to_string(),
    }
}

/// Merges caller parameters with the fixed session parameters.
///
/// Caller entries named `api_key` or `language` are dropped so each fixed
/// parameter appears exactly once, with the session's value.
fn merge_query<'a>(
    extra: &'a [(&'a str, String)],
    api_key: &'a str,
    language: &'a str,
) -> Vec<(&'a str, &'a str)> {
    let mut query: Vec<(&str, &str)> = extra
        .iter()
        .filter(|(key, _)| !FIXED_PARAMS.contains(key))
        .map(|(key, value)| (*key, value.as_str()))
        .collect();
    query.push(("api_key", api_key));
    query.push(("language", language));
    query
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the session language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl LocalMetadataGateway for TmdbClient {
    #[instrument(skip_all, fields(path = path))]
    async fn request(&self, path: &str, extra: &[(&str, String)]) -> Result<Value, RequestError> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| RequestError::InvalidPath {
                path: String::from(path),
                source,
            })?;

        let query = merge_query(extra, &self.api_key, &self.language);
        tracing::info!("Requesting: {path}");
        tracing::debug!(
            params = ?query.iter().filter(|(key, _)| *key != "api_key").collect::<Vec<_>>(),
            "TMDB API request"
        );

        let response = self
            .http_client
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|e| RequestError::transport(path, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let message = serde_json::from_str::<TmdbErrorResponse>(&body).map_or(body, |error| {
                format!(
                    "code={}, message={}",
                    error.status_code, error.status_message
                )
            });
            return Err(RequestError::Status {
                path: String::from(path),
                status,
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RequestError::transport(path, e))?;
        serde_json::from_str(&body).map_err(|source| RequestError::Decode {
            path: String::from(path),
            source,
        })
    }
}
