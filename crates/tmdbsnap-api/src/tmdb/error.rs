//! Gateway error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while building the TMDB session.
///
/// These are fatal at startup: nothing can be fetched without a valid session.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The API key is absent, blank, or still the example placeholder.
    #[error("TMDB API key is not set; add `api_key` to the config file or export TMDB_API_KEY")]
    MissingApiKey,

    /// Proxy routing is enabled but no proxy URI is configured.
    #[error("proxy is enabled but neither `http` nor `https` is set")]
    EmptyProxy,

    /// A configured proxy URI could not be parsed.
    #[error("invalid {scheme} proxy URI `{uri}`: {reason}")]
    InvalidProxy {
        /// Which proxy slot (`http` or `https`).
        scheme: &'static str,
        /// The rejected URI.
        uri: String,
        /// Parser message.
        reason: String,
    },

    /// The API base URL could not be parsed.
    #[error("invalid TMDB base URL")]
    InvalidBaseUrl(#[source] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Errors raised by a single gateway request.
///
/// Any of these aborts the capture in progress. The gateway never retries.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint path `{path}`")]
    InvalidPath {
        /// Requested endpoint path.
        path: String,
        /// URL parser error.
        #[source]
        source: url::ParseError,
    },

    /// Connection failure, timeout, or a body that could not be read.
    #[error("{cause} while requesting {path}")]
    Transport {
        /// Requested endpoint path.
        path: String,
        /// Short description of the failure class.
        cause: &'static str,
        /// Underlying reqwest error, stripped of the URL.
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("TMDB API error (HTTP {status}) for {path}: {message}")]
    Status {
        /// Requested endpoint path.
        path: String,
        /// HTTP status code.
        status: StatusCode,
        /// `code=<status_code>, message=<status_message>` for a TMDB error object, otherwise the raw body.
        message: String,
    },

    /// The success body was not valid JSON.
    #[error("failed to decode JSON response from {path}")]
    Decode {
        /// Requested endpoint path.
        path: String,
        /// JSON parser error.
        #[source]
        source: serde_json::Error,
    },
}

impl RequestError {
    /// Wraps a reqwest error, dropping the request URL so the API key never
    /// reaches logs or the terminal.
    pub(crate) fn transport(path: &str, source: reqwest::Error) -> Self {
        let cause = if source.is_timeout() {
            "request timed out"
        } else if source.is_connect() {
            "connection failed"
        } else if source.is_body() || source.is_decode() {
            "failed to read response body"
        } else {
            "request failed"
        };
        Self::Transport {
            path: String::from(path),
            cause,
            source: source.without_url(),
        }
    }

    /// Returns the endpoint path the failed request targeted.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::InvalidPath { path, .. }
            | Self::Transport { path, .. }
            | Self::Status { path, .. }
            | Self::Decode { path, .. } => path,
        }
    }
}
