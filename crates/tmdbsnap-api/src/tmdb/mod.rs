//! TMDB API client module.
//!
//! Issues authenticated GET requests against the TMDB API v3 endpoints
//! and hands the decoded JSON documents back untouched.

mod api;
mod client;
mod error;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMetadataGateway, MetadataGateway};
#[allow(clippy::module_name_repetitions)]
pub use client::{
    DEFAULT_BASE_URL, DEFAULT_LANGUAGE, PLACEHOLDER_API_KEY, REQUEST_TIMEOUT, TmdbClient,
    TmdbClientBuilder,
};
pub use error::{ConfigurationError, RequestError};
pub use types::ProxyConfig;
