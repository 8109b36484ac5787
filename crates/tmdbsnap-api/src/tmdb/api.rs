//! `MetadataGateway` trait definition.
#![allow(clippy::future_not_send)]

use serde_json::Value;

use super::error::RequestError;

/// Remote metadata gateway.
///
/// Abstracts the single GET operation so the snapshot orchestrator can be
/// driven by a recording fake in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MetadataGateway: Send)]
pub trait LocalMetadataGateway {
    /// Fetches one JSON document from `path` (relative to the API base URL).
    ///
    /// `extra` is merged with the session's fixed `api_key` and `language`
    /// parameters; the fixed parameters win on collision.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] on transport failure, timeout, a non-success
    /// HTTP status, or an undecodable body.
    async fn request(&self, path: &str, extra: &[(&str, String)]) -> Result<Value, RequestError>;
}
