//! TMDB session settings and error payloads.

use serde::Deserialize;

/// Optional proxy routing for every request of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProxyConfig {
    /// Whether requests are routed through the proxies below.
    #[serde(default)]
    pub enabled: bool,
    /// Proxy URI for plain `http://` targets.
    #[serde(default)]
    pub http: Option<String>,
    /// Proxy URI for `https://` targets.
    #[serde(default)]
    pub https: Option<String>,
}

/// TMDB error payload returned alongside non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbErrorResponse {
    /// TMDB internal status code.
    #[serde(default)]
    pub status_code: u32,
    /// Human-readable message.
    pub status_message: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_error_response() {
        // Arrange
        let json = r#"{"status_code":34,"status_message":"The resource you requested could not be found.","success":false}"#;

        // Act
        let error: TmdbErrorResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(error.status_code, 34);
        assert!(error.status_message.contains("could not be found"));
    }

    #[test]
    fn test_proxy_config_defaults_to_disabled() {
        // Arrange & Act
        let proxy: ProxyConfig = serde_json::from_str("{}").unwrap();

        // Assert
        assert_eq!(proxy, ProxyConfig::default());
        assert!(!proxy.enabled);
    }
}
