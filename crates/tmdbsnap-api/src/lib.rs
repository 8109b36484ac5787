//! Request gateway for tmdbsnap.
//!
//! Owns the authenticated, localized HTTP session against the TMDB v3 API.

/// TMDB API client.
pub mod tmdb;
