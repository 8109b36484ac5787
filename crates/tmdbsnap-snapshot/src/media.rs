//! Media kinds and references.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use thiserror::Error;

/// Kind of title tracked by TMDB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Feature film (`/movie`).
    Movie,
    /// Television series (`/tv`).
    Tv,
}

impl MediaKind {
    /// Path segment used both by the API and by the storage layout.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }

    /// Human-readable label for operator messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::Tv => "TV Show",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a media kind cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown media kind `{0}` (expected `movie` or `tv`)")]
pub struct ParseMediaKindError(pub String);

impl FromStr for MediaKind {
    type Err = ParseMediaKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "film" => Ok(Self::Movie),
            "tv" | "show" | "series" => Ok(Self::Tv),
            _ => Err(ParseMediaKindError(String::from(s))),
        }
    }
}

/// A title to capture, identified by kind and TMDB id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaReference {
    /// Media kind.
    pub kind: MediaKind,
    /// TMDB id (always positive).
    pub id: NonZeroU64,
}

impl MediaReference {
    /// Creates a reference.
    #[must_use]
    pub const fn new(kind: MediaKind, id: NonZeroU64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for MediaReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}
