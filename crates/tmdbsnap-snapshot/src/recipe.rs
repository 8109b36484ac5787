//! Per-kind call recipes.
//!
//! The remote calls needed to assemble one snapshot are static data: which
//! endpoints, in which order, which sub-resources to expand, and which
//! details fields carry the display title.

use std::num::NonZeroU64;

use serde_json::Value;

use super::media::MediaKind;

/// Title echoed when the details document has neither title field.
pub const UNKNOWN_TITLE: &str = "N/A";

/// One remote call and the document it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteCall {
    /// Document name; stored as `<document>.json`.
    pub document: &'static str,
    /// Endpoint suffix after `/<kind>/<id>`; empty for the details call.
    pub suffix: &'static str,
    /// Sub-resources requested through `append_to_response`.
    pub append_to_response: &'static [&'static str],
}

impl RemoteCall {
    /// Endpoint path relative to the API base URL.
    #[must_use]
    pub fn endpoint(&self, kind: MediaKind, id: NonZeroU64) -> String {
        if self.suffix.is_empty() {
            format!("{kind}/{id}")
        } else {
            format!("{kind}/{id}/{}", self.suffix)
        }
    }

    /// Extra query parameters for this call.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        if self.append_to_response.is_empty() {
            Vec::new()
        } else {
            vec![("append_to_response", self.append_to_response.join(","))]
        }
    }
}

/// Ordered call list and title fields for one media kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    /// Calls in issue order. The first one is always the details document.
    pub calls: &'static [RemoteCall],
    /// Details fields tried in order for the display title.
    pub title_fields: &'static [&'static str],
}

static MOVIE: Recipe = Recipe {
    calls: &[
        RemoteCall {
            document: "details",
            suffix: "",
            append_to_response: &[
                "credits",
                "alternative_titles",
                "translations",
                "external_ids",
            ],
        },
        RemoteCall {
            document: "release_dates",
            suffix: "release_dates",
            append_to_response: &[],
        },
    ],
    title_fields: &["title", "original_title"],
};

static TV: Recipe = Recipe {
    calls: &[
        RemoteCall {
            document: "details",
            suffix: "",
            append_to_response: &[
                "credits",
                "alternative_titles",
                "translations",
                "external_ids",
                "aggregate_credits",
            ],
        },
        RemoteCall {
            document: "content_ratings",
            suffix: "content_ratings",
            append_to_response: &[],
        },
    ],
    title_fields: &["name", "original_name"],
};

impl Recipe {
    /// Looks up the recipe for `kind`.
    #[must_use]
    pub const fn for_kind(kind: MediaKind) -> &'static Self {
        match kind {
            MediaKind::Movie => &MOVIE,
            MediaKind::Tv => &TV,
        }
    }

    /// Picks the display title from a details document.
    ///
    /// Prefers the localized field, then the original-language field, then
    /// [`UNKNOWN_TITLE`]. Non-string values are skipped.
    #[must_use]
    pub fn display_title(&self, details: &Value) -> String {
        self.title_fields
            .iter()
            .find_map(|field| details.get(field).and_then(Value::as_str))
            .map_or_else(|| String::from(UNKNOWN_TITLE), String::from)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    fn id(n: u64) -> NonZeroU64 {
        NonZeroU64::new(n).unwrap()
    }

    #[test]
    fn test_movie_recipe_endpoints_in_order() {
        // Arrange
        let recipe = Recipe::for_kind(MediaKind::Movie);

        // Act
        let endpoints: Vec<String> = recipe
            .calls
            .iter()
            .map(|call| call.endpoint(MediaKind::Movie, id(550)))
            .collect();

        // Assert
        assert_eq!(endpoints, vec!["movie/550", "movie/550/release_dates"]);
        assert_eq!(
            recipe.calls.iter().map(|call| call.document).collect::<Vec<_>>(),
            vec!["details", "release_dates"]
        );
    }

    #[test]
    fn test_tv_recipe_endpoints_in_order() {
        // Arrange
        let recipe = Recipe::for_kind(MediaKind::Tv);

        // Act
        let endpoints: Vec<String> = recipe
            .calls
            .iter()
            .map(|call| call.endpoint(MediaKind::Tv, id(1399)))
            .collect();

        // Assert
        assert_eq!(endpoints, vec!["tv/1399", "tv/1399/content_ratings"]);
        assert_eq!(
            recipe.calls.iter().map(|call| call.document).collect::<Vec<_>>(),
            vec!["details", "content_ratings"]
        );
    }

    #[test]
    fn test_details_calls_expand_sub_resources() {
        // Arrange
        let movie = Recipe::for_kind(MediaKind::Movie);
        let tv = Recipe::for_kind(MediaKind::Tv);

        // Act
        let movie_params = movie.calls.first().unwrap().params();
        let tv_params = tv.calls.first().unwrap().params();

        // Assert
        assert_eq!(
            movie_params,
            vec![(
                "append_to_response",
                String::from("credits,alternative_titles,translations,external_ids")
            )]
        );
        assert_eq!(
            tv_params,
            vec![(
                "append_to_response",
                String::from(
                    "credits,alternative_titles,translations,external_ids,aggregate_credits"
                )
            )]
        );
    }

    #[test]
    fn test_secondary_calls_have_no_params() {
        // Arrange & Act & Assert
        for kind in [MediaKind::Movie, MediaKind::Tv] {
            let recipe = Recipe::for_kind(kind);
            assert!(recipe.calls.last().unwrap().params().is_empty());
        }
    }

    #[test]
    fn test_display_title_prefers_localized() {
        // Arrange
        let details = json!({"title": "搏击俱乐部", "original_title": "Fight Club"});

        // Act
        let title = Recipe::for_kind(MediaKind::Movie).display_title(&details);

        // Assert
        assert_eq!(title, "搏击俱乐部");
    }

    #[test]
    fn test_display_title_falls_back_to_original() {
        // Arrange
        let details = json!({"name": null, "original_name": "Game of Thrones"});

        // Act
        let title = Recipe::for_kind(MediaKind::Tv).display_title(&details);

        // Assert
        assert_eq!(title, "Game of Thrones");
    }

    #[test]
    fn test_display_title_unknown() {
        // Arrange
        let details = json!({"id": 1399});

        // Act
        let title = Recipe::for_kind(MediaKind::Tv).display_title(&details);

        // Assert
        assert_eq!(title, UNKNOWN_TITLE);
    }

    #[test]
    fn test_display_title_ignores_other_kind_fields() {
        // Arrange
        let details = json!({"name": "Wrong field"});

        // Act
        let title = Recipe::for_kind(MediaKind::Movie).display_title(&details);

        // Assert
        assert_eq!(title, UNKNOWN_TITLE);
    }
}
