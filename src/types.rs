//! Type definitions for the catalog-browser application.
//!
//! This module contains the core records fetched from the catalog service:
//! shows and their episodes.

use serde::Deserialize;

/// Catalog identifier of a show.
pub type ShowId = u64;

/// Catalog identifier of an episode.
pub type EpisodeId = u64;

/// Image links as returned by the catalog.
#[derive(Debug, Default, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

/// Rating block as returned by the catalog.
#[derive(Debug, Default, Deserialize)]
pub struct RawRating {
    #[serde(default)]
    pub average: Option<f64>,
}

/// Raw show data as returned from the catalog service.
///
/// This struct is used for deserialization and then converted to [`Show`],
/// flattening the nested rating/image objects and replacing missing text
/// with empty strings.
#[derive(Debug, Deserialize)]
pub struct RawShow {
    pub id: ShowId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub rating: Option<RawRating>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<RawImage>,
}

/// Raw episode data as returned from the catalog service.
#[derive(Debug, Deserialize)]
pub struct RawEpisode {
    pub id: EpisodeId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub season: Option<u32>,
    /// Specials carry no number.
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<RawImage>,
}

/// A show in the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct Show {
    /// Unique identifier for the show.
    pub id: ShowId,

    /// Display name of the show.
    pub name: String,

    /// Genre labels, in catalog order.
    pub genres: Vec<String>,

    /// Airing status (e.g. "Running", "Ended").
    pub status: String,

    /// Average rating, if the catalog has one.
    pub rating: Option<f64>,

    /// Runtime in minutes.
    pub runtime: Option<u32>,

    /// HTML summary.
    pub summary: String,

    /// Medium-size poster URL.
    pub image_url: Option<String>,
}

impl From<RawShow> for Show {
    fn from(raw: RawShow) -> Self {
        Show {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            genres: raw.genres,
            status: raw.status.unwrap_or_default(),
            rating: raw.rating.and_then(|r| r.average),
            runtime: raw.runtime,
            summary: raw.summary.unwrap_or_default(),
            image_url: raw.image.and_then(|i| i.medium),
        }
    }
}

/// An episode of a show.
#[derive(Clone, Debug, PartialEq)]
pub struct Episode {
    /// Unique identifier for the episode.
    pub id: EpisodeId,

    /// Episode title.
    pub name: String,

    /// Season number.
    pub season: u32,

    /// Episode number within the season (0 for specials).
    pub number: u32,

    /// Catalog page for the episode.
    pub url: String,

    /// HTML summary.
    pub summary: String,

    /// Medium-size still URL.
    pub image_url: Option<String>,
}

impl From<RawEpisode> for Episode {
    fn from(raw: RawEpisode) -> Self {
        Episode {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            season: raw.season.unwrap_or_default(),
            number: raw.number.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            summary: raw.summary.unwrap_or_default(),
            image_url: raw.image.and_then(|i| i.medium),
        }
    }
}

impl Episode {
    /// Season/episode code, zero padded.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_browser::types::Episode;
    ///
    /// let ep = Episode {
    ///     id: 1,
    ///     name: "Pilot".to_string(),
    ///     season: 1,
    ///     number: 2,
    ///     url: String::new(),
    ///     summary: String::new(),
    ///     image_url: None,
    /// };
    /// assert_eq!(ep.code(), "S01E02");
    /// ```
    pub fn code(&self) -> String {
        format!("S{:02}E{:02}", self.season, self.number)
    }

    /// Format the episode for selection menus.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_browser::types::Episode;
    ///
    /// let ep = Episode {
    ///     id: 7,
    ///     name: "Winter Is Coming".to_string(),
    ///     season: 1,
    ///     number: 1,
    ///     url: String::new(),
    ///     summary: String::new(),
    ///     image_url: None,
    /// };
    /// assert_eq!(ep.to_display(), "S01E01 - Winter Is Coming");
    /// ```
    pub fn to_display(&self) -> String {
        format!("{} - {}", self.code(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_from_full_record() {
        let raw: RawShow = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Under the Dome",
                "genres": ["Drama", "Science-Fiction"],
                "status": "Ended",
                "rating": {"average": 6.5},
                "runtime": 60,
                "summary": "<p>A town trapped.</p>",
                "image": {"medium": "https://img/m.jpg", "original": "https://img/o.jpg"}
            }"#,
        )
        .unwrap();
        let show = Show::from(raw);
        assert_eq!(show.id, 1);
        assert_eq!(show.genres, vec!["Drama", "Science-Fiction"]);
        assert_eq!(show.rating, Some(6.5));
        assert_eq!(show.runtime, Some(60));
        assert_eq!(show.image_url.as_deref(), Some("https://img/m.jpg"));
    }

    #[test]
    fn test_show_tolerates_nulls() {
        let raw: RawShow = serde_json::from_str(
            r#"{"id": 9, "name": null, "rating": {"average": null}, "runtime": null,
                "summary": null, "image": null}"#,
        )
        .unwrap();
        let show = Show::from(raw);
        assert_eq!(show.name, "");
        assert_eq!(show.summary, "");
        assert!(show.genres.is_empty());
        assert!(show.rating.is_none());
        assert!(show.image_url.is_none());
    }

    #[test]
    fn test_episode_special_has_number_zero() {
        let raw: RawEpisode = serde_json::from_str(
            r#"{"id": 4, "name": "Special", "season": 2, "number": null,
                "url": "https://x/4", "summary": null, "image": null}"#,
        )
        .unwrap();
        let ep = Episode::from(raw);
        assert_eq!(ep.number, 0);
        assert_eq!(ep.summary, "");
        assert_eq!(ep.code(), "S02E00");
    }

    #[test]
    fn test_episode_to_display_double_digits() {
        let ep = Episode {
            id: 3,
            name: "Finale".to_string(),
            season: 12,
            number: 24,
            url: String::new(),
            summary: String::new(),
            image_url: None,
        };
        assert_eq!(ep.to_display(), "S12E24 - Finale");
    }
}
