//! View records and the render surface they are pushed to.
//!
//! The mapping from [`Show`]/[`Episode`] to display records is a pure
//! transform; the [`RenderSurface`] trait is the only thing the synchronizer
//! knows about whatever actually draws them.

use crate::filter::SHOW_ALL;
use crate::types::{Episode, Show, ShowId};
use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Remove HTML tags from catalog summaries.
///
/// # Examples
///
/// ```
/// use catalog_browser::view::strip_tags;
///
/// assert_eq!(strip_tags("<p>A <b>bold</b> move.</p>"), "A bold move.");
/// ```
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").trim().to_string()
}

/// Which list is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Shows,
    Episodes,
}

/// Status line contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// One entry of a picker (drop-down).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub value: String,
    pub label: String,
}

/// Picker contents plus the currently selected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    pub options: Vec<PickerOption>,
    pub selected: String,
}

impl Picker {
    /// Index of the selected option, if it is present.
    pub fn selected_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.value == self.selected)
    }
}

/// Display record for a show.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowCard {
    pub id: ShowId,
    pub title: String,
    pub image_url: Option<String>,
    pub genres: String,
    pub status: String,
    pub rating: String,
    pub runtime: String,
    pub summary: String,
}

impl From<&Show> for ShowCard {
    fn from(show: &Show) -> Self {
        ShowCard {
            id: show.id,
            title: show.name.clone(),
            image_url: show.image_url.clone(),
            genres: show.genres.join(", "),
            status: show.status.clone(),
            rating: show
                .rating
                .map(|r| r.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            runtime: show
                .runtime
                .map(|r| r.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            summary: strip_tags(&show.summary),
        }
    }
}

/// Display record for an episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeCard {
    pub title: String,
    pub url: String,
    pub image_url: Option<String>,
    pub summary: String,
}

impl From<&Episode> for EpisodeCard {
    fn from(episode: &Episode) -> Self {
        EpisodeCard {
            title: format!("{} - {}", episode.name, episode.code()),
            url: episode.url.clone(),
            image_url: episode.image_url.clone(),
            summary: strip_tags(&episode.summary),
        }
    }
}

/// Episode picker: a show-all sentinel followed by every episode.
pub fn episode_picker(episodes: &[Episode], selected: &str) -> Picker {
    let mut options = vec![PickerOption {
        value: SHOW_ALL.to_string(),
        label: "Select an episode...".to_string(),
    }];
    options.extend(episodes.iter().map(|e| PickerOption {
        value: e.id.to_string(),
        label: e.to_display(),
    }));
    Picker {
        options,
        selected: selected.to_string(),
    }
}

/// Show picker. Unless `keep_order` is set, shows are sorted by name,
/// ignoring case.
pub fn show_picker(shows: &[&Show], keep_order: bool, selected: &str) -> Picker {
    let mut list: Vec<&Show> = shows.to_vec();
    if !keep_order {
        list.sort_by_cached_key(|s| s.name.to_lowercase());
    }

    let mut options = vec![PickerOption {
        value: SHOW_ALL.to_string(),
        label: "Select a show...".to_string(),
    }];
    options.extend(list.iter().map(|s| PickerOption {
        value: s.id.to_string(),
        label: s.name.clone(),
    }));
    Picker {
        options,
        selected: selected.to_string(),
    }
}

/// A target that displays the browser's lists and messages.
pub trait RenderSurface {
    /// Bring one of the two lists to the front.
    fn show_view(&mut self, view: View);

    /// Replace the shows list.
    fn render_shows(&mut self, cards: Vec<ShowCard>);

    /// Replace the episodes list.
    fn render_episodes(&mut self, cards: Vec<EpisodeCard>);

    /// Set or hide the counter line.
    fn set_counter(&mut self, text: Option<String>);

    /// Set or hide the status line.
    fn set_status(&mut self, status: Option<Status>);

    /// Set or hide the show picker.
    fn set_show_picker(&mut self, picker: Option<Picker>);

    /// Set or hide the episode picker.
    fn set_episode_picker(&mut self, picker: Option<Picker>);

    /// Overwrite the text in the search input.
    fn set_search_text(&mut self, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(id: u64, name: &str) -> Show {
        Show {
            id,
            name: name.to_string(),
            genres: vec!["Drama".to_string(), "Thriller".to_string()],
            status: "Ended".to_string(),
            rating: None,
            runtime: Some(45),
            summary: "<p>Plot.</p>".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_show_card_fills_missing_values() {
        let card = ShowCard::from(&show(1, "Alpha"));
        assert_eq!(card.genres, "Drama, Thriller");
        assert_eq!(card.rating, "N/A");
        assert_eq!(card.runtime, "45");
        assert_eq!(card.summary, "Plot.");
    }

    #[test]
    fn test_episode_card_title() {
        let ep = Episode {
            id: 10,
            name: "Pilot".to_string(),
            season: 1,
            number: 1,
            url: "https://example.com/10".to_string(),
            summary: "<p>It begins.</p>".to_string(),
            image_url: None,
        };
        let card = EpisodeCard::from(&ep);
        assert_eq!(card.title, "Pilot - S01E01");
        assert_eq!(card.summary, "It begins.");
    }

    #[test]
    fn test_show_picker_sorts_case_insensitively() {
        let shows = [show(1, "beta"), show(2, "Alpha"), show(3, "gamma")];
        let refs: Vec<&Show> = shows.iter().collect();
        let picker = show_picker(&refs, false, "2");
        let labels: Vec<_> = picker.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Select a show...", "Alpha", "beta", "gamma"]);
        assert_eq!(picker.selected_index(), Some(1));
    }

    #[test]
    fn test_show_picker_keep_order() {
        let shows = [show(1, "beta"), show(2, "Alpha")];
        let refs: Vec<&Show> = shows.iter().collect();
        let picker = show_picker(&refs, true, SHOW_ALL);
        assert_eq!(picker.options[1].value, "1");
        assert_eq!(picker.selected_index(), Some(0));
    }

    #[test]
    fn test_episode_picker_starts_with_sentinel() {
        let picker = episode_picker(&[], SHOW_ALL);
        assert_eq!(picker.options.len(), 1);
        assert_eq!(picker.options[0].value, "*");
    }
}
