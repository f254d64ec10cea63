//! Pure filtering over shows and episodes.
//!
//! Nothing here performs I/O or touches session state; callers pass in the
//! lists and the current filter inputs and get back borrowed views in the
//! original order.

use crate::types::{Episode, EpisodeId, Show};
use log::warn;

/// Picker value meaning "no specific episode".
pub const SHOW_ALL: &str = "*";

/// Episode picker selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpisodeFilter {
    /// No specific episode selected.
    #[default]
    All,
    /// Exactly one episode.
    Only(EpisodeId),
}

impl EpisodeFilter {
    /// Interpret a picker value. `"*"` and `""` both mean [`EpisodeFilter::All`].
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_browser::filter::EpisodeFilter;
    ///
    /// assert_eq!(EpisodeFilter::from_picker_value("*"), EpisodeFilter::All);
    /// assert_eq!(EpisodeFilter::from_picker_value(""), EpisodeFilter::All);
    /// assert_eq!(EpisodeFilter::from_picker_value("42"), EpisodeFilter::Only(42));
    /// ```
    pub fn from_picker_value(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == SHOW_ALL {
            return EpisodeFilter::All;
        }
        match value.parse() {
            Ok(id) => EpisodeFilter::Only(id),
            Err(_) => {
                warn!("Ignoring unrecognised episode picker value '{}'", value);
                EpisodeFilter::All
            }
        }
    }

    /// Value to place in the episode picker for this filter.
    pub fn picker_value(&self) -> String {
        match self {
            EpisodeFilter::All => SHOW_ALL.to_string(),
            EpisodeFilter::Only(id) => id.to_string(),
        }
    }
}

/// Normalise free text for matching. Blank input yields `None`.
fn normalize_query(query: &str) -> Option<String> {
    let q = query.trim();
    if q.is_empty() {
        None
    } else {
        Some(q.to_lowercase())
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn episode_matches(episode: &Episode, needle: &str) -> bool {
    contains_ci(&episode.name, needle) || contains_ci(&episode.summary, needle)
}

/// Visible episodes for the given picker selection and query.
///
/// A concrete selection yields at most that one episode, further narrowed by
/// the query when it is non-blank. Otherwise a non-blank query keeps episodes
/// whose name or summary contains it, case-insensitively. Order is preserved.
pub fn filter_episodes<'a>(
    episodes: &'a [Episode],
    filter: EpisodeFilter,
    query: &str,
) -> Vec<&'a Episode> {
    let needle = normalize_query(query);

    episodes
        .iter()
        .filter(|e| match filter {
            EpisodeFilter::Only(id) => e.id == id,
            EpisodeFilter::All => true,
        })
        .filter(|e| match &needle {
            Some(q) => episode_matches(e, q),
            None => true,
        })
        .collect()
}

/// Visible shows for the given query.
///
/// Matches against name, summary, or the genre list joined with spaces.
pub fn filter_shows<'a>(shows: &'a [Show], query: &str) -> Vec<&'a Show> {
    let Some(needle) = normalize_query(query) else {
        return shows.iter().collect();
    };

    shows
        .iter()
        .filter(|s| {
            contains_ci(&s.name, &needle)
                || contains_ci(&s.summary, &needle)
                || contains_ci(&s.genres.join(" "), &needle)
        })
        .collect()
}

/// Whether either episode filter input is narrowing the list.
pub fn has_active_filter(filter: EpisodeFilter, query: &str) -> bool {
    matches!(filter, EpisodeFilter::Only(_)) || normalize_query(query).is_some()
}

/// Episode counter line.
///
/// # Examples
///
/// ```
/// use catalog_browser::filter::counter_text;
///
/// assert_eq!(counter_text(3, 10, true), "Displaying 3 / 10 episodes");
/// assert_eq!(counter_text(10, 10, false), "Displaying all 10 episodes");
/// ```
pub fn counter_text(filtered: usize, total: usize, has_active_filter: bool) -> String {
    if has_active_filter {
        format!("Displaying {} / {} episodes", filtered, total)
    } else {
        format!("Displaying all {} episodes", total)
    }
}

/// Show search counter line.
pub fn shows_counter_text(found: usize) -> String {
    format!("found {} shows", found)
}
