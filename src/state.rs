//! Session state for one browsing screen.

use crate::cache::EpisodeList;
use crate::filter::EpisodeFilter;
use crate::types::{Show, ShowId};

/// Identifies the selection an episode load was issued for.
///
/// A load result is only applied if its ticket is still current; any show
/// switch or return to the shows list invalidates outstanding tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub show_id: ShowId,
    generation: u64,
}

/// Mutable selection state, owned by the browser.
#[derive(Debug, Clone)]
pub struct SelectionState {
    /// Every show, fetched once at startup.
    pub shows: Vec<Show>,
    /// Show whose episodes are requested or displayed.
    pub active_show: Option<ShowId>,
    /// Episodes of the displayed show.
    pub episodes: EpisodeList,
    pub episode_filter: EpisodeFilter,
    /// Free-text filter over episodes.
    pub query: String,
    /// Free-text filter over shows; survives trips into a show.
    pub show_query: String,
    generation: u64,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            shows: Vec::new(),
            active_show: None,
            episodes: EpisodeList::from(Vec::new()),
            episode_filter: EpisodeFilter::All,
            query: String::new(),
            show_query: String::new(),
            generation: 0,
        }
    }

    /// Start loading `show_id` and issue a fresh ticket, invalidating any
    /// earlier one. The episode filters stay until the load lands.
    pub fn begin_show(&mut self, show_id: ShowId) -> LoadTicket {
        self.generation += 1;
        self.active_show = Some(show_id);
        LoadTicket {
            show_id,
            generation: self.generation,
        }
    }

    /// Install the episodes of a finished load and reset the filters.
    pub fn show_loaded(&mut self, episodes: EpisodeList) {
        self.episodes = episodes;
        self.episode_filter = EpisodeFilter::All;
        self.query.clear();
    }

    /// Whether `ticket` still matches the latest selection.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation && self.active_show == Some(ticket.show_id)
    }

    /// Drop the active show and everything loaded for it.
    pub fn clear_show(&mut self) {
        self.generation += 1;
        self.active_show = None;
        self.episodes = EpisodeList::from(Vec::new());
        self.episode_filter = EpisodeFilter::All;
        self.query.clear();
    }

    /// Change the episode query. Clears any picked episode.
    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
        self.episode_filter = EpisodeFilter::All;
    }

    /// Pick an episode. Clears the query.
    ///
    /// An id that names no loaded episode is kept; it filters to nothing.
    pub fn select_episode(&mut self, filter: EpisodeFilter) {
        self.query.clear();
        self.episode_filter = filter;
    }

    /// Move `show_id` to the front of the shows list.
    pub fn promote_show(&mut self, show_id: ShowId) {
        if let Some(index) = self.shows.iter().position(|s| s.id == show_id) {
            let show = self.shows.remove(index);
            self.shows.insert(0, show);
        }
    }

    pub fn find_show(&self, show_id: ShowId) -> Option<&Show> {
        self.shows.iter().find(|s| s.id == show_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Episode;

    fn show(id: u64) -> Show {
        Show {
            id,
            name: format!("Show {}", id),
            genres: Vec::new(),
            status: String::new(),
            rating: None,
            runtime: None,
            summary: String::new(),
            image_url: None,
        }
    }

    fn episodes(ids: &[u64]) -> EpisodeList {
        ids.iter()
            .map(|&id| Episode {
                id,
                name: String::new(),
                season: 1,
                number: 1,
                url: String::new(),
                summary: String::new(),
                image_url: None,
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_new_ticket_invalidates_old_one() {
        let mut state = SelectionState::new();
        let first = state.begin_show(1);
        let second = state.begin_show(2);
        assert!(!state.is_current(&first));
        assert!(state.is_current(&second));
    }

    #[test]
    fn test_reselecting_same_show_still_invalidates() {
        let mut state = SelectionState::new();
        let first = state.begin_show(1);
        let again = state.begin_show(1);
        assert!(!state.is_current(&first));
        assert!(state.is_current(&again));
    }

    #[test]
    fn test_clear_show_invalidates_ticket() {
        let mut state = SelectionState::new();
        let ticket = state.begin_show(1);
        state.clear_show();
        assert!(!state.is_current(&ticket));
        assert!(state.active_show.is_none());
    }

    #[test]
    fn test_filters_survive_until_show_loaded() {
        let mut state = SelectionState::new();
        state.episodes = episodes(&[5]);
        state.select_episode(EpisodeFilter::Only(5));
        state.begin_show(2);
        assert_eq!(state.episode_filter, EpisodeFilter::Only(5));

        state.show_loaded(episodes(&[7, 8]));
        assert_eq!(state.episode_filter, EpisodeFilter::All);
        assert_eq!(state.episodes.len(), 2);

        state.set_query("abc");
        state.begin_show(3);
        assert_eq!(state.query, "abc");
        state.show_loaded(episodes(&[9]));
        assert!(state.query.is_empty());
    }

    #[test]
    fn test_query_and_pick_reset_each_other() {
        let mut state = SelectionState::new();
        state.episodes = episodes(&[5, 6]);

        state.select_episode(EpisodeFilter::Only(6));
        state.set_query("x");
        assert_eq!(state.episode_filter, EpisodeFilter::All);

        state.select_episode(EpisodeFilter::Only(5));
        assert!(state.query.is_empty());
        assert_eq!(state.episode_filter, EpisodeFilter::Only(5));
    }

    #[test]
    fn test_pick_of_unknown_episode_is_kept() {
        let mut state = SelectionState::new();
        state.episodes = episodes(&[5]);
        state.select_episode(EpisodeFilter::Only(99));
        assert_eq!(state.episode_filter, EpisodeFilter::Only(99));
    }

    #[test]
    fn test_promote_show() {
        let mut state = SelectionState::new();
        state.shows = vec![show(1), show(2), show(3)];
        state.promote_show(3);
        let ids: Vec<_> = state.shows.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        state.promote_show(42);
        assert_eq!(state.shows.len(), 3);
    }
}
