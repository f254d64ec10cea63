//! Keeps the render surface in step with the selection state.
//!
//! [`Browser`] is the single owner of [`SelectionState`]. Every user action
//! goes through it; it re-runs the filters and pushes lists, counters,
//! pickers and status messages to its [`RenderSurface`].
//!
//! Episode loads are split in two so they can run off the event loop:
//! [`Browser::begin_show_switch`] hands out a [`LoadTicket`], and
//! [`Browser::finish_show_switch`] applies a result only if that ticket is
//! still current.

use crate::cache::{EpisodeCache, EpisodeList};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::filter::{
    counter_text, filter_episodes, filter_shows, has_active_filter, shows_counter_text,
    EpisodeFilter,
};
use crate::state::{LoadTicket, SelectionState};
use crate::types::{Show, ShowId};
use crate::view::{episode_picker, show_picker, EpisodeCard, RenderSurface, ShowCard, Status, View};
use log::{debug, info, warn};
use std::sync::Arc;

const LOADING_SHOWS: &str = "Loading shows...";
const LOADING_EPISODES: &str = "Loading episodes for selected show...";
const SHOWS_FAILED: &str = "Failed to load shows. Please try again later.";
const EPISODES_FAILED: &str = "Failed to load episodes. Try again later.";
const NO_SHOWS: &str = "No shows found. Please try a different search request.";
const NO_EPISODES: &str = "No episodes found. Please try a different search request.";

/// What happened to a finished episode load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Episodes are now displayed.
    Applied,
    /// The load failed; the previous display was kept.
    Failed,
    /// The selection moved on; the result was discarded.
    Stale,
}

/// The view synchronizer.
pub struct Browser<C, S> {
    cache: Arc<EpisodeCache<C>>,
    surface: S,
    state: SelectionState,
    /// Show whose episodes are on screen; `None` while browsing shows.
    displayed_show: Option<ShowId>,
    startup_failed: bool,
}

impl<C: Catalog, S: RenderSurface> Browser<C, S> {
    /// Create a browser in shows mode with the loading indicator up.
    pub fn new(cache: Arc<EpisodeCache<C>>, mut surface: S) -> Self {
        surface.show_view(View::Shows);
        surface.set_status(Some(Status::info(LOADING_SHOWS)));

        Self {
            cache,
            surface,
            state: SelectionState::new(),
            displayed_show: None,
            startup_failed: false,
        }
    }

    pub fn cache(&self) -> Arc<EpisodeCache<C>> {
        Arc::clone(&self.cache)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Which list is currently displayed.
    pub fn view(&self) -> View {
        if self.displayed_show.is_some() {
            View::Episodes
        } else {
            View::Shows
        }
    }

    /// Whether the initial show list could not be loaded.
    pub fn startup_failed(&self) -> bool {
        self.startup_failed
    }

    /// Fetch the show list and display it. Calling again retries.
    pub async fn load_shows(&mut self) -> Result<()> {
        self.begin_loading_shows();
        let cache = Arc::clone(&self.cache);
        let result = cache.catalog().fetch_shows().await;
        self.finish_loading_shows(result)
    }

    /// Put up the loading indicator for the show list.
    pub fn begin_loading_shows(&mut self) {
        self.surface.set_status(Some(Status::info(LOADING_SHOWS)));
    }

    /// Apply the result of fetching the show list.
    pub fn finish_loading_shows(&mut self, result: Result<Vec<Show>>) -> Result<()> {
        match result {
            Ok(shows) => {
                info!("Loaded {} shows", shows.len());
                self.state.shows = shows;
                self.startup_failed = false;
                self.surface.set_status(None);
                self.surface.show_view(View::Shows);
                self.render_show_results();
                Ok(())
            }
            Err(e) => {
                warn!("Error during startup: {}", e);
                self.startup_failed = true;
                self.surface.set_status(Some(Status::error(SHOWS_FAILED)));
                Err(e)
            }
        }
    }

    /// Route free text to whichever list is displayed.
    pub fn search(&mut self, text: &str) {
        match self.view() {
            View::Shows => self.set_show_query(text),
            View::Episodes => self.set_query(text),
        }
    }

    /// Filter the shows list.
    pub fn set_show_query(&mut self, text: &str) {
        self.state.show_query = text.to_string();
        if self.view() == View::Shows {
            self.render_show_results();
        }
    }

    /// Filter the episodes list by text. Clears any picked episode.
    pub fn set_query(&mut self, text: &str) {
        self.state.set_query(text);
        self.refresh_episode_picker();
        self.render_episode_results();
    }

    /// Pick one episode, or all. Clears the text query.
    pub fn select_episode(&mut self, filter: EpisodeFilter) {
        self.state.select_episode(filter);
        self.surface.set_search_text("");
        self.refresh_episode_picker();
        self.render_episode_results();
    }

    /// Load and display the episodes of `show_id`.
    pub async fn select_show(&mut self, show_id: ShowId) -> LoadOutcome {
        let ticket = self.begin_show_switch(show_id);
        let cache = Arc::clone(&self.cache);
        let result = cache.load_episodes(show_id).await;
        self.finish_show_switch(ticket, result)
    }

    /// Like [`Browser::select_show`], for a show chosen from the picker:
    /// the show also moves to the front of the shows list.
    pub async fn pick_show(&mut self, show_id: ShowId) -> LoadOutcome {
        let ticket = self.begin_pick_show(show_id);
        let cache = Arc::clone(&self.cache);
        let result = cache.load_episodes(show_id).await;
        self.finish_show_switch(ticket, result)
    }

    /// First half of a show switch. Returns the ticket the eventual load
    /// result must present; filters are reset only once it succeeds.
    pub fn begin_show_switch(&mut self, show_id: ShowId) -> LoadTicket {
        let ticket = self.state.begin_show(show_id);
        debug!("Switching to show {} ({:?})", show_id, ticket);
        self.surface.set_status(Some(Status::info(LOADING_EPISODES)));
        ticket
    }

    /// First half of a picker-driven show switch.
    pub fn begin_pick_show(&mut self, show_id: ShowId) -> LoadTicket {
        self.state.promote_show(show_id);
        self.begin_show_switch(show_id)
    }

    /// Second half of a show switch.
    pub fn finish_show_switch(
        &mut self,
        ticket: LoadTicket,
        result: Result<EpisodeList>,
    ) -> LoadOutcome {
        if !self.state.is_current(&ticket) {
            debug!(
                "Discarding stale episode load for show {} ({})",
                ticket.show_id,
                if result.is_ok() { "ok" } else { "failed" }
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(episodes) => {
                info!("Showing {} episodes for show {}", episodes.len(), ticket.show_id);
                self.state.show_loaded(episodes);
                self.displayed_show = Some(ticket.show_id);

                self.surface.set_search_text("");
                self.refresh_episode_picker();
                self.refresh_show_picker();
                self.surface.set_status(None);
                self.surface.show_view(View::Episodes);
                self.render_episode_results();
                LoadOutcome::Applied
            }
            Err(e) => {
                warn!("Error loading episodes for show {}: {}", ticket.show_id, e);
                self.state.active_show = self.displayed_show;
                if self.displayed_show.is_some() {
                    self.surface.set_search_text(&self.state.query);
                    self.refresh_episode_picker();
                    self.refresh_show_picker();
                    self.render_episode_results();
                }
                self.surface.set_status(Some(Status::error(EPISODES_FAILED)));
                LoadOutcome::Failed
            }
        }
    }

    /// Return to the shows list, keeping the shows query.
    pub fn back(&mut self) {
        self.state.clear_show();
        self.displayed_show = None;

        self.surface.set_episode_picker(None);
        self.surface.set_search_text(&self.state.show_query);
        self.surface.set_status(None);
        self.surface.show_view(View::Shows);
        self.render_show_results();
    }

    fn render_show_results(&mut self) {
        let query = self.state.show_query.as_str();
        let filtered = filter_shows(&self.state.shows, query);
        let has_query = !query.trim().is_empty();

        if filtered.is_empty() {
            self.surface.set_status(Some(Status::info(NO_SHOWS)));
        } else {
            self.surface.set_status(None);
        }

        if has_query && !filtered.is_empty() {
            let first = filtered[0].id.to_string();
            self.surface
                .set_counter(Some(shows_counter_text(filtered.len())));
            self.surface
                .set_show_picker(Some(show_picker(&filtered, true, &first)));
        } else {
            self.surface.set_counter(None);
            self.surface.set_show_picker(None);
        }

        let cards = filtered.into_iter().map(ShowCard::from).collect();
        self.surface.render_shows(cards);
    }

    fn render_episode_results(&mut self) {
        let filter = self.state.episode_filter;
        let query = self.state.query.as_str();
        let filtered = filter_episodes(&self.state.episodes, filter, query);
        let count = filtered.len();

        if count == 0 {
            self.surface.set_status(Some(Status::info(NO_EPISODES)));
        } else {
            self.surface.set_status(None);
        }

        self.surface.set_counter(Some(counter_text(
            count,
            self.state.episodes.len(),
            has_active_filter(filter, query),
        )));

        let cards = filtered.into_iter().map(EpisodeCard::from).collect();
        self.surface.render_episodes(cards);
    }

    fn refresh_episode_picker(&mut self) {
        let selected = self.state.episode_filter.picker_value();
        self.surface
            .set_episode_picker(Some(episode_picker(&self.state.episodes, &selected)));
    }

    fn refresh_show_picker(&mut self) {
        let Some(show_id) = self.displayed_show else {
            return;
        };
        let shows: Vec<&Show> = self.state.shows.iter().collect();
        self.surface
            .set_show_picker(Some(show_picker(&shows, false, &show_id.to_string())));
    }
}
