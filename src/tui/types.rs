//! TUI type definitions for focus and actions.

use crate::filter::EpisodeFilter;
use crate::types::ShowId;

/// Which widget receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Free-text search input
    Search,
    /// Main show/episode list
    List,
    /// Show picker (drop-down)
    ShowPicker,
    /// Episode picker (drop-down)
    EpisodePicker,
}

/// Actions that can be returned from the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action, continue running
    None,
    /// Quit the application
    Quit,
    /// Search text changed
    Search(String),
    /// Open a show from the list
    OpenShow(ShowId),
    /// Open a show chosen in the show picker
    PickShow(ShowId),
    /// Episode picker changed
    PickEpisode(EpisodeFilter),
    /// Return to the shows list
    Back,
    /// Retry loading the show list
    Retry,
}
