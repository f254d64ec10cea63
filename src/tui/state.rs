//! Application state management and input handling.

use crate::filter::{EpisodeFilter, SHOW_ALL};
use crate::view::{EpisodeCard, Picker, RenderSurface, ShowCard, Status, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use super::types::{Action, Focus};

/// Everything the terminal draws. This is the browser's render surface.
#[derive(Debug, Default)]
pub struct Display {
    /// List currently in front
    pub view: View,
    /// Shows list contents
    pub show_cards: Vec<ShowCard>,
    /// Episodes list contents
    pub episode_cards: Vec<EpisodeCard>,
    /// Counter line
    pub counter: Option<String>,
    /// Status line
    pub status: Option<Status>,
    /// Show picker, when visible
    pub show_picker: Option<Picker>,
    /// Episode picker, when visible
    pub episode_picker: Option<Picker>,
    /// Text in the search input
    pub search_text: String,
    /// Cursor in the main list
    pub list_state: ListState,
    /// Cursor in the show picker
    pub show_picker_state: ListState,
    /// Cursor in the episode picker
    pub episode_picker_state: ListState,
}

impl Display {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows in the list currently in front.
    pub fn list_len(&self) -> usize {
        match self.view {
            View::Shows => self.show_cards.len(),
            View::Episodes => self.episode_cards.len(),
        }
    }

    /// Show card under the list cursor.
    pub fn selected_show(&self) -> Option<&ShowCard> {
        if self.view != View::Shows {
            return None;
        }
        self.list_state.selected().and_then(|i| self.show_cards.get(i))
    }

    /// Episode card under the list cursor.
    pub fn selected_episode(&self) -> Option<&EpisodeCard> {
        if self.view != View::Episodes {
            return None;
        }
        self.list_state.selected().and_then(|i| self.episode_cards.get(i))
    }

    fn reset_list_cursor(&mut self) {
        let selected = if self.list_len() == 0 { None } else { Some(0) };
        self.list_state.select(selected);
    }
}

impl RenderSurface for Display {
    fn show_view(&mut self, view: View) {
        self.view = view;
        self.reset_list_cursor();
    }

    fn render_shows(&mut self, cards: Vec<ShowCard>) {
        self.show_cards = cards;
        if self.view == View::Shows {
            self.reset_list_cursor();
        }
    }

    fn render_episodes(&mut self, cards: Vec<EpisodeCard>) {
        self.episode_cards = cards;
        if self.view == View::Episodes {
            self.reset_list_cursor();
        }
    }

    fn set_counter(&mut self, text: Option<String>) {
        self.counter = text;
    }

    fn set_status(&mut self, status: Option<Status>) {
        self.status = status;
    }

    fn set_show_picker(&mut self, picker: Option<Picker>) {
        self.show_picker_state
            .select(picker.as_ref().and_then(Picker::selected_index));
        self.show_picker = picker;
    }

    fn set_episode_picker(&mut self, picker: Option<Picker>) {
        self.episode_picker_state
            .select(picker.as_ref().and_then(Picker::selected_index));
        self.episode_picker = picker;
    }

    fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_string();
    }
}

/// Move a list cursor one step, clamped to `len`.
fn step(state: &mut ListState, len: usize, down: bool) {
    if len == 0 {
        state.select(None);
        return;
    }
    let i = state.selected().unwrap_or(0);
    let next = if down {
        (i + 1).min(len - 1)
    } else {
        i.saturating_sub(1)
    };
    state.select(Some(next));
}

/// Keyboard-facing state for the TUI.
#[derive(Debug)]
pub struct App {
    /// Widget receiving input
    pub focus: Focus,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Whether help modal is shown
    pub show_help: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new App with default state.
    pub fn new() -> Self {
        Self {
            focus: Focus::List,
            should_quit: false,
            show_help: false,
        }
    }

    /// Focus targets available for the current display, in Tab order.
    fn focus_ring(display: &Display) -> Vec<Focus> {
        let mut ring = vec![Focus::Search, Focus::List];
        if display.show_picker.is_some() {
            ring.push(Focus::ShowPicker);
        }
        if display.episode_picker.is_some() {
            ring.push(Focus::EpisodePicker);
        }
        ring
    }

    fn cycle_focus(&mut self, display: &Display) {
        let ring = Self::focus_ring(display);
        let i = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ring[(i + 1) % ring.len()];
    }

    /// Handle keyboard input and return an action.
    pub fn handle_input(&mut self, key: KeyEvent, display: &mut Display) -> Action {
        // Global quit with Ctrl+C or Ctrl+Q
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Action::Quit;
                }
                _ => {}
            }
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return Action::None;
        }

        // A picker may have disappeared since it was focused.
        if !Self::focus_ring(display).contains(&self.focus) {
            self.focus = Focus::List;
        }

        if key.code == KeyCode::Tab {
            self.cycle_focus(display);
            return Action::None;
        }

        match self.focus {
            Focus::Search => self.handle_search_input(key, display),
            Focus::List => self.handle_list_input(key, display),
            Focus::ShowPicker => self.handle_show_picker_input(key, display),
            Focus::EpisodePicker => self.handle_episode_picker_input(key, display),
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent, display: &mut Display) -> Action {
        match key.code {
            KeyCode::Char(c) => {
                display.search_text.push(c);
                Action::Search(display.search_text.clone())
            }
            KeyCode::Backspace => {
                if display.search_text.pop().is_some() {
                    Action::Search(display.search_text.clone())
                } else {
                    Action::None
                }
            }
            KeyCode::Enter | KeyCode::Esc | KeyCode::Down => {
                self.focus = Focus::List;
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_list_input(&mut self, key: KeyEvent, display: &mut Display) -> Action {
        let len = display.list_len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                step(&mut display.list_state, len, false);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                step(&mut display.list_state, len, true);
                Action::None
            }
            KeyCode::Enter => match display.selected_show() {
                Some(card) => Action::OpenShow(card.id),
                None => Action::None,
            },
            KeyCode::Char('/') => {
                self.focus = Focus::Search;
                Action::None
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                Action::None
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                if display.view == View::Episodes {
                    Action::Back
                } else {
                    Action::None
                }
            }
            KeyCode::Char('r') => Action::Retry,
            KeyCode::Char('q') => {
                self.should_quit = true;
                Action::Quit
            }
            _ => Action::None,
        }
    }

    fn handle_show_picker_input(&mut self, key: KeyEvent, display: &mut Display) -> Action {
        let Some(picker) = display.show_picker.as_ref() else {
            return Action::None;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                step(&mut display.show_picker_state, picker.options.len(), false);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                step(&mut display.show_picker_state, picker.options.len(), true);
                Action::None
            }
            KeyCode::Enter => {
                let value = display
                    .show_picker_state
                    .selected()
                    .and_then(|i| picker.options.get(i))
                    .map(|o| o.value.as_str())
                    .unwrap_or(SHOW_ALL);
                match value.parse() {
                    Ok(id) => {
                        self.focus = Focus::List;
                        Action::PickShow(id)
                    }
                    Err(_) => Action::None,
                }
            }
            KeyCode::Esc => {
                self.focus = Focus::List;
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_episode_picker_input(&mut self, key: KeyEvent, display: &mut Display) -> Action {
        let Some(picker) = display.episode_picker.as_ref() else {
            return Action::None;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                step(&mut display.episode_picker_state, picker.options.len(), false);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                step(&mut display.episode_picker_state, picker.options.len(), true);
                Action::None
            }
            KeyCode::Enter => {
                let value = display
                    .episode_picker_state
                    .selected()
                    .and_then(|i| picker.options.get(i))
                    .map(|o| o.value.as_str())
                    .unwrap_or(SHOW_ALL);
                Action::PickEpisode(EpisodeFilter::from_picker_value(value))
            }
            KeyCode::Esc => {
                self.focus = Focus::List;
                Action::None
            }
            _ => Action::None,
        }
    }
}
