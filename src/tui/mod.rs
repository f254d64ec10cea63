//! Terminal User Interface for catalog-browser using ratatui.
//!
//! This module provides the terminal render surface for the browser plus
//! keyboard handling for the shows and episodes lists.

mod render;
mod state;
mod types;

pub use render::draw;
pub use state::{App, Display};
pub use types::{Action, Focus};

use crossterm::event::{self, Event};
use std::io;
use std::time::Duration;

/// Poll for keyboard events with a timeout.
pub fn poll_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
