//! A terminal browser for a TV show catalog.
//!
//! catalog-browser fetches every show from a TVMaze-style catalog service,
//! lets you filter them as you type, and drills into a show's episodes with
//! a free-text search and an episode picker that narrow the list together.
//!
//! # Features
//!
//! - Search shows by name, summary or genre
//! - Browse episodes with text search and a single-episode picker
//! - Episode lists are fetched once per show and shared between callers
//! - Late responses for a show you already left are ignored
//!
//! # Usage
//!
//! ```bash
//! # Run against the public catalog
//! cargo run
//!
//! # Run against another endpoint with debug logs written to a file
//! cargo run -- --url http://localhost:8080 --log 3 --log-file browser.log
//! ```

pub mod browser;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod state;
pub mod tui;
pub mod types;
pub mod view;
