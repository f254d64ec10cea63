//! Main entry point for the catalog-browser TUI.

use catalog_browser::browser::Browser;
use catalog_browser::cache::{EpisodeCache, EpisodeList};
use catalog_browser::catalog::{Catalog, CatalogClient};
use catalog_browser::config::Config;
use catalog_browser::state::LoadTicket;
use catalog_browser::tui::{draw, poll_event, Action, App, Display};
use clap::Parser;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info, warn};
use ratatui::prelude::*;
use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

type AppBrowser = Browser<CatalogClient, Display>;
type Completion = (LoadTicket, catalog_browser::error::Result<EpisodeList>);

/// Command-line arguments for the catalog-browser application.
#[derive(Parser, Debug)]
#[command(
    name = "catalog-browser",
    version,
    about = "Browse a TV show catalog in the terminal",
    long_about = "Filter shows, open one to list its episodes, and narrow episodes by text or by picking one."
)]
struct Args {
    /// Catalog base URL (overrides the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Log verbosity level: 0=error, 1=warn, 2=info, 3=debug, 4=trace
    #[arg(short, long, default_value_t = 1)]
    log: u8,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    write_config: bool,
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn init_logging(level: u8, log_file: Option<&PathBuf>) -> io::Result<()> {
    let log_level = match level {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false);

    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    debug!("Log level set to {:?}", log_level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    init_logging(args.log, args.log_file.as_ref())?;

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        Config::new()
    });

    if let Some(url) = &args.url {
        config.catalog_url = url.clone();
        config.validate()?;
    }

    if args.write_config {
        config.save()?;
        println!("Wrote {}", Config::get_config_path()?.display());
        return Ok(());
    }

    let client = CatalogClient::new(&config)?;
    info!("Using catalog at {}", client.base_url());

    let cache = Arc::new(EpisodeCache::new(client));
    let mut browser = Browser::new(cache, Display::new());

    let mut terminal = init_terminal()?;
    let result = run_app(&mut terminal, &mut browser).await;
    restore_terminal()?;

    result
}

/// Fetch the show list, drawing the loading status first.
async fn load_shows(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &App,
    browser: &mut AppBrowser,
) -> io::Result<()> {
    browser.begin_loading_shows();
    terminal.draw(|f| draw(f, app, browser.surface_mut()))?;

    let result = browser.cache().catalog().fetch_shows().await;
    if let Err(e) = browser.finish_loading_shows(result) {
        warn!("Show list unavailable ({}). Press 'r' to retry.", e);
    }
    Ok(())
}

/// Load episodes off the event loop and report back with the ticket.
fn spawn_episode_load(browser: &AppBrowser, ticket: LoadTicket, tx: &mpsc::UnboundedSender<Completion>) {
    let cache = browser.cache();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = cache.load_episodes(ticket.show_id).await;
        if tx.send((ticket, result)).is_err() {
            debug!("Event loop gone; dropping episodes for show {}", ticket.show_id);
        }
    });
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    browser: &mut AppBrowser,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();

    load_shows(terminal, &app, browser).await?;

    loop {
        while let Ok((ticket, result)) = rx.try_recv() {
            let outcome = browser.finish_show_switch(ticket, result);
            debug!("Episode load for show {}: {:?}", ticket.show_id, outcome);
        }

        terminal.draw(|f| draw(f, &app, browser.surface_mut()))?;

        let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_input(key, browser.surface_mut()) {
            Action::Quit => break,
            Action::Search(text) => browser.search(&text),
            Action::OpenShow(show_id) => {
                let ticket = browser.begin_show_switch(show_id);
                spawn_episode_load(browser, ticket, &tx);
            }
            Action::PickShow(show_id) => {
                let ticket = browser.begin_pick_show(show_id);
                spawn_episode_load(browser, ticket, &tx);
            }
            Action::PickEpisode(filter) => browser.select_episode(filter),
            Action::Back => browser.back(),
            Action::Retry => {
                if browser.startup_failed() {
                    load_shows(terminal, &app, browser).await?;
                }
            }
            Action::None => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
