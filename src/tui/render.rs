//! UI rendering functions for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::state::{App, Display};
use super::types::Focus;
use crate::view::{Picker, View};

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn highlight_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Draw the UI.
pub fn draw(frame: &mut Frame, app: &App, display: &mut Display) {
    let size = frame.area();
    let has_pickers = display.show_picker.is_some() || display.episode_picker.is_some();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                  // Header
            Constraint::Length(3),                                  // Search bar
            Constraint::Length(if has_pickers { 8 } else { 0 }),    // Pickers
            Constraint::Min(0),                                     // List + details
            Constraint::Length(3),                                  // Status/footer
        ])
        .split(size);

    draw_header(frame, display, chunks[0]);
    draw_search_bar(frame, app, display, chunks[1]);
    if has_pickers {
        draw_pickers(frame, app, display, chunks[2]);
    }
    match display.view {
        View::Shows => draw_show_list(frame, app, display, chunks[3]),
        View::Episodes => draw_episode_list(frame, app, display, chunks[3]),
    }
    draw_footer(frame, display, chunks[4]);

    if app.show_help {
        draw_help_modal(frame, display);
    }
}

fn draw_header(frame: &mut Frame, display: &Display, area: Rect) {
    let view_label = match display.view {
        View::Shows => "[shows]",
        View::Episodes => "[episodes]",
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "catalog-browser",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(view_label, Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(
            display.counter.clone().unwrap_or_default(),
            Style::default().fg(Color::Green),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, display: &Display, area: Rect) {
    let focused = app.focus == Focus::Search;
    let placeholder = match display.view {
        View::Shows => "Press '/' to filter shows...",
        View::Episodes => "Press '/' to search episodes...",
    };

    let search_text = if display.search_text.is_empty() && !focused {
        placeholder
    } else {
        display.search_text.as_str()
    };

    let search = Paragraph::new(search_text)
        .style(if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search")
                .border_style(border_style(focused)),
        );

    frame.render_widget(search, area);

    if focused {
        let width = display.search_text.chars().count() as u16;
        frame.set_cursor_position((area.x + width + 1, area.y + 1));
    }
}

fn picker_list<'a>(picker: &'a Picker, title: &'a str, focused: bool) -> List<'a> {
    let items: Vec<ListItem> = picker
        .options
        .iter()
        .map(|o| {
            let marker = if o.value == picker.selected { "* " } else { "  " };
            ListItem::new(format!("{}{}", marker, o.label))
        })
        .collect();

    List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style(focused)),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ")
}

fn draw_pickers(frame: &mut Frame, app: &App, display: &mut Display, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    if let Some(picker) = &display.show_picker {
        let list = picker_list(picker, "Show", app.focus == Focus::ShowPicker);
        frame.render_stateful_widget(list, columns[0], &mut display.show_picker_state);
    }

    if let Some(picker) = &display.episode_picker {
        let list = picker_list(picker, "Episode", app.focus == Focus::EpisodePicker);
        frame.render_stateful_widget(list, columns[1], &mut display.episode_picker_state);
    }
}

fn draw_show_list(frame: &mut Frame, app: &App, display: &mut Display, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let items: Vec<ListItem> = display
        .show_cards
        .iter()
        .map(|s| ListItem::new(format!("{} ({})", s.title, s.genres)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Shows")
                .border_style(border_style(app.focus == Focus::List)),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], &mut display.list_state);

    let details = match display.selected_show() {
        Some(show) => format!(
            "{}\n\nGenres: {}\nStatus: {}\nRating: {}\nRuntime: {}\n\n{}\n\nPress Enter to view episodes",
            show.title, show.genres, show.status, show.rating, show.runtime, show.summary
        ),
        None => String::new(),
    };

    let details_widget = Paragraph::new(details)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true });

    frame.render_widget(details_widget, chunks[1]);
}

fn draw_episode_list(frame: &mut Frame, app: &App, display: &mut Display, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let items: Vec<ListItem> = display
        .episode_cards
        .iter()
        .map(|e| ListItem::new(e.title.clone()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Episodes")
                .border_style(border_style(app.focus == Focus::List)),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], &mut display.list_state);

    let details = match display.selected_episode() {
        Some(ep) => format!("{}\n{}\n\n{}", ep.title, ep.url, ep.summary),
        None => String::new(),
    };

    let details_widget = Paragraph::new(details)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true });

    frame.render_widget(details_widget, chunks[1]);
}

fn draw_footer(frame: &mut Frame, display: &Display, area: Rect) {
    let (text, style) = match &display.status {
        Some(status) if status.is_error => (status.text.clone(), Style::default().fg(Color::Red)),
        Some(status) => (status.text.clone(), Style::default().fg(Color::Yellow)),
        None => {
            let hint = match display.view {
                View::Shows => "Enter: open  /: search  Tab: focus  ?: help  q: quit",
                View::Episodes => "Esc: back  /: search  Tab: focus  ?: help  q: quit",
            };
            (hint.to_string(), Style::default().fg(Color::DarkGray))
        }
    };

    let footer = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

fn draw_help_modal(frame: &mut Frame, display: &Display) {
    let area = centered_rect(60, 70, frame.area());
    let (title, content) = get_help_content(display);

    let help = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Help - {}", title))
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

fn get_help_content(display: &Display) -> (&'static str, String) {
    let global_keys = "\
Global
──────
  ?           Show/hide this help
  Ctrl+C      Force quit
  Tab         Cycle focus (search, list, pickers)
  q           Quit

";

    let search_keys = "\
Search Bar
──────────
  /           Focus search bar
  (Type)      Filter as you type
  Enter/Esc   Back to the list

";

    let navigation_keys = "\
Lists and Pickers
─────────────────
  j / ↓       Move down
  k / ↑       Move up
  Enter       Open show / apply picker

";

    match display.view {
        View::Shows => {
            let content = format!(
                "{}{}{}  r           Retry loading shows\n\nPress ? to close",
                global_keys, search_keys, navigation_keys
            );
            ("Shows", content)
        }
        View::Episodes => {
            let content = format!(
                "{}{}{}  Esc / b     Back to shows\n\nPress ? to close",
                global_keys, search_keys, navigation_keys
            );
            ("Episodes", content)
        }
    }
}

/// Helper function to create a centered rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
