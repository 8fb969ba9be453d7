//! UI rendering module for skycast
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod forecast_view;
pub mod help_overlay;
pub mod search_view;
pub mod widgets;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, AppState};

/// Renders the UI based on the current application state
pub fn render(frame: &mut Frame, app: &App) {
    match app.state {
        AppState::Loading => render_loading(frame, app),
        AppState::Search => search_view::render(frame, app),
        AppState::Forecast => forecast_view::render(frame, app),
    }

    if app.show_help {
        help_overlay::render(frame);
    }
}

/// Renders a loading message while data is being fetched
fn render_loading(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let message = if app.search_input.trim().is_empty() {
        "Loading forecast...".to_string()
    } else {
        format!("Loading forecast for {}...", app.search_input.trim())
    };

    let loading_text = Paragraph::new(message)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

/// Renders the bottom status bar
///
/// A status message takes the place of the key hints so it is never
/// pushed off a narrow terminal; the active units follow either one.
pub(crate) fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = match (&app.status, app.state) {
        (Some(status), _) => vec![Span::styled(
            status.clone(),
            Style::default().fg(Color::Red),
        )],
        (None, AppState::Search) => vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" Load  "),
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(" Suggest  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" Back"),
        ],
        (None, _) => vec![
            Span::styled("←/→", Style::default().fg(Color::Yellow)),
            Span::raw(" Day  "),
            Span::styled("t/w/p", Style::default().fg(Color::Yellow)),
            Span::raw(" Units  "),
            Span::styled("/", Style::default().fg(Color::Yellow)),
            Span::raw(" Search  "),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::raw(" Help  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit"),
        ],
    };

    spans.push(Span::styled(
        format!(
            " │ {} · {} · {}",
            app.units.temperature.symbol(),
            app.units.wind.symbol(),
            app.units.precipitation.symbol()
        ),
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{sample_city, sample_forecast};
    use crate::data::{GeocodingClient, WeatherClient};
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn test_app() -> App {
        App::with_clients(GeocodingClient::new(), WeatherClient::new())
    }

    #[test]
    fn test_loading_state_names_query() {
        let mut app = test_app();
        app.state = AppState::Loading;
        app.search_input = "Lisbon".to_string();

        let content = render_to_string(&app);
        assert!(content.contains("Loading forecast for Lisbon..."));
    }

    #[test]
    fn test_dispatches_by_state() {
        let mut app = test_app();
        assert!(render_to_string(&app).contains("Search city"));

        app.set_forecast(sample_city(), sample_forecast());
        assert!(render_to_string(&app).contains("7 Days"));
    }

    #[test]
    fn test_help_overlay_drawn_over_view() {
        let mut app = test_app();
        app.set_forecast(sample_city(), sample_forecast());
        app.show_help = true;

        assert!(render_to_string(&app).contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_status_bar_shows_units() {
        let mut app = test_app();
        app.set_forecast(sample_city(), sample_forecast());
        app.toggle_wind_unit();

        let content = render_to_string(&app);
        assert!(content.contains("°C · mph · mm"));
    }

    #[test]
    fn test_status_message_replaces_hints_on_narrow_terminal() {
        let mut app = test_app();
        app.set_forecast(sample_city(), sample_forecast());
        app.status = Some("Could not load forecast: Forecast API returned status 503".to_string());

        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(content.contains("Forecast API returned status 503"));
        assert!(!content.contains("Quit"));
    }
}
