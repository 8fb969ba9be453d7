//! City search screen
//!
//! A one-line input with the typed query and, below it, the suggestion list
//! fetched with Tab. The highlighted suggestion is what Enter loads.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the search screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Min(3),    // Suggestions
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_input(frame, chunks[0], app);
    render_suggestions(frame, chunks[1], app);
    super::render_status_bar(frame, chunks[2], app);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let line = if app.search_input.is_empty() {
        Line::from(vec![
            Span::styled("Type a city name", Style::default().fg(Color::DarkGray)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(vec![
            Span::styled(app.search_input.clone(), Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ])
    };

    let block = Block::default()
        .title(" Search city ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_suggestions(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = if app.suggestions.is_empty() {
        vec![Line::from(Span::styled(
            "Press Tab for suggestions, Enter to load the best match",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.suggestions
            .iter()
            .enumerate()
            .map(|(index, city)| {
                let is_selected = app.selected_suggestion == Some(index);
                let cursor = if is_selected { "\u{25B8} " } else { "  " };
                let style = if is_selected {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(vec![
                    Span::styled(cursor, Style::default().fg(Color::Cyan)),
                    Span::styled(city.suggestion_label(), style),
                    Span::styled(
                        format!("  ({:.2}, {:.2})", city.latitude, city.longitude),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect()
    };

    let block = Block::default()
        .title(" Suggestions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
