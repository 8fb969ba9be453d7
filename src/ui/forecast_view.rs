//! Forecast screen UI
//!
//! Renders the current conditions, the seven-day summary with the selected
//! day highlighted, and the hourly strip for that day. Every value comes
//! from the prebuilt [`ForecastViewModel`]; nothing is converted here.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::widgets::TemperatureSparkline;
use crate::app::App;
use crate::conditions::{WeatherCondition, WeatherIcon};
use crate::forecast::{degrees, ForecastViewModel};

/// Color scheme
mod colors {
    use ratatui::style::Color;

    /// Section borders and headers
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// Selected day
    pub const SELECTED: Color = Color::Yellow;
    /// Daily high
    pub const HIGH: Color = Color::LightRed;
    /// Daily low
    pub const LOW: Color = Color::LightBlue;
}

/// Glyph color per condition category
fn condition_color(condition: WeatherCondition) -> Color {
    match condition {
        WeatherCondition::Clear => Color::Yellow,
        WeatherCondition::PartlyCloudy => Color::LightYellow,
        WeatherCondition::Overcast | WeatherCondition::Fog => Color::Gray,
        WeatherCondition::Drizzle | WeatherCondition::Rain => Color::Blue,
        WeatherCondition::Snow => Color::White,
        WeatherCondition::Thunderstorm => Color::Magenta,
    }
}

fn icon_span(icon: &WeatherIcon) -> Span<'static> {
    Span::styled(
        icon.condition.glyph(),
        Style::default().fg(condition_color(icon.condition)),
    )
}

/// Renders the forecast screen
///
/// Falls back to a placeholder when no view model has been built, which
/// happens when the last payload failed validation.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let title = app
        .city
        .as_ref()
        .map(|c| c.display_name())
        .unwrap_or_else(|| "skycast".to_string());

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Current conditions
            Constraint::Min(9),    // Daily + hourly
            Constraint::Length(1), // Status bar
        ])
        .split(inner_area);

    match app.view {
        Some(ref view) => {
            render_current(frame, chunks[0], view);

            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(24), Constraint::Min(40)])
                .split(chunks[1]);
            render_daily(frame, body[0], view);
            render_hourly(frame, body[1], view);
        }
        None => {
            let placeholder = Paragraph::new("No forecast to show. Press / to search.")
                .style(Style::default().fg(colors::SECONDARY))
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, chunks[1]);
        }
    }

    super::render_status_bar(frame, chunks[2], app);
}

/// Current conditions panel
fn render_current(frame: &mut Frame, area: Rect, view: &ForecastViewModel) {
    let current = &view.current;
    let temp_unit = view.units.temperature.symbol();

    let lines = vec![
        Line::from(Span::styled(
            current.date_label.clone(),
            Style::default().fg(colors::SECONDARY),
        )),
        Line::from(vec![
            icon_span(&current.icon),
            Span::raw("  "),
            Span::styled(
                format!("{}{}", current.display_temp, temp_unit),
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(current.icon.description, Style::default().fg(colors::PRIMARY)),
        ]),
        Line::from(vec![
            Span::styled("Feels like ", Style::default().fg(colors::SECONDARY)),
            Span::raw(format!("{}{}", current.display_feels_like, temp_unit)),
            Span::styled("   Humidity ", Style::default().fg(colors::SECONDARY)),
            Span::raw(format!("{}%", current.humidity_percent)),
        ]),
        Line::from(vec![
            Span::styled("Wind ", Style::default().fg(colors::SECONDARY)),
            Span::raw(view.wind_text()),
            Span::styled("   Precipitation ", Style::default().fg(colors::SECONDARY)),
            Span::raw(view.precipitation_text()),
        ]),
    ];

    let block = Block::default()
        .title(" Now ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Seven-day summary, selected day marked with a cursor
fn render_daily(frame: &mut Frame, area: Rect, view: &ForecastViewModel) {
    let lines: Vec<Line> = view
        .daily
        .iter()
        .enumerate()
        .map(|(index, day)| {
            let is_selected = index == view.selected_day;
            let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸
            let label_style = if is_selected {
                Style::default()
                    .fg(colors::SELECTED)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors::PRIMARY)
            };

            Line::from(vec![
                Span::styled(cursor, Style::default().fg(colors::SELECTED)),
                Span::styled(format!("{:<4}", day.day_label), label_style),
                icon_span(&day.icon),
                Span::raw(" "),
                Span::styled(
                    format!("{:>4}", degrees(day.display_high)),
                    Style::default().fg(colors::HIGH),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{:>4}", degrees(day.display_low)),
                    Style::default().fg(colors::LOW),
                ),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" 7 Days ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Hourly strip for the selected day, one column per slot
fn render_hourly(frame: &mut Frame, area: Rect, view: &ForecastViewModel) {
    let day_name = view
        .selected_daily()
        .map(|d| d.full_day_label.as_str())
        .unwrap_or("Hourly");

    let block = Block::default()
        .title(format!(" {} ", day_name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if view.hourly.is_empty() {
        let empty = Paragraph::new("No hourly data for this day")
            .style(Style::default().fg(colors::SECONDARY))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Time, icon, temperature
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Sparkline
            Constraint::Min(0),
        ])
        .split(inner);

    let slots = view.hourly.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..slots).map(|_| Constraint::Ratio(1, slots)))
        .split(rows[0]);

    for (slot, column) in view.hourly.iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(Span::styled(
                slot.time_label.clone(),
                Style::default().fg(colors::SECONDARY),
            )),
            Line::from(icon_span(&slot.icon)),
            Line::from(Span::styled(
                degrees(slot.display_temp),
                Style::default().fg(colors::PRIMARY),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            *column,
        );
    }

    let temperatures: Vec<i32> = view.hourly.iter().map(|h| h.display_temp).collect();
    let mut sparkline = TemperatureSparkline::new(&temperatures);
    if let Some(peak) = temperatures
        .iter()
        .enumerate()
        .max_by_key(|(_, t)| **t)
        .map(|(i, _)| i)
    {
        sparkline = sparkline.highlight(peak);
    }
    // Ratio columns may leave a remainder; draw across the covered width
    let sparkline_area = Rect {
        width: columns.iter().map(|c| c.width).sum(),
        ..rows[2]
    };
    frame.render_widget(sparkline, sparkline_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{sample_city, sample_forecast};
    use crate::data::{GeocodingClient, WeatherClient};
    use ratatui::{backend::TestBackend, Terminal};

    fn loaded_app() -> App {
        let mut app = App::with_clients(GeocodingClient::new(), WeatherClient::new());
        app.set_forecast(sample_city(), sample_forecast());
        app
    }

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_city_and_current_conditions() {
        let content = render_to_string(&loaded_app());

        assert!(content.contains("Berlin, Germany"));
        assert!(content.contains("Tuesday, Aug 5, 2025"));
        assert!(content.contains("Partly cloudy"));
        assert!(content.contains("14 km/h"));
        assert!(content.contains("46%"));
    }

    #[test]
    fn test_renders_seven_days() {
        let content = render_to_string(&loaded_app());

        for day in ["Tue", "Wed", "Thu", "Fri", "Sat", "Sun", "Mon"] {
            assert!(content.contains(day), "missing {}", day);
        }
    }

    #[test]
    fn test_renders_hourly_labels() {
        let content = render_to_string(&loaded_app());

        assert!(content.contains("12 AM"));
        assert!(content.contains("9 PM"));
    }

    #[test]
    fn test_imperial_values_rendered() {
        let mut app = loaded_app();
        app.toggle_unit_system();
        let content = render_to_string(&app);

        assert!(content.contains("68°F"));
        assert!(content.contains("9 mph"));
        assert!(content.contains("0.00 in"));
    }

    #[test]
    fn test_day_without_hourly_data_shows_message() {
        let mut app = loaded_app();
        app.select_day(3);
        let content = render_to_string(&app);

        assert!(content.contains("No hourly data for this day"));
        assert!(content.contains("Friday"));
    }

    #[test]
    fn test_missing_view_shows_placeholder() {
        let app = App::with_clients(GeocodingClient::new(), WeatherClient::new());
        let content = render_to_string(&app);

        assert!(content.contains("No forecast to show"));
    }

    #[test]
    fn test_condition_colors() {
        assert_eq!(condition_color(WeatherCondition::Clear), Color::Yellow);
        assert_eq!(condition_color(WeatherCondition::Rain), Color::Blue);
        assert_eq!(condition_color(WeatherCondition::Thunderstorm), Color::Magenta);
    }
}
