//! One-shot output for `--print` and `--json`
//!
//! Both formats are produced from the same view model the interactive
//! screen renders.

use serde::Serialize;

use crate::data::CurrentCityInfo;
use crate::forecast::{degrees, ForecastViewModel};

/// JSON document written by `--json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub city: &'a CurrentCityInfo,
    pub forecast: &'a ForecastViewModel,
}

/// Serializes the city and view model as pretty-printed JSON
pub fn to_json(city: &CurrentCityInfo, view: &ForecastViewModel) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        city,
        forecast: view,
    })
}

/// Renders the city and view model as plain text
pub fn to_text(city: &CurrentCityInfo, view: &ForecastViewModel) -> String {
    let current = &view.current;
    let temp_unit = view.units.temperature.symbol();
    let mut lines = Vec::new();

    lines.push(city.display_name());
    lines.push(current.date_label.clone());
    lines.push(String::new());
    lines.push(format!(
        "{} {}{}  {}",
        current.icon.condition.glyph(),
        current.display_temp,
        temp_unit,
        current.icon.description
    ));
    lines.push(format!(
        "Feels like {}{}  Humidity {}%  Wind {}  Precipitation {}",
        current.display_feels_like,
        temp_unit,
        current.humidity_percent,
        view.wind_text(),
        view.precipitation_text()
    ));

    lines.push(String::new());
    lines.push("Daily".to_string());
    for (index, day) in view.daily.iter().enumerate() {
        let marker = if index == view.selected_day { ">" } else { " " };
        lines.push(format!(
            "{} {:<4}{:>5} {:>5}  {}",
            marker,
            day.day_label,
            degrees(day.display_high),
            degrees(day.display_low),
            day.icon.description
        ));
    }

    lines.push(String::new());
    match view.selected_daily() {
        Some(day) => lines.push(format!("Hourly ({})", day.full_day_label)),
        None => lines.push("Hourly".to_string()),
    }
    if view.hourly.is_empty() {
        lines.push("  No hourly data for this day".to_string());
    }
    for slot in &view.hourly {
        lines.push(format!(
            "  {:>5}  {:>5}  {}",
            slot.time_label,
            degrees(slot.display_temp),
            slot.icon.description
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{sample_city, sample_forecast};
    use crate::forecast::build;
    use crate::units::UnitPreferences;

    #[test]
    fn test_text_report_contains_sections() {
        let view = build(&sample_forecast(), UnitPreferences::metric(), 0).unwrap();
        let text = to_text(&sample_city(), &view);

        assert!(text.starts_with("Berlin, Germany\nTuesday, Aug 5, 2025"));
        assert!(text.contains("20°C  Partly cloudy"));
        assert!(text.contains("Wind 14 km/h  Precipitation 0.0 mm"));
        assert!(text.contains("> Tue   25°   14°  Partly cloudy"));
        assert!(text.contains("Hourly (Tuesday)"));
        assert!(text.contains("12 AM"));
    }

    #[test]
    fn test_text_report_marks_selected_day() {
        let view = build(&sample_forecast(), UnitPreferences::imperial(), 1).unwrap();
        let text = to_text(&sample_city(), &view);

        assert!(text.contains("> Wed"));
        assert!(text.contains("  Tue"));
        assert!(text.contains("Hourly (Wednesday)"));
        assert!(text.contains("9 mph"));
    }

    #[test]
    fn test_text_report_without_hourly_data() {
        let view = build(&sample_forecast(), UnitPreferences::metric(), 4).unwrap();
        let text = to_text(&sample_city(), &view);

        assert!(text.contains("No hourly data for this day"));
    }

    #[test]
    fn test_json_report_shape() {
        let view = build(&sample_forecast(), UnitPreferences::imperial(), 0).unwrap();
        let json = to_json(&sample_city(), &view).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["city"]["name"], "Berlin");
        assert_eq!(value["forecast"]["units"]["temperature"], "fahrenheit");
        assert_eq!(value["forecast"]["current"]["display_temp"], 68);
        assert_eq!(value["forecast"]["current"]["display_precip"], "0.00");
        assert_eq!(value["forecast"]["daily"].as_array().unwrap().len(), 7);
        assert_eq!(value["forecast"]["hourly"].as_array().unwrap().len(), 8);
        assert_eq!(value["forecast"]["current"]["icon"]["icon"], "partly-cloudy");
    }
}
