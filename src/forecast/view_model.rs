//! Render-ready forecast view model
//!
//! [`build`] is the single entry point: it converts every value the display
//! needs from the raw payload, the unit preferences and the selected day.
//! The result holds no further transformation logic and is rebuilt from
//! scratch on every preference or day change.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use super::indexer::{compute_hourly_window, MAX_FORECAST_DAYS};
use super::ForecastError;
use crate::conditions::{resolve_icon, WeatherIcon};
use crate::data::RawForecast;
use crate::units::{convert_precipitation, convert_temperature, convert_wind, UnitPreferences};

/// Current conditions panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    /// e.g. "Tuesday, Aug 5, 2025"
    pub date_label: String,
    pub display_temp: i32,
    pub display_feels_like: i32,
    pub humidity_percent: u8,
    pub display_wind: i32,
    pub display_precip: String,
    pub icon: WeatherIcon,
}

/// One entry of the daily summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyView {
    /// Abbreviated weekday, e.g. "Tue"
    pub day_label: String,
    /// Full weekday, e.g. "Tuesday" (day selector)
    pub full_day_label: String,
    pub icon: WeatherIcon,
    pub display_high: i32,
    pub display_low: i32,
}

/// One slot of the hourly strip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyView {
    /// 12-hour clock label, e.g. "3 PM"
    pub time_label: String,
    pub icon: WeatherIcon,
    pub display_temp: i32,
}

/// Everything the display layer needs, already converted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastViewModel {
    /// Units the values were converted to
    pub units: UnitPreferences,
    /// Day the hourly strip was built for
    pub selected_day: usize,
    pub current: CurrentView,
    /// Up to seven days
    pub daily: Vec<DailyView>,
    /// Up to eight slots; empty when the selected day has no hourly data
    pub hourly: Vec<HourlyView>,
}

impl ForecastViewModel {
    /// "14 km/h" / "9 mph"
    pub fn wind_text(&self) -> String {
        format!("{} {}", self.current.display_wind, self.units.wind.symbol())
    }

    /// "0.0 mm" / "0.00 in"
    pub fn precipitation_text(&self) -> String {
        format!(
            "{} {}",
            self.current.display_precip,
            self.units.precipitation.symbol()
        )
    }

    /// The daily entry the hourly strip belongs to, if the payload covers it
    pub fn selected_daily(&self) -> Option<&DailyView> {
        self.daily.get(self.selected_day)
    }
}

/// Formats a converted temperature for display: "20°"
pub fn degrees(value: i32) -> String {
    format!("{}\u{00B0}", value)
}

/// Builds the view model for a forecast, unit preferences and selected day
///
/// The payload must already be well formed; misaligned series and
/// unparseable timestamps are reported as [`ForecastError`] rather than
/// rendered with placeholder values.
pub fn build(
    raw: &RawForecast,
    prefs: UnitPreferences,
    selected_day: usize,
) -> Result<ForecastViewModel, ForecastError> {
    raw.validate()?;

    Ok(ForecastViewModel {
        units: prefs,
        selected_day,
        current: build_current(raw, prefs)?,
        daily: build_daily(raw, prefs)?,
        hourly: build_hourly(raw, prefs, selected_day)?,
    })
}

fn build_current(raw: &RawForecast, prefs: UnitPreferences) -> Result<CurrentView, ForecastError> {
    let current = &raw.current;
    let time = parse_datetime("current.time", &current.time)?;

    Ok(CurrentView {
        date_label: time.format("%A, %b %-d, %Y").to_string(),
        display_temp: convert_temperature(current.temperature, prefs.temperature),
        display_feels_like: convert_temperature(current.apparent_temperature, prefs.temperature),
        humidity_percent: current.humidity_percent,
        display_wind: convert_wind(current.wind_speed, prefs.wind),
        display_precip: convert_precipitation(current.precipitation, prefs.precipitation),
        icon: resolve_icon(current.weather_code),
    })
}

fn build_daily(raw: &RawForecast, prefs: UnitPreferences) -> Result<Vec<DailyView>, ForecastError> {
    let daily = &raw.daily;
    let days = daily.time.len().min(MAX_FORECAST_DAYS);

    (0..days)
        .map(|i| {
            let date = parse_date("daily.time", &daily.time[i])?;
            Ok(DailyView {
                day_label: date.format("%a").to_string(),
                full_day_label: date.format("%A").to_string(),
                icon: resolve_icon(daily.weather_code[i]),
                display_high: convert_temperature(daily.temperature_max[i], prefs.temperature),
                display_low: convert_temperature(daily.temperature_min[i], prefs.temperature),
            })
        })
        .collect()
}

fn build_hourly(
    raw: &RawForecast,
    prefs: UnitPreferences,
    selected_day: usize,
) -> Result<Vec<HourlyView>, ForecastError> {
    let hourly = &raw.hourly;

    compute_hourly_window(selected_day, hourly.time.len())
        .into_iter()
        .map(|i| {
            let time = parse_datetime("hourly.time", &hourly.time[i])?;
            Ok(HourlyView {
                time_label: twelve_hour_label(time.hour()),
                icon: resolve_icon(hourly.weather_code[i]),
                display_temp: convert_temperature(hourly.temperature[i], prefs.temperature),
            })
        })
        .collect()
}

/// "12 AM" for hour 0, "1 PM" for hour 13
fn twelve_hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{} AM", hour),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}

pub(crate) fn parse_datetime(field: &'static str, value: &str) -> Result<NaiveDateTime, ForecastError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| ForecastError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

pub(crate) fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ForecastError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ForecastError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}
