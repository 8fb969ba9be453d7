//! Forecast payload types and API clients
//!
//! [`RawForecast`] mirrors the Open-Meteo forecast response and is always in
//! canonical units (Celsius, km/h, millimeters). [`CurrentCityInfo`] is the
//! location the forecast was fetched for.

pub mod geocode;
pub mod weather;

pub use geocode::{GeocodeError, GeocodingClient};
pub use weather::{WeatherClient, WeatherError};

use serde::{Deserialize, Serialize};

use crate::forecast::view_model::{parse_date, parse_datetime};
use crate::forecast::ForecastError;

/// Current conditions block of a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Local ISO 8601 timestamp, e.g. "2025-08-05T14:00"
    pub time: String,
    /// Air temperature in Celsius
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    /// Feels-like temperature in Celsius
    pub apparent_temperature: f64,
    /// Relative humidity (0-100)
    #[serde(rename = "relative_humidity_2m")]
    pub humidity_percent: u8,
    /// Wind speed in km/h
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
    /// Precipitation in millimeters
    pub precipitation: f64,
    /// WMO weather code
    pub weather_code: i32,
}

/// Hourly forecast as parallel arrays; index `i` is the same hour in every array
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Vec<f64>,
    pub precipitation: Vec<f64>,
    pub weather_code: Vec<i32>,
}

/// Daily forecast as parallel arrays; index `i` is day `i`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySeries {
    /// ISO 8601 dates, e.g. "2025-08-05"
    pub time: Vec<String>,
    /// Most severe WMO code of the day
    pub weather_code: Vec<i32>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<f64>,
    pub precipitation_sum: Vec<f64>,
}

/// A forecast payload as fetched, immutable once stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecast {
    pub current: CurrentConditions,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

impl RawForecast {
    /// Checks that every parallel array matches the length of its `time`
    /// array and that every timestamp parses
    pub fn validate(&self) -> Result<(), ForecastError> {
        let hourly_len = self.hourly.time.len();
        check_len("hourly.temperature_2m", hourly_len, self.hourly.temperature.len())?;
        check_len("hourly.precipitation", hourly_len, self.hourly.precipitation.len())?;
        check_len("hourly.weather_code", hourly_len, self.hourly.weather_code.len())?;

        let daily_len = self.daily.time.len();
        check_len("daily.weather_code", daily_len, self.daily.weather_code.len())?;
        check_len("daily.temperature_2m_max", daily_len, self.daily.temperature_max.len())?;
        check_len("daily.temperature_2m_min", daily_len, self.daily.temperature_min.len())?;
        check_len("daily.precipitation_sum", daily_len, self.daily.precipitation_sum.len())?;

        parse_datetime("current.time", &self.current.time)?;
        for time in &self.hourly.time {
            parse_datetime("hourly.time", time)?;
        }
        for date in &self.daily.time {
            parse_date("daily.time", date)?;
        }

        Ok(())
    }

    /// Number of days in the daily series
    pub fn day_count(&self) -> usize {
        self.daily.time.len()
    }
}

fn check_len(series: &'static str, expected: usize, actual: usize) -> Result<(), ForecastError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ForecastError::MisalignedSeries {
            series,
            expected,
            actual,
        })
    }
}

/// The city a forecast belongs to, kept alongside the payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentCityInfo {
    pub name: String,
    pub country: Option<String>,
    /// First-level region (state, province), when the geocoder has one
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone name
    pub timezone: Option<String>,
}

impl CurrentCityInfo {
    /// "Name, Country" or just the name when the country is unknown
    pub fn display_name(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }

    /// Longer label used in search suggestions: "Name, Region, Country"
    pub fn suggestion_label(&self) -> String {
        [Some(self.name.as_str()), self.admin1.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared payload builders for tests across the crate

    use super::*;

    /// Two days of hourly data starting at midnight on Tue 2025-08-05,
    /// seven days of daily data
    pub fn sample_forecast() -> RawForecast {
        let hourly_time: Vec<String> = (0..48)
            .map(|h| format!("2025-08-{:02}T{:02}:00", 5 + h / 24, h % 24))
            .collect();
        let hourly_temperature: Vec<f64> = (0..48).map(|h| 12.0 + (h % 24) as f64 * 0.5).collect();
        let hourly_precipitation: Vec<f64> = (0..48).map(|h| if h % 6 == 0 { 0.4 } else { 0.0 }).collect();
        let hourly_code: Vec<i32> = (0..48).map(|h| if h % 2 == 0 { 0 } else { 3 }).collect();

        RawForecast {
            current: CurrentConditions {
                time: "2025-08-05T14:00".to_string(),
                temperature: 20.0,
                apparent_temperature: 18.0,
                humidity_percent: 46,
                wind_speed: 14.0,
                precipitation: 0.0,
                weather_code: 2,
            },
            hourly: HourlySeries {
                time: hourly_time,
                temperature: hourly_temperature,
                precipitation: hourly_precipitation,
                weather_code: hourly_code,
            },
            daily: DailySeries {
                time: (5..12).map(|d| format!("2025-08-{:02}", d)).collect(),
                weather_code: vec![2, 61, 0, 3, 95, 71, 45],
                temperature_max: vec![25.4, 21.0, 24.0, 25.0, 21.0, 25.0, 24.0],
                temperature_min: vec![14.0, 15.0, 14.0, 13.0, 15.0, 16.0, 15.0],
                precipitation_sum: vec![0.0, 4.2, 0.0, 0.0, 12.5, 3.1, 0.2],
            },
        }
    }

    pub fn sample_city() -> CurrentCityInfo {
        CurrentCityInfo {
            name: "Berlin".to_string(),
            country: Some("Germany".to_string()),
            admin1: Some("Land Berlin".to_string()),
            latitude: 52.52437,
            longitude: 13.41053,
            timezone: Some("Europe/Berlin".to_string()),
        }
    }
}
