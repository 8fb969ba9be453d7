//! WMO weather code lookup
//!
//! Maps the numeric condition codes used by Open-Meteo to an icon and a
//! human-readable description. Codes are grouped into categories; every code
//! in a category shares the category's icon but keeps its own description.
//!
//! See <https://open-meteo.com/en/docs> ("WMO Weather interpretation codes").

use serde::{Deserialize, Serialize};

/// Condition categories, one icon each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

impl WeatherCondition {
    /// Icon identifier shared by every code in this category
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sunny",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Overcast => "overcast",
            Self::Fog => "fog",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Thunderstorm => "storm",
        }
    }

    /// Terminal glyph for this category
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "\u{2600}",         // ☀
            Self::PartlyCloudy => "\u{26C5}",  // ⛅
            Self::Overcast => "\u{2601}",      // ☁
            Self::Fog => "\u{1F32B}",          // 🌫
            Self::Drizzle => "\u{1F326}",      // 🌦
            Self::Rain => "\u{1F327}",         // 🌧
            Self::Snow => "\u{2744}",          // ❄
            Self::Thunderstorm => "\u{26C8}",  // ⛈
        }
    }
}

/// Display pair produced for a weather code
///
/// Only implements `Serialize`: the fields point into the static code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherIcon {
    pub condition: WeatherCondition,
    /// Icon identifier (see [`WeatherCondition::icon_name`])
    pub icon: &'static str,
    pub description: &'static str,
}

impl WeatherIcon {
    const fn new(condition: WeatherCondition, icon: &'static str, description: &'static str) -> Self {
        Self {
            condition,
            icon,
            description,
        }
    }
}

const CLEAR_SKY: WeatherIcon = WeatherIcon::new(WeatherCondition::Clear, "sunny", "Clear sky");

/// Resolves a WMO weather code to its icon and description
///
/// Codes outside the table resolve to the clear-sky entry (code 0).
pub fn resolve_icon(code: i32) -> WeatherIcon {
    use WeatherCondition::*;

    match code {
        0 => CLEAR_SKY,
        1 => WeatherIcon::new(PartlyCloudy, "partly-cloudy", "Mainly clear"),
        2 => WeatherIcon::new(PartlyCloudy, "partly-cloudy", "Partly cloudy"),
        3 => WeatherIcon::new(Overcast, "overcast", "Overcast"),
        45 => WeatherIcon::new(Fog, "fog", "Fog"),
        48 => WeatherIcon::new(Fog, "fog", "Depositing rime fog"),
        51 => WeatherIcon::new(Drizzle, "drizzle", "Light drizzle"),
        53 => WeatherIcon::new(Drizzle, "drizzle", "Moderate drizzle"),
        55 => WeatherIcon::new(Drizzle, "drizzle", "Dense drizzle"),
        56 => WeatherIcon::new(Drizzle, "drizzle", "Light freezing drizzle"),
        57 => WeatherIcon::new(Drizzle, "drizzle", "Dense freezing drizzle"),
        61 => WeatherIcon::new(Rain, "rain", "Slight rain"),
        63 => WeatherIcon::new(Rain, "rain", "Moderate rain"),
        65 => WeatherIcon::new(Rain, "rain", "Heavy rain"),
        66 => WeatherIcon::new(Rain, "rain", "Light freezing rain"),
        67 => WeatherIcon::new(Rain, "rain", "Heavy freezing rain"),
        71 => WeatherIcon::new(Snow, "snow", "Slight snow fall"),
        73 => WeatherIcon::new(Snow, "snow", "Moderate snow fall"),
        75 => WeatherIcon::new(Snow, "snow", "Heavy snow fall"),
        77 => WeatherIcon::new(Snow, "snow", "Snow grains"),
        80 => WeatherIcon::new(Rain, "rain", "Slight rain showers"),
        81 => WeatherIcon::new(Rain, "rain", "Moderate rain showers"),
        82 => WeatherIcon::new(Rain, "rain", "Violent rain showers"),
        85 => WeatherIcon::new(Snow, "snow", "Slight snow showers"),
        86 => WeatherIcon::new(Snow, "snow", "Heavy snow showers"),
        95 => WeatherIcon::new(Thunderstorm, "storm", "Thunderstorm"),
        96 => WeatherIcon::new(Thunderstorm, "storm", "Thunderstorm with slight hail"),
        99 => WeatherIcon::new(Thunderstorm, "storm", "Thunderstorm with heavy hail"),
        _ => CLEAR_SKY,
    }
}
