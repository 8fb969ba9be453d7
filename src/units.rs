//! Unit preferences and conversions from the canonical forecast units
//!
//! Forecast payloads always arrive in Celsius, km/h and millimeters. Every
//! conversion here goes one way: from the canonical unit to the unit the user
//! picked for display.

use serde::{Deserialize, Serialize};

/// km/h to mph
const MPH_PER_KMH: f64 = 0.621371;

/// Millimeters to inches
const INCHES_PER_MM: f64 = 0.0393701;

/// Temperature display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Suffix appended to a converted temperature
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }
}

/// Wind speed display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindUnit {
    #[default]
    #[serde(rename = "kmh")]
    KilometersPerHour,
    #[serde(rename = "mph")]
    MilesPerHour,
}

impl WindUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::KilometersPerHour => "km/h",
            Self::MilesPerHour => "mph",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::KilometersPerHour => Self::MilesPerHour,
            Self::MilesPerHour => Self::KilometersPerHour,
        }
    }
}

/// Precipitation display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationUnit {
    #[default]
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "in")]
    Inches,
}

impl PrecipitationUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Inches => "in",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Millimeters => Self::Inches,
            Self::Inches => Self::Millimeters,
        }
    }
}

/// The user's unit selection for every converted quantity
///
/// Defaults to the canonical units (Celsius, km/h, mm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UnitPreferences {
    pub temperature: TemperatureUnit,
    pub wind: WindUnit,
    pub precipitation: PrecipitationUnit,
}

impl UnitPreferences {
    /// Celsius, km/h, mm
    pub fn metric() -> Self {
        Self::default()
    }

    /// Fahrenheit, mph, inches
    pub fn imperial() -> Self {
        Self {
            temperature: TemperatureUnit::Fahrenheit,
            wind: WindUnit::MilesPerHour,
            precipitation: PrecipitationUnit::Inches,
        }
    }

    /// True only when every unit is the imperial one
    pub fn is_imperial(&self) -> bool {
        *self == Self::imperial()
    }
}

/// Rounds to the nearest integer, halves toward positive infinity
///
/// -2.5 becomes -2 and 2.5 becomes 3.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Converts a Celsius value to the target unit, rounded to a whole degree
pub fn convert_temperature(celsius: f64, unit: TemperatureUnit) -> i32 {
    let value = match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    };
    round_half_up(value)
}

/// Converts a km/h value to the target unit, rounded to a whole number
pub fn convert_wind(kmh: f64, unit: WindUnit) -> i32 {
    let value = match unit {
        WindUnit::KilometersPerHour => kmh,
        WindUnit::MilesPerHour => kmh * MPH_PER_KMH,
    };
    round_half_up(value)
}

/// Converts a millimeter value to the target unit as display text
///
/// Millimeters keep one decimal place, inches two: inch amounts are
/// usually below one and would otherwise collapse to `0.0`.
pub fn convert_precipitation(mm: f64, unit: PrecipitationUnit) -> String {
    match unit {
        PrecipitationUnit::Millimeters => format!("{:.1}", mm),
        PrecipitationUnit::Inches => format!("{:.2}", mm * INCHES_PER_MM),
    }
}
