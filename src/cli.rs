//! Command-line interface parsing for skycast
//!
//! Parses arguments with clap and turns them into a [`StartupConfig`]: the
//! initial city, unit preferences, selected day and output mode.

use clap::Parser;
use thiserror::Error;

use crate::forecast::MAX_FORECAST_DAYS;
use crate::units::{PrecipitationUnit, TemperatureUnit, UnitPreferences, WindUnit};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid temperature unit: '{0}'. Valid units: celsius (c), fahrenheit (f)")]
    InvalidTemperatureUnit(String),

    #[error("Invalid wind unit: '{0}'. Valid units: kmh, mph")]
    InvalidWindUnit(String),

    #[error("Invalid precipitation unit: '{0}'. Valid units: mm, in")]
    InvalidPrecipitationUnit(String),

    #[error("Invalid day: {0}. Valid days: 0-6 (0 is today)")]
    InvalidDay(usize),

    /// --print / --json have nothing to show without a city
    #[error("A city is required with --print or --json")]
    CityRequired,
}

/// skycast - current conditions, 7-day and hourly forecasts for any city
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Weather forecasts for any city, with switchable units")]
#[command(version)]
pub struct Cli {
    /// City to look up, e.g. `skycast New York`
    ///
    /// Without a city the interactive view opens in search mode.
    #[arg(value_name = "CITY")]
    pub city: Vec<String>,

    /// Temperature unit: celsius (c) or fahrenheit (f)
    #[arg(long, value_name = "UNIT")]
    pub temperature: Option<String>,

    /// Wind speed unit: kmh or mph
    #[arg(long, value_name = "UNIT")]
    pub wind: Option<String>,

    /// Precipitation unit: mm or in
    #[arg(long, value_name = "UNIT")]
    pub precipitation: Option<String>,

    /// Start with imperial units (°F, mph, in); per-unit flags still override
    #[arg(long)]
    pub imperial: bool,

    /// Day shown in the hourly forecast, 0 (today) to 6
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub day: usize,

    /// Print the forecast as text and exit
    #[arg(long)]
    pub print: bool,

    /// Print the forecast view model as JSON and exit
    #[arg(long, conflicts_with = "print")]
    pub json: bool,

    /// Skip the on-disk cache for this run
    #[arg(long)]
    pub no_cache: bool,
}

/// How the forecast is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Full-screen terminal UI
    #[default]
    Interactive,
    /// Plain text to stdout
    Text,
    /// JSON view model to stdout
    Json,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartupConfig {
    /// City to load on startup
    pub city: Option<String>,
    pub units: UnitPreferences,
    pub selected_day: usize,
    pub output: OutputMode,
    pub use_cache: bool,
}

pub fn parse_temperature_arg(s: &str) -> Result<TemperatureUnit, CliError> {
    match s.to_lowercase().as_str() {
        "c" | "celsius" => Ok(TemperatureUnit::Celsius),
        "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
        _ => Err(CliError::InvalidTemperatureUnit(s.to_string())),
    }
}

pub fn parse_wind_arg(s: &str) -> Result<WindUnit, CliError> {
    match s.to_lowercase().as_str() {
        "kmh" | "km/h" | "kph" => Ok(WindUnit::KilometersPerHour),
        "mph" => Ok(WindUnit::MilesPerHour),
        _ => Err(CliError::InvalidWindUnit(s.to_string())),
    }
}

pub fn parse_precipitation_arg(s: &str) -> Result<PrecipitationUnit, CliError> {
    match s.to_lowercase().as_str() {
        "mm" | "millimeters" => Ok(PrecipitationUnit::Millimeters),
        "in" | "inch" | "inches" => Ok(PrecipitationUnit::Inches),
        _ => Err(CliError::InvalidPrecipitationUnit(s.to_string())),
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with units, day and output mode resolved
    /// * `Err(CliError)` if a unit or day is invalid, or a one-shot mode
    ///   was requested without a city
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut units = if cli.imperial {
            UnitPreferences::imperial()
        } else {
            UnitPreferences::metric()
        };
        if let Some(ref s) = cli.temperature {
            units.temperature = parse_temperature_arg(s)?;
        }
        if let Some(ref s) = cli.wind {
            units.wind = parse_wind_arg(s)?;
        }
        if let Some(ref s) = cli.precipitation {
            units.precipitation = parse_precipitation_arg(s)?;
        }

        if cli.day >= MAX_FORECAST_DAYS {
            return Err(CliError::InvalidDay(cli.day));
        }

        let city = Some(cli.city.join(" "))
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let output = if cli.json {
            OutputMode::Json
        } else if cli.print {
            OutputMode::Text
        } else {
            OutputMode::Interactive
        };

        if output != OutputMode::Interactive && city.is_none() {
            return Err(CliError::CityRequired);
        }

        Ok(StartupConfig {
            city,
            units,
            selected_day: cli.day,
            output,
            use_cache: !cli.no_cache,
        })
    }
}
