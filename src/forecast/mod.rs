//! Forecast rendering pipeline
//!
//! Turns a [`RawForecast`](crate::data::RawForecast) plus the user's unit
//! preferences and selected day into a render-ready [`ForecastViewModel`].
//! Everything in here is synchronous and side-effect free.

pub mod indexer;
pub mod view_model;

pub use indexer::{
    clamp_day_index, compute_hourly_window, compute_hourly_window_with, is_valid_day_index,
    HourlyWindowPolicy, HOURLY_SLOTS, HOURLY_WINDOW_POLICY, MAX_FORECAST_DAYS,
};
pub use view_model::{build, degrees, CurrentView, DailyView, ForecastViewModel, HourlyView};

use thiserror::Error;

/// Contract violations detected while reading a forecast payload
///
/// The builder reports these instead of filling the view model with
/// placeholder values that could pass for real data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    /// A parallel series does not have the same length as its `time` series
    #[error("Series '{series}' has {actual} entries, expected {expected}")]
    MisalignedSeries {
        series: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A timestamp in the payload could not be parsed
    #[error("Invalid timestamp in '{field}': {value}")]
    InvalidTimestamp { field: &'static str, value: String },
}
