//! skycast library
//!
//! Unit conversion, weather code lookup, forecast indexing and the view model
//! builder, plus the API clients, cache and terminal UI built on them. The
//! modules are public so the binary and the integration tests share them.

pub mod app;
pub mod cache;
pub mod cli;
pub mod conditions;
pub mod data;
pub mod forecast;
pub mod logging;
pub mod report;
pub mod ui;
pub mod units;
