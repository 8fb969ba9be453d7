//! On-disk cache for API responses
//!
//! Geocoding lookups and forecasts are stored as JSON with a TTL. Expired
//! entries stay readable so the app can show the last known forecast when
//! offline.

mod manager;

pub use manager::{CacheManager, CachedData};
