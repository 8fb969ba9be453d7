//! Day and hour windowing over the parallel forecast arrays

/// Number of days shown in the daily summary and offered by the day selector
pub const MAX_FORECAST_DAYS: usize = 7;

/// Number of slots in the hourly strip
pub const HOURLY_SLOTS: usize = 8;

/// Hours per day block in the hourly arrays
const HOURS_PER_DAY: usize = 24;

/// How the hourly strip samples a day block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourlyWindowPolicy {
    /// Every third hour across the whole day (00:00, 03:00, ... 21:00)
    Stride3,
    /// The first eight hours of the day (00:00 ... 07:00)
    Contiguous,
}

impl HourlyWindowPolicy {
    fn step(&self) -> usize {
        match self {
            Self::Stride3 => 3,
            Self::Contiguous => 1,
        }
    }
}

/// Policy used by the view model builder.
///
/// Stride-3 sampling covers the full selected day in eight slots.
pub const HOURLY_WINDOW_POLICY: HourlyWindowPolicy = HourlyWindowPolicy::Stride3;

/// Computes the hourly-array indices for the selected day using [`HOURLY_WINDOW_POLICY`]
pub fn compute_hourly_window(selected_day: usize, hourly_len: usize) -> Vec<usize> {
    compute_hourly_window_with(HOURLY_WINDOW_POLICY, selected_day, hourly_len)
}

/// Computes up to [`HOURLY_SLOTS`] hourly-array indices for the selected day
///
/// Indices at or beyond `hourly_len` are dropped, so the result is shorter
/// than eight (possibly empty) near the end of the available data.
pub fn compute_hourly_window_with(
    policy: HourlyWindowPolicy,
    selected_day: usize,
    hourly_len: usize,
) -> Vec<usize> {
    let Some(start) = selected_day.checked_mul(HOURS_PER_DAY) else {
        return Vec::new();
    };

    (0..HOURLY_SLOTS)
        .filter_map(|slot| start.checked_add(slot * policy.step()))
        .filter(|&index| index < hourly_len)
        .collect()
}

/// Number of selectable days for a payload with `daily_len` days
fn selectable_days(daily_len: usize) -> usize {
    daily_len.min(MAX_FORECAST_DAYS)
}

/// Whether `requested` is a day the selector may offer
pub fn is_valid_day_index(requested: usize, daily_len: usize) -> bool {
    requested < selectable_days(daily_len)
}

/// Returns `requested` if it is selectable, otherwise the last selectable day
///
/// With no days available the result is 0.
pub fn clamp_day_index(requested: usize, daily_len: usize) -> usize {
    let days = selectable_days(daily_len);
    if requested < days {
        requested
    } else {
        days.saturating_sub(1)
    }
}
