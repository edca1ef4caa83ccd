//! Metrics over a rolling window of per-day totals.

use crate::models::DayTotal;

/// Arithmetic mean of consumed calories over every row in the window,
/// zero-days included, rounded to the nearest whole kilocalorie.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
pub fn weekly_average(days: &[DayTotal]) -> u32 {
    if days.is_empty() {
        return 0;
    }
    let sum: u64 = days.iter().map(|d| u64::from(d.consumed)).sum();
    (sum as f64 / days.len() as f64).round() as u32
}

/// Rounded percentage of days where `0 < consumed <= target`. A day with no
/// consumption is missing data, not a success, so it never counts.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
pub fn compliance_pct(days: &[DayTotal]) -> u32 {
    if days.is_empty() {
        return 0;
    }
    let compliant = days
        .iter()
        .filter(|d| d.consumed > 0 && i64::from(d.consumed) <= i64::from(d.target))
        .count();
    (compliant as f64 / days.len() as f64 * 100.0).round() as u32
}
