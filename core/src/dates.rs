//! Calendar-day keys and weekday labels.
//!
//! Day keys are derived from the instant's UTC representation. That is a
//! compatibility rule, not an oversight: a host whose local offset crosses
//! midnight will file an entry under the UTC day, and persisted data from
//! earlier versions already uses that truncation. Weekday labels are derived
//! from the parsed day key itself, so both functions agree on the same
//! calendar.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// `YYYY-MM-DD` of the instant's UTC calendar date.
#[must_use]
pub fn day_key(instant: DateTime<Utc>) -> String {
    instant.date_naive().format(DAY_KEY_FORMAT).to_string()
}

/// Today's day key (UTC).
#[must_use]
pub fn today_key() -> String {
    day_key(Utc::now())
}

pub fn parse_day_key(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DAY_KEY_FORMAT)
        .with_context(|| format!("Invalid date '{s}'. Must be YYYY-MM-DD"))
}

#[must_use]
pub fn date_to_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// Three-letter weekday name ("Mon") for a day key.
pub fn weekday_label(key: &str) -> Result<String> {
    Ok(parse_day_key(key)?.format("%a").to_string())
}
