//! Owned state stores with whole-file JSON persistence.
//!
//! Two independent records: the profile (one JSON object) and the log (one
//! JSON array). Every mutation rewrites the full record synchronously; there
//! is no delta persistence and no retry. Opening from a missing file is the
//! documented default state (no profile / empty log), not an error.
//!
//! The in-memory constructors skip persistence entirely and back the unit
//! tests and any embedding that manages its own durability.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::dates::date_to_key;
use crate::models::{DayTotal, LogEntry, MealType, NewLogEntry, UserProfile};

pub struct ProfileStore {
    profile: Option<UserProfile>,
    path: Option<PathBuf>,
}

impl ProfileStore {
    pub fn load(path: &Path) -> Result<Self> {
        let profile = if path.exists() {
            let data = fs::read_to_string(path)
                .with_context(|| format!("Failed to read profile file: {}", path.display()))?;
            Some(
                serde_json::from_str(&data)
                    .with_context(|| format!("Malformed profile file: {}", path.display()))?,
            )
        } else {
            None
        };
        Ok(Self {
            profile,
            path: Some(path.to_path_buf()),
        })
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            profile: None,
            path: None,
        }
    }

    #[must_use]
    pub fn get(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Wholesale replacement; there are no partial-field updates.
    pub fn replace(&mut self, profile: UserProfile) -> Result<()> {
        self.profile = Some(profile);
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let (Some(path), Some(profile)) = (&self.path, &self.profile) else {
            return Ok(());
        };
        let data = serde_json::to_string_pretty(profile)?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write profile file: {}", path.display()))
    }
}

pub struct LogStore {
    entries: Vec<LogEntry>,
    path: Option<PathBuf>,
}

impl LogStore {
    pub fn load(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let data = fs::read_to_string(path)
                .with_context(|| format!("Failed to read log file: {}", path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("Malformed log file: {}", path.display()))?
        } else {
            Vec::new()
        };
        Ok(Self {
            entries,
            path: Some(path.to_path_buf()),
        })
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            entries: Vec::new(),
            path: None,
        }
    }

    /// Full collection in insertion order (not guaranteed date-sorted).
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Assign a fresh id, append, persist, and return the stored entry.
    /// Duplicate name/date/meal combinations are allowed and stay distinct.
    pub fn append(&mut self, new: NewLogEntry) -> Result<LogEntry> {
        let entry = LogEntry {
            id: Uuid::new_v4().to_string(),
            date: new.date,
            meal_type: new.meal_type,
            food_name: new.food_name,
            calories: new.calories,
            serving_size: new.serving_size,
        };
        self.entries.push(entry.clone());
        self.persist()?;
        Ok(entry)
    }

    /// Remove by id. An unknown id is a no-op reported as `Ok(false)`.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Entries whose date matches exactly, in insertion order.
    #[must_use]
    pub fn entries_for_day(&self, day: &str) -> Vec<LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.date == day)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn meal_total(&self, day: &str, meal: MealType) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.date == day && e.meal_type == meal)
            .map(|e| e.calories)
            .sum()
    }

    /// Partition the collection by day key, days descending (which is
    /// reverse chronological for `YYYY-MM-DD` keys), entries in insertion
    /// order within each day.
    #[must_use]
    pub fn group_by_day(&self) -> Vec<(String, Vec<LogEntry>)> {
        let mut groups: BTreeMap<String, Vec<LogEntry>> = BTreeMap::new();
        for entry in &self.entries {
            groups.entry(entry.date.clone()).or_default().push(entry.clone());
        }
        groups.into_iter().rev().collect()
    }

    /// Per-day totals for `num_days` consecutive calendar days ending at and
    /// including `end`, chronological ascending. Days are generated by date
    /// arithmetic, so days with no entries appear with a zero total.
    #[must_use]
    pub fn rolling_window(&self, end: NaiveDate, num_days: u32, target: i32) -> Vec<DayTotal> {
        (0..num_days)
            .rev()
            .map(|offset| {
                let date = end - chrono::Duration::days(i64::from(offset));
                let key = date_to_key(date);
                let consumed = total_calories(&self.entries_for_day(&key));
                DayTotal {
                    label: date.format("%a").to_string(),
                    date: key,
                    consumed,
                    target,
                }
            })
            .collect()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let data = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write log file: {}", path.display()))
    }
}

/// Sum of calories over a sequence of entries; empty sums to 0.
#[must_use]
pub fn total_calories(entries: &[LogEntry]) -> u32 {
    entries.iter().map(|e| e.calories).sum()
}
