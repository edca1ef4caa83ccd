use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use vitality_core::dates::parse_day_key;
use vitality_core::models::FoodHit;
use vitality_core::service::VitalityService;

/// Resolve an optional date argument on the UTC calendar, which is the
/// calendar day keys are filed under.
pub(crate) fn parse_date(date_str: Option<String>) -> Result<NaiveDate> {
    match date_str {
        None => Ok(Utc::now().date_naive()),
        Some(s) => match s.as_str() {
            "today" => Ok(Utc::now().date_naive()),
            "yesterday" => Ok(Utc::now().date_naive() - chrono::Duration::days(1)),
            _ => parse_day_key(&s)
                .with_context(|| format!("Invalid date '{s}'. Use YYYY-MM-DD, today, or yesterday")),
        },
    }
}

/// The setup gate: nothing can be logged until a profile exists.
pub(crate) fn require_profile(service: &VitalityService) -> Result<()> {
    if service.profile().is_none() {
        bail!("No profile configured. Run `vitality profile set` to create one");
    }
    Ok(())
}

pub(crate) fn prompt_choice(count: usize) -> Result<usize> {
    eprint!("\nSelect a food (1-{count}): ");
    io::stderr().flush()?;
    let stdin = io::stdin();
    let line = stdin.lock().lines().next().context("No input")??;
    let n: usize = line.trim().parse().context("Invalid number")?;
    if n < 1 || n > count {
        bail!("Selection out of range");
    }
    Ok(n - 1)
}

pub(crate) fn print_hit_table(hits: &[FoodHit]) {
    #[derive(Tabled)]
    struct HitRow {
        #[tabled(rename = "#")]
        idx: usize,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Calories")]
        calories: u32,
    }

    let rows: Vec<HitRow> = hits
        .iter()
        .enumerate()
        .map(|(i, h)| HitRow {
            idx: i + 1,
            name: truncate(&h.name, 40),
            calories: h.calories,
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
