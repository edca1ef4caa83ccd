use anyhow::Result;
use chrono::Utc;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use vitality_core::service::VitalityService;

pub(crate) fn cmd_stats(service: &VitalityService, days: u32, json: bool) -> Result<()> {
    #[derive(Tabled)]
    struct DayRow {
        #[tabled(rename = "Day")]
        label: String,
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Consumed")]
        consumed: String,
        #[tabled(rename = "Target")]
        target: String,
    }

    let end = Utc::now().date_naive();
    let stats = service.weekly_stats(end, days);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    if stats.days.iter().all(|d| d.consumed == 0) {
        eprintln!("No entries in the last {days} days");
        process::exit(2);
    }

    let rows: Vec<DayRow> = stats
        .days
        .iter()
        .map(|d| DayRow {
            label: d.label.clone(),
            date: d.date.clone(),
            consumed: d.consumed.to_string(),
            target: d.target.to_string(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    let average = stats.average;
    let compliance = stats.compliance_pct;
    println!("\n  Weekly average: {average} kcal/day");
    println!("  Compliance: {compliance}% of days within target");

    Ok(())
}
