use anyhow::Result;
use std::process;

use vitality_core::dates::{date_to_key, weekday_label};
use vitality_core::service::VitalityService;
use vitality_core::store::total_calories;

use super::helpers::parse_date;

pub(crate) fn cmd_summary(
    service: &VitalityService,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = date_to_key(parse_date(date)?);
    let summary = service.daily_summary(&date);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.meals.iter().all(|m| m.entries.is_empty()) {
        eprintln!("No entries for {date}");
        process::exit(2);
    }

    println!("=== {date} ===\n");

    for meal in &summary.meals {
        if meal.entries.is_empty() {
            continue;
        }
        let meal_label = meal.meal_type.to_string().to_uppercase();
        let sub_cal = meal.subtotal;
        println!("  {meal_label} ({sub_cal} kcal)");
        for e in &meal.entries {
            let id = &e.id;
            let name = &e.food_name;
            let serving = &e.serving_size;
            let cal = e.calories;
            println!("    [{id}] {name} — {serving} — {cal} kcal");
        }
        println!();
    }

    let consumed = summary.consumed;
    let target = summary.target;
    let remaining = summary.remaining;
    println!("  TOTAL: {consumed} kcal");
    println!("  TARGET: {target} kcal");
    println!("  REMAINING: {remaining} kcal");

    Ok(())
}

pub(crate) fn cmd_history(service: &VitalityService, json: bool) -> Result<()> {
    let history = service.history();

    if json {
        let days: Vec<serde_json::Value> = history
            .iter()
            .map(|(date, entries)| {
                serde_json::json!({
                    "date": date,
                    "total": total_calories(entries),
                    "entries": entries,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(());
    }

    if history.is_empty() {
        eprintln!("No entries logged yet. Use `vitality log` to add one.");
        process::exit(2);
    }

    for (date, entries) in &history {
        let day_total = total_calories(entries);
        let label = weekday_label(date).unwrap_or_else(|_| "?".to_string());
        println!("=== {date} ({label}) — {day_total} kcal ===");
        for e in entries {
            let id = &e.id;
            let meal = e.meal_type;
            let name = &e.food_name;
            let serving = &e.serving_size;
            let cal = e.calories;
            println!("  [{id}] {meal}: {name} — {serving} — {cal} kcal");
        }
        println!();
    }

    Ok(())
}
