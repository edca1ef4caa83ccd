use anyhow::Result;
use std::process;

use crate::gemini::GeminiClient;
use vitality_core::dates::date_to_key;
use vitality_core::models::{FoodHit, MealType, NewLogEntry};
use vitality_core::service::{SearchCoordinator, VitalityService};

use super::helpers::{json_error, parse_date, print_hit_table, prompt_choice, require_profile};
use super::search_with_estimator;

#[allow(clippy::too_many_arguments)]
pub(crate) async fn cmd_log(
    service: &mut VitalityService,
    gemini: &GeminiClient,
    coordinator: &SearchCoordinator,
    food: &str,
    calories: Option<u32>,
    serving: &str,
    meal: &str,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    require_profile(service)?;
    let meal_type = MealType::parse(meal)?;
    let date = date_to_key(parse_date(date)?);

    let hit = if let Some(calories) = calories {
        // Custom entry: name and calories given directly, no lookup.
        FoodHit {
            name: food.to_string(),
            calories,
        }
    } else {
        let hits = search_with_estimator(gemini, coordinator, food).await;

        if hits.is_empty() {
            let msg = format!("No food found for '{food}'. Pass --calories to log it directly");
            if json {
                println!("{}", json_error(&msg));
            } else {
                eprintln!("{msg}");
            }
            process::exit(2);
        }

        if hits.len() == 1 {
            hits.into_iter().next().unwrap()
        } else {
            print_hit_table(&hits);
            let idx = prompt_choice(hits.len())?;
            hits.into_iter().nth(idx).unwrap()
        }
    };

    let entry = service.log_food(NewLogEntry {
        date,
        meal_type,
        food_name: hit.name,
        calories: hit.calories,
        serving_size: serving.to_string(),
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        let name = &entry.food_name;
        let serving = &entry.serving_size;
        let meal = entry.meal_type;
        let cal = entry.calories;
        println!("Logged: {name} ({serving}) for {meal} — {cal} kcal");
    }

    Ok(())
}

pub(crate) fn cmd_delete(service: &mut VitalityService, entry_id: &str, json: bool) -> Result<()> {
    if service.delete_log(entry_id)? {
        if json {
            println!("{}", serde_json::json!({ "deleted": entry_id }));
        } else {
            println!("Deleted entry {entry_id}");
        }
        Ok(())
    } else {
        if json {
            println!("{}", json_error(&format!("Entry {entry_id} not found")));
        } else {
            eprintln!("Entry {entry_id} not found");
        }
        process::exit(2);
    }
}
