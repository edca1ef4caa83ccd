use anyhow::{Result, bail};
use std::process;

use vitality_core::formula::{calculate_bmr, calculate_daily_target};
use vitality_core::models::{ActivityLevel, Gender, Goal, UserProfile};
use vitality_core::service::VitalityService;

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_profile_set(
    service: &mut VitalityService,
    name: &str,
    age: u32,
    gender: &str,
    height: f64,
    weight: f64,
    activity: &str,
    goal: &str,
    json: bool,
) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Name must not be empty");
    }
    if age == 0 {
        bail!("Age must be greater than 0");
    }
    if height <= 0.0 {
        bail!("Height must be greater than 0 (cm)");
    }
    if weight <= 0.0 {
        bail!("Weight must be greater than 0 (kg)");
    }

    let display_name = name.trim().to_string();
    let profile = UserProfile {
        name: display_name.clone(),
        age,
        gender: Gender::parse(gender)?,
        height_cm: height,
        weight_kg: weight,
        activity_level: ActivityLevel::parse(activity)?,
        goal: Goal::parse(goal)?,
    };

    let target = service.save_profile(profile)?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "profile": service.profile(), "dailyTarget": target })
        );
    } else {
        println!("Saved profile for {display_name}");
        println!("Daily target: {target} kcal");
    }

    Ok(())
}

pub(crate) fn cmd_profile_show(service: &VitalityService, json: bool) -> Result<()> {
    let Some(profile) = service.profile() else {
        if json {
            println!(
                "{}",
                super::helpers::json_error("No profile configured")
            );
        } else {
            eprintln!("No profile configured. Run `vitality profile set` to create one.");
        }
        process::exit(2);
    };

    let bmr = calculate_bmr(profile);
    let target = calculate_daily_target(profile);

    if json {
        println!(
            "{}",
            serde_json::json!({ "profile": profile, "bmr": bmr, "dailyTarget": target })
        );
        return Ok(());
    }

    let name = &profile.name;
    let age = profile.age;
    let gender = profile.gender;
    let height = profile.height_cm;
    let weight = profile.weight_kg;
    let activity = profile.activity_level;
    let goal = profile.goal;
    println!("{name}");
    println!("  Age: {age}  Gender: {gender}");
    println!("  Height: {height:.0} cm  Weight: {weight:.1} kg");
    println!("  Activity: {activity}  Goal: {goal}");
    println!("  BMR: {bmr:.0} kcal");
    println!("  Daily target: {target} kcal");

    Ok(())
}
