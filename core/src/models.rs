use std::fmt;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => bail!("Invalid gender '{s}'. Must be one of: male, female"),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::LightlyActive,
        Self::ModeratelyActive,
        Self::VeryActive,
        Self::ExtraActive,
    ];

    /// Accepts the snake_case form as persisted, plus hyphenated spellings
    /// typed on the command line.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "lightly_active" => Ok(Self::LightlyActive),
            "moderately_active" => Ok(Self::ModeratelyActive),
            "very_active" => Ok(Self::VeryActive),
            "extra_active" => Ok(Self::ExtraActive),
            _ => bail!(
                "Invalid activity level '{s}'. Must be one of: sedentary, lightly_active, \
                 moderately_active, very_active, extra_active"
            ),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Sedentary => "sedentary",
            Self::LightlyActive => "lightly_active",
            Self::ModeratelyActive => "moderately_active",
            Self::VeryActive => "very_active",
            Self::ExtraActive => "extra_active",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    Maintain,
    GainWeight,
}

impl Goal {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "lose_weight" | "lose" => Ok(Self::LoseWeight),
            "maintain" => Ok(Self::Maintain),
            "gain_weight" | "gain" => Ok(Self::GainWeight),
            _ => bail!("Invalid goal '{s}'. Must be one of: lose_weight, maintain, gain_weight"),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::LoseWeight => "lose_weight",
            Self::Maintain => "maintain",
            Self::GainWeight => "gain_weight",
        };
        write!(f, "{label}")
    }
}

/// Serialized with the capitalized variant names (`"Breakfast"`) to stay
/// readable in the persisted log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snacks];

    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snacks" | "snack" => Ok(Self::Snacks),
            _ => bail!("Invalid meal type '{s}'. Must be one of: breakfast, lunch, dinner, snacks"),
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snacks => "Snacks",
        };
        write!(f, "{label}")
    }
}

/// The single biometric profile. Replaced wholesale on save, never patched
/// field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(rename = "height")]
    pub height_cm: f64,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

/// One logged food. `date` is the calendar-day key fixed at creation and
/// never updated afterwards; entries are only appended and removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub date: String,
    pub meal_type: MealType,
    pub food_name: String,
    pub calories: u32,
    pub serving_size: String,
}

#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub date: String,
    pub meal_type: MealType,
    pub food_name: String,
    pub calories: u32,
    pub serving_size: String,
}

/// One search result: a row from the local table or an estimator guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodHit {
    pub name: String,
    pub calories: u32,
}

// --- Derived aggregates (computed on demand, never persisted) ---

#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub date: String,
    pub meals: Vec<MealGroup>,
    pub consumed: u32,
    pub target: i32,
    pub remaining: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealGroup {
    pub meal_type: MealType,
    pub entries: Vec<LogEntry>,
    pub subtotal: u32,
}

/// One row of a rolling window: a calendar day, its weekday label, what was
/// consumed, and the target it is measured against.
#[derive(Debug, Clone, Serialize)]
pub struct DayTotal {
    pub date: String,
    pub label: String,
    pub consumed: u32,
    pub target: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyStats {
    pub days: Vec<DayTotal>,
    pub average: u32,
    pub compliance_pct: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meal_types() {
        assert_eq!(MealType::parse("breakfast").unwrap(), MealType::Breakfast);
        assert_eq!(MealType::parse("lunch").unwrap(), MealType::Lunch);
        assert_eq!(MealType::parse("dinner").unwrap(), MealType::Dinner);
        assert_eq!(MealType::parse("snacks").unwrap(), MealType::Snacks);
        // Singular alias
        assert_eq!(MealType::parse("snack").unwrap(), MealType::Snacks);
    }

    #[test]
    fn test_parse_meal_type_case_insensitive() {
        assert_eq!(MealType::parse("Lunch").unwrap(), MealType::Lunch);
        assert_eq!(MealType::parse("BREAKFAST").unwrap(), MealType::Breakfast);
    }

    #[test]
    fn test_parse_meal_type_invalid() {
        assert!(MealType::parse("brunch").is_err());
        assert!(MealType::parse("").is_err());
    }

    #[test]
    fn test_parse_gender() {
        assert_eq!(Gender::parse("male").unwrap(), Gender::Male);
        assert_eq!(Gender::parse("F").unwrap(), Gender::Female);
        assert!(Gender::parse("other").is_err());
    }

    #[test]
    fn test_parse_activity_level_spellings() {
        assert_eq!(
            ActivityLevel::parse("moderately_active").unwrap(),
            ActivityLevel::ModeratelyActive
        );
        assert_eq!(
            ActivityLevel::parse("moderately-active").unwrap(),
            ActivityLevel::ModeratelyActive
        );
        assert_eq!(
            ActivityLevel::parse("Sedentary").unwrap(),
            ActivityLevel::Sedentary
        );
        assert!(ActivityLevel::parse("athlete").is_err());
    }

    #[test]
    fn test_parse_goal() {
        assert_eq!(Goal::parse("lose_weight").unwrap(), Goal::LoseWeight);
        assert_eq!(Goal::parse("lose").unwrap(), Goal::LoseWeight);
        assert_eq!(Goal::parse("maintain").unwrap(), Goal::Maintain);
        assert_eq!(Goal::parse("gain-weight").unwrap(), Goal::GainWeight);
        assert!(Goal::parse("bulk").is_err());
    }

    #[test]
    fn test_profile_serde_field_names() {
        let profile = UserProfile {
            name: "Ada".to_string(),
            age: 30,
            gender: Gender::Female,
            height_cm: 170.0,
            weight_kg: 60.0,
            activity_level: ActivityLevel::LightlyActive,
            goal: Goal::Maintain,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["gender"], "female");
        assert_eq!(json["height"], 170.0);
        assert_eq!(json["weight"], 60.0);
        assert_eq!(json["activityLevel"], "lightly_active");
        assert_eq!(json["goal"], "maintain");

        let back: UserProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_log_entry_serde_field_names() {
        let entry = LogEntry {
            id: "abc".to_string(),
            date: "2024-06-15".to_string(),
            meal_type: MealType::Breakfast,
            food_name: "Oatmeal".to_string(),
            calories: 158,
            serving_size: "1 serving".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["mealType"], "Breakfast");
        assert_eq!(json["foodName"], "Oatmeal");
        assert_eq!(json["servingSize"], "1 serving");
        assert_eq!(json["calories"], 158);
    }
}
