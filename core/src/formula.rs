//! Daily calorie target derivation: Mifflin-St Jeor BMR, scaled by an
//! activity multiplier, shifted by a goal offset.
//!
//! Every function here is pure and total. Inputs are trusted: a zero or
//! negative weight produces a nonsensical but well-defined number, never an
//! error. Callers (the CLI boundary) are responsible for plausibility.

use crate::models::{ActivityLevel, Gender, Goal, UserProfile};

/// Target used by read paths before a profile has been saved.
pub const DEFAULT_DAILY_TARGET: i32 = 2000;

impl ActivityLevel {
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::VeryActive => 1.725,
            Self::ExtraActive => 1.9,
        }
    }
}

impl Goal {
    #[must_use]
    pub fn adjustment(self) -> f64 {
        match self {
            Self::LoseWeight => -500.0,
            Self::Maintain => 0.0,
            Self::GainWeight => 500.0,
        }
    }
}

/// Basal Metabolic Rate (kcal/day), Mifflin-St Jeor equation. The two gender
/// branches differ only in the trailing constant (+5 vs −161).
#[must_use]
pub fn calculate_bmr(profile: &UserProfile) -> f64 {
    let base =
        10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age);
    match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// BMR × activity multiplier + goal offset, rounded half-up to a whole
/// number of kilocalories. May be negative for implausible inputs.
#[must_use]
pub fn calculate_daily_target(profile: &UserProfile) -> i32 {
    let tdee = calculate_bmr(profile) * profile.activity_level.multiplier();
    round_half_up(tdee + profile.goal.adjustment())
}

// Half-up: ties go toward +∞, so -2.5 rounds to -2.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
