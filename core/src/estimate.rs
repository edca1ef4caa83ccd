//! Wire contract for the external calorie estimator.
//!
//! The estimator is a generative-language API asked for a strict JSON object
//! `{name, calories}`. This module owns the request prompt, the response
//! schema sent with the request, the response DTOs, and the parsing into a
//! [`FoodHit`]. HTTP itself lives in the frontend crate; the parsing here is
//! strict and returns `None` for anything malformed so the client can fall
//! back to a fixed default instead of surfacing an error.

use serde::Deserialize;
use serde_json::json;

use crate::models::FoodHit;

pub const ESTIMATOR_MODEL: &str = "gemini-3-flash-preview";

/// Returned when no estimator credential is configured.
pub const MISSING_KEY_FALLBACK_KCAL: u32 = 100;

/// Returned when the estimator is unreachable or its response is malformed.
pub const FAILURE_FALLBACK_KCAL: u32 = 150;

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEstimate {
    name: String,
    calories: f64,
}

#[must_use]
pub fn estimate_prompt(query: &str) -> String {
    format!(
        "Estimate calories for: {query}. Return a JSON object with 'name' and 'calories' (number)."
    )
}

/// Response schema attached to the request so the model answers in the shape
/// [`parse_estimate`] expects.
#[must_use]
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "calories": { "type": "NUMBER" }
        },
        "required": ["name", "calories"]
    })
}

/// Extract the model's `{name, calories}` answer from a response body.
/// Missing candidates, missing text, unparsable inner JSON, or an empty name
/// all yield `None`. Fractional or negative calorie values are clamped to a
/// non-negative whole number.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn parse_estimate(response: &GenerateContentResponse) -> Option<FoodHit> {
    let text = response
        .candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .first()?
        .text
        .as_deref()?;
    let raw: RawEstimate = serde_json::from_str(text.trim()).ok()?;
    if raw.name.trim().is_empty() {
        return None;
    }
    Some(FoodHit {
        name: raw.name,
        calories: raw.calories.max(0.0).round() as u32,
    })
}

#[must_use]
pub fn missing_key_fallback(query: &str) -> FoodHit {
    FoodHit {
        name: query.to_string(),
        calories: MISSING_KEY_FALLBACK_KCAL,
    }
}

#[must_use]
pub fn failure_fallback(query: &str) -> FoodHit {
    FoodHit {
        name: query.to_string(),
        calories: FAILURE_FALLBACK_KCAL,
    }
}
