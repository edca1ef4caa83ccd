use std::time::Duration;

use anyhow::{Context, Result};

use vitality_core::estimate::{self, GenerateContentResponse};
use vitality_core::models::FoodHit;
use vitality_core::service::CalorieEstimator;

const GENERATE_URL_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the generative calorie estimator.
///
/// Failure is not part of this client's interface: a missing `GEMINI_API_KEY`,
/// an unreachable upstream, or a malformed response all resolve to a fixed
/// fallback estimate keyed to the query string.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    rt: tokio::runtime::Handle,
}

impl GeminiClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "vitality-cli/{} (calorie tracker)",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            rt: tokio::runtime::Handle::current(),
        }
    }

    pub async fn estimate_async(&self, query: &str) -> FoodHit {
        let Some(key) = self.api_key.as_deref() else {
            eprintln!("Note: GEMINI_API_KEY not set — using a default estimate");
            return estimate::missing_key_fallback(query);
        };
        match self.request(key, query).await {
            Ok(Some(hit)) => hit,
            Ok(None) => estimate::failure_fallback(query),
            Err(e) => {
                eprintln!("Note: calorie estimation failed ({e:#}) — using a default estimate");
                estimate::failure_fallback(query)
            }
        }
    }

    async fn request(&self, key: &str, query: &str) -> Result<Option<FoodHit>> {
        let url = format!(
            "{GENERATE_URL_BASE}/{}:generateContent",
            estimate::ESTIMATOR_MODEL
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": estimate::estimate_prompt(query) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": estimate::response_schema(),
            },
        });

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await
            .context("Failed to reach the estimation API")?;

        let data: GenerateContentResponse = resp
            .json()
            .await
            .context("Failed to parse the estimation response")?;

        Ok(estimate::parse_estimate(&data))
    }
}

impl CalorieEstimator for GeminiClient {
    fn estimate(&self, query: &str) -> FoodHit {
        self.rt.block_on(self.estimate_async(query))
    }
}
