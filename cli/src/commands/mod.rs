mod helpers;
mod log;
mod profile;
mod search;
mod stats;
mod summary;

use crate::gemini::GeminiClient;
use vitality_core::foods;
use vitality_core::models::FoodHit;
use vitality_core::service::{SearchCoordinator, should_consult_estimator};

pub(crate) use log::{cmd_delete, cmd_log};
pub(crate) use profile::{cmd_profile_set, cmd_profile_show};
pub(crate) use search::cmd_search;
pub(crate) use stats::cmd_stats;
pub(crate) use summary::{cmd_history, cmd_summary};

/// Local table first, then the estimator when the local matches aren't
/// enough. The coordinator ticket drops an estimate that loses the race
/// against a search started later.
pub(super) async fn search_with_estimator(
    gemini: &GeminiClient,
    coordinator: &SearchCoordinator,
    query: &str,
) -> Vec<FoodHit> {
    let ticket = coordinator.begin();
    let mut hits = foods::search_local(query);
    if should_consult_estimator(hits.len(), query) {
        let estimate = gemini.estimate_async(query).await;
        if coordinator.accept(&ticket) {
            hits.push(estimate);
        }
    }
    hits
}
