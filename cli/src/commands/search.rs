use anyhow::Result;
use std::process;

use crate::gemini::GeminiClient;
use vitality_core::service::SearchCoordinator;

use super::helpers::print_hit_table;
use super::search_with_estimator;

pub(crate) async fn cmd_search(
    gemini: &GeminiClient,
    coordinator: &SearchCoordinator,
    query: &str,
    json: bool,
) -> Result<()> {
    let hits = search_with_estimator(gemini, coordinator, query).await;

    if hits.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No results found for '{query}'");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        print_hit_table(&hits);
    }

    Ok(())
}
