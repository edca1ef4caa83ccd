mod commands;
mod config;
mod gemini;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;

use crate::commands::{
    cmd_delete, cmd_history, cmd_log, cmd_profile_set, cmd_profile_show, cmd_search, cmd_stats,
    cmd_summary,
};
use crate::config::Config;
use crate::gemini::GeminiClient;
use vitality_core::service::{SearchCoordinator, VitalityService};

#[derive(Parser)]
#[command(
    name = "vitality",
    version,
    about = "A personal calorie tracker CLI",
    long_about = "\n\n  vitality — eat with intent.\n\n  Set up a profile once, get a daily calorie target, and log meals\n  against it from the command line."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a food entry, searching for it unless --calories is given
    Log {
        /// Food name to search for (or to log directly with --calories)
        food: String,
        /// Calories for a custom entry (skips the search)
        #[arg(long)]
        calories: Option<u32>,
        /// Serving description (free text)
        #[arg(short, long, default_value = "1 serving")]
        serving: String,
        /// Meal type: breakfast, lunch, dinner, snacks
        #[arg(short, long, default_value = "snacks")]
        meal: String,
        /// Date to log for (YYYY-MM-DD, today, yesterday; default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search the food table and the calorie estimator
    Search {
        /// Search query
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one day's meals against the daily target (defaults to today)
    Summary {
        /// Date to show (YYYY-MM-DD, today, yesterday; default: today)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the full log grouped by day, most recent first
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the rolling consumption window, weekly average, and compliance
    Stats {
        /// Number of days in the window
        #[arg(short, long, default_value = "7")]
        days: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a log entry by id
    Delete {
        /// Entry id to delete
        entry_id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the biometric profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Create or replace the profile and derive the daily target
    Set {
        /// Display name
        #[arg(long)]
        name: String,
        /// Age in years
        #[arg(long)]
        age: u32,
        /// Gender: male, female
        #[arg(long)]
        gender: String,
        /// Height in cm
        #[arg(long)]
        height: f64,
        /// Weight in kg
        #[arg(long)]
        weight: f64,
        /// Activity level: sedentary, lightly_active, moderately_active, very_active, extra_active
        #[arg(long)]
        activity: String,
        /// Goal: lose_weight, maintain, gain_weight
        #[arg(long)]
        goal: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the profile with its derived BMR and daily target
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let mut service = VitalityService::open(&config.profile_path, &config.logs_path)?;
    let gemini = GeminiClient::new();
    let coordinator = SearchCoordinator::new();

    match cli.command {
        Commands::Log {
            food,
            calories,
            serving,
            meal,
            date,
            json,
        } => {
            cmd_log(
                &mut service,
                &gemini,
                &coordinator,
                &food,
                calories,
                &serving,
                &meal,
                date,
                json,
            )
            .await
        }
        Commands::Search { query, json } => cmd_search(&gemini, &coordinator, &query, json).await,
        Commands::Summary { date, json } => cmd_summary(&service, date, json),
        Commands::History { json } => cmd_history(&service, json),
        Commands::Stats { days, json } => cmd_stats(&service, days, json),
        Commands::Delete { entry_id, json } => cmd_delete(&mut service, &entry_id, json),
        Commands::Profile { command } => match command {
            ProfileCommands::Set {
                name,
                age,
                gender,
                height,
                weight,
                activity,
                goal,
                json,
            } => cmd_profile_set(
                &mut service,
                &name,
                age,
                &gender,
                height,
                weight,
                &activity,
                &goal,
                json,
            ),
            ProfileCommands::Show { json } => cmd_profile_show(&service, json),
        },
    }
}
