//! `crs`: command line front end for the crop recommendation client.

use chrono::Utc;
use clap::Parser;

use crs_client::api::ApiClient;
use crs_client::api::feedback::generate_farm_id;
use crs_client::api::health::{HealthMonitor, ServiceStatus};
use crs_client::api::predict::build_results;
use crs_client::chat::ChatState;
use crs_client::config::{ClientConfig, ConfigError, load_config};
use crs_client::crops::CROP_REGISTRY;
use crs_client::form::normalize_form_input;
use crs_client::logging::{self, Endpoint, LogLevel};
use crs_client::model::{CrsError, FeedbackRecord, ResultsView};
use crs_client::session::Session;

mod cli;

use crate::cli::{Cli, Command, FeedbackArgs, PredictArgs};

const RULE: &str = "═══════════════════════════════════════════════════════════════";

fn main() {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config.log_level()
    };
    if let Err(e) = logging::init_logger(level, config.log_file.as_deref(), cli.verbose) {
        eprintln!("error: failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    let exit_code = match &cli.command {
        Command::Crops => {
            print_crop_table();
            0
        }
        Command::Chat {
            message,
            online: false,
        } => {
            run_chat(ChatState::new(Utc::now()).ask(&message.join(" "), Utc::now()));
            0
        }
        command => match ApiClient::from_config(&config) {
            Ok(client) => run_remote(command, &client, &config),
            Err(e) => {
                eprintln!("error: {}", e);
                2
            }
        },
    };
    std::process::exit(exit_code);
}

fn resolve_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    match &cli.config {
        Some(path) => load_config(path),
        None => ClientConfig::from_env(),
    }
}

fn run_remote(command: &Command, client: &ApiClient, config: &ClientConfig) -> i32 {
    let result = match command {
        Command::Predict(args) => run_predict(client, args),
        Command::Feedback(args) => run_feedback(client, args),
        Command::Health => {
            let mut monitor = HealthMonitor::new(config.health_poll_secs);
            let status = monitor.poll(client);
            println!("{} ({})", status, client.base_url());
            return if status == ServiceStatus::Online { 0 } else { 1 };
        }
        Command::History { farm_id } => run_history(client, farm_id),
        Command::Chat { message, .. } => {
            let state =
                ChatState::new(Utc::now()).ask_service(client, &message.join(" "), Utc::now());
            let failed = state.messages.last().is_some_and(|m| m.is_error);
            run_chat(state);
            return if failed { 1 } else { 0 };
        }
        Command::Crops => Ok(()),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            logging::debug(Endpoint::System, None, &format!("command failed: {:?}", e));
            eprintln!("✗ {}", e.user_message());
            1
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn run_predict(client: &ApiClient, args: &PredictArgs) -> Result<(), CrsError> {
    let vector = normalize_form_input(&args.raw_input())?;

    let mut session = Session::new();
    let ticket = session.begin_submission(vector);
    let response = client.request_recommendations(&vector, args.farm_id.as_deref())?;
    session.complete(ticket, build_results(response));

    let Some(results) = session.results() else {
        return Ok(());
    };
    if args.json {
        let text = serde_json::to_string_pretty(results)
            .map_err(|e| CrsError::Parse(e.to_string()))?;
        println!("{}", text);
    } else {
        print_results(results);
    }
    Ok(())
}

fn run_feedback(client: &ApiClient, args: &FeedbackArgs) -> Result<(), CrsError> {
    let record = FeedbackRecord {
        farm_id: args.farm_id.clone().unwrap_or_else(generate_farm_id),
        crop: args.crop.clone(),
        accepted: args.accepted,
        rating: args.rating,
        comments: args.comments.clone(),
    };
    let ack = client.submit_feedback(&record)?;
    let message = if ack.message.is_empty() {
        "Feedback recorded"
    } else {
        ack.message.as_str()
    };
    println!("✓ {} (farm {})", message, record.farm_id);
    if let Some(id) = ack.feedback_id {
        println!("  feedback id: {}", id);
    }
    Ok(())
}

fn run_history(client: &ApiClient, farm_id: &str) -> Result<(), CrsError> {
    let history = client.get_recommendation_history(farm_id)?;
    println!("📜 Recommendation history for {} ({} total)", history.farm_id, history.total_count);
    if history.recommendations.is_empty() {
        println!("   No stored recommendations.");
    }
    for past in &history.recommendations {
        let crops: Vec<&str> = past
            .recommendations
            .iter()
            .map(|r| r.crop_id.as_str())
            .collect();
        println!(
            "   {}  {}",
            past.created_at.as_deref().unwrap_or("unknown date"),
            crops.join(", ")
        );
    }
    Ok(())
}

fn run_chat(state: ChatState) {
    if let Some(reply) = state.messages.last() {
        logging::debug(
            Endpoint::Chat,
            None,
            &format!("matched {}", reply.category.as_deref().unwrap_or("nothing")),
        );
        if let Some(category) = &reply.category {
            println!("[{}]", category);
        }
        println!("{}", reply.text);
    }
    println!();
    println!("Try asking:");
    for suggestion in &state.suggestions {
        println!("  • {}", suggestion);
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_results(results: &ResultsView) {
    println!("{}", RULE);
    println!("🌾 CROP RECOMMENDATIONS");
    println!("{}", RULE);
    if results.recommendations.is_empty() {
        println!("No crops were recommended for these readings.");
    }
    for (rank, rec) in results.recommendations.iter().enumerate() {
        println!();
        println!("{}. {}  ({}% confidence)", rank + 1, rec.crop, rec.confidence_percent);
        println!("   Season:            {}", rec.season);
        println!("   Water requirement: {}", rec.water_requirement);
        println!("   Estimated yield:   {} kg/ha", rec.estimated_yield);
        println!("   Profitability:     {}", rec.profitability_tier);
        println!("   Market price:      ₹{}/tonne", rec.market_price);
        println!("   Investment:        ₹{}/ha", rec.investment_required);
        if !rec.reason.is_empty() {
            println!("   Why:               {}", rec.reason);
        }
    }
    println!();
    println!("{}", RULE);
    println!("📊 ANALYSIS");
    println!("   Soil health:         {}", results.analysis.soil_health);
    println!("   Weather suitability: {}", results.analysis.weather_suitability);
    println!("   Risk level:          {}", results.analysis.risk_level);
    println!("{}", RULE);
}

fn print_crop_table() {
    println!(
        "{:<10} {:<18} {:<7} {:>12} {:>12}",
        "Crop", "Season", "Water", "Price ₹/t", "Invest ₹/ha"
    );
    for crop in CROP_REGISTRY {
        println!(
            "{:<10} {:<18} {:<7} {:>12} {:>12}",
            crop.key, crop.season, crop.water_requirement, crop.market_price, crop.investment_required
        );
    }
}
