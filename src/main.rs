//! gutplan binary entry point.

use clap::Parser;
use gutplan::cli::{commands, Cli, Commands};
use gutplan::config::PlannerConfig;
use gutplan::logging::LoggingConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = LoggingConfig::from_env().init() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    // Both credentials are required before anything is served.
    let config = match PlannerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        openai_key_loaded = true,
        usda_key_loaded = true,
        model = config.model().as_str(),
        "configuration loaded"
    );

    let result = match &cli.command {
        Commands::Serve(args) => commands::handle_serve(args, config).await,
        Commands::Plan(args) => commands::handle_plan(args, config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
