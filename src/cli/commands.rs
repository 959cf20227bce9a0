//! CLI command handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::PlannerConfig;
use crate::planner::MealPlanner;
use crate::server;

use super::{PlanArgs, ServeArgs};

/// Handle `gutplan serve`.
pub async fn handle_serve(
    args: &ServeArgs,
    config: PlannerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| format!("Invalid listen address '{}:{}': {e}", args.host, args.port))?;
    let planner = Arc::new(MealPlanner::from_config(config)?);
    server::serve(addr, planner).await?;
    Ok(())
}

/// Handle `gutplan plan`.
pub async fn handle_plan(
    args: &PlanArgs,
    config: PlannerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let planner = MealPlanner::from_config(config)?;
    let result = planner.plan(&args.to_request()).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
