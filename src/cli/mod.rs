//! Command line interface.

pub mod commands;

use clap::{Parser, Subcommand};

use crate::types::{MealPlanRequest, MAX_DAY, MIN_DAY};

/// Gut-health meal planner
#[derive(Parser, Debug)]
#[command(name = "gutplan", version, about = "Gut-health meal planner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Generate a single plan and print it as JSON
    Plan(PlanArgs),
}

/// Arguments for `gutplan serve`.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,
}

/// Arguments for `gutplan plan`.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Dietary preferences (e.g. vegan, keto, balanced)
    #[arg(long)]
    pub diet: String,

    /// Gut health score (e.g. poor, moderate, good)
    #[arg(long)]
    pub gut_health: String,

    /// Fitness goal (e.g. muscle gain, weight loss)
    #[arg(long)]
    pub goal: String,

    /// Day of the week to plan, 1-7
    #[arg(short, long, default_value_t = MIN_DAY, value_parser = clap::value_parser!(u8).range(MIN_DAY as i64..=MAX_DAY as i64))]
    pub day: u8,
}

impl PlanArgs {
    pub fn to_request(&self) -> MealPlanRequest {
        MealPlanRequest::new(&self.diet, &self.gut_health, &self.goal, self.day)
    }
}
