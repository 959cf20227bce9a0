//! gutplan: gut-health meal planning.
//!
//! A request (dietary preferences, gut-health score, fitness goal, day) is
//! turned into a one-day list of meals by a generative model, and each meal
//! is annotated with key nutrients from USDA FoodData Central.
//!
//! # Quick Start
//!
//! ```no_run
//! use gutplan::prelude::*;
//!
//! # async fn example() -> gutplan::error::Result<()> {
//! let config = PlannerConfig::from_env()?;
//! let planner = MealPlanner::from_config(config)?;
//! let request = MealPlanRequest::new("vegan", "moderate", "weight loss", 1);
//! let plan = planner.plan(&request).await?;
//! println!("{:?}", plan.meal_plan);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod models;
pub mod nutrition;
pub mod planner;
pub mod prelude;
pub mod provider;
pub mod server;
pub mod types;
