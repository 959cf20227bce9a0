//! Convenience re-exports for common use.

pub use crate::config::PlannerConfig;
pub use crate::error::{ErrorKind, PlannerError, Result};
pub use crate::generation::PlanGenerator;
pub use crate::nutrition::{FoodSearch, LookupFailurePolicy, NutrientResolver, UsdaClient};
pub use crate::planner::MealPlanner;
pub use crate::provider::ModelProvider;
pub use crate::types::{MealName, MealPlanRequest, MealPlanResult, Nutrient, NutrientRecord};
