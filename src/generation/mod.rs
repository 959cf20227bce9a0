//! Meal plan generation: prompting the model and extracting meal names.

pub mod extract;
pub mod generator;
pub mod prompt;

pub use extract::{find_json_array, parse_meal_names};
pub use generator::PlanGenerator;
pub use prompt::{build_prompt, SYSTEM_PROMPT};
