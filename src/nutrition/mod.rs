//! Nutrient lookup: the food-composition search seam, the USDA client and
//! the concurrent resolver.

pub mod resolver;
pub mod usda;

pub use resolver::{extract_nutrients, LookupFailurePolicy, NutrientResolver};
pub use usda::{FoodItem, FoodNutrient, FoodSearch, FoodSearchResponse, UsdaClient};
