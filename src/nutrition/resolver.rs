//! Concurrent resolution of meal names to nutrient records.

use std::collections::BTreeMap;

use futures::future::join_all;
use strum::{Display, EnumString};
use tracing::{debug, warn};

use crate::error::{PlannerError, Result};
use crate::types::{MealName, Nutrient, NutrientRecord};

use super::usda::{FoodSearch, FoodSearchResponse};

/// What to do when a single meal's lookup fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
pub enum LookupFailurePolicy {
    /// Log the failure and record an empty nutrient record for that meal.
    #[default]
    #[strum(serialize = "degrade")]
    DegradeToEmpty,
    /// Let every lookup finish, then fail the request with the first error
    /// in issue order.
    #[strum(serialize = "abort")]
    AbortAll,
}

/// Build a record from the best-matching (first) food item.
///
/// Only tracked nutrient names are kept, and only numeric values. An empty
/// food list gives an empty record.
pub fn extract_nutrients(response: &FoodSearchResponse) -> NutrientRecord {
    let Some(food) = response.foods.first() else {
        return NutrientRecord::new();
    };

    food.food_nutrients
        .iter()
        .filter_map(|n| {
            let nutrient = Nutrient::from_name(n.nutrient_name.as_deref()?)?;
            match n.value.as_ref()? {
                serde_json::Value::Number(value) => Some((nutrient, value.clone())),
                _ => None,
            }
        })
        .collect()
}

/// Second pipeline stage: fan out one lookup per meal, then join.
pub struct NutrientResolver<S> {
    source: S,
    policy: LookupFailurePolicy,
}

impl<S: FoodSearch> NutrientResolver<S> {
    pub fn new(source: S, policy: LookupFailurePolicy) -> Self {
        Self { source, policy }
    }

    pub fn policy(&self) -> LookupFailurePolicy {
        self.policy
    }

    /// Look up a single meal.
    pub async fn resolve_one(&self, meal: &str) -> Result<NutrientRecord> {
        let response = self.source.search_foods(meal).await?;
        let record = extract_nutrients(&response);
        debug!(meal, nutrients = record.len(), "resolved nutrients");
        Ok(record)
    }

    /// Resolve every meal concurrently and merge the results by name.
    ///
    /// All lookups are in flight at once and the call returns only after
    /// each has completed. Results are merged in issue order, so for a
    /// repeated name the record of the later occurrence wins.
    pub async fn resolve_all(
        &self,
        meals: &[MealName],
    ) -> Result<BTreeMap<MealName, NutrientRecord>> {
        let lookups = meals.iter().map(|meal| async move {
            let outcome = self.resolve_one(meal).await;
            (meal, outcome)
        });
        let resolved = join_all(lookups).await;

        let mut nutritional_info = BTreeMap::new();
        let mut first_failure: Option<PlannerError> = None;

        for (meal, outcome) in resolved {
            match outcome {
                Ok(record) => {
                    nutritional_info.insert(meal.clone(), record);
                }
                Err(e) => match self.policy {
                    LookupFailurePolicy::DegradeToEmpty => {
                        warn!(meal = meal.as_str(), error = %e, "nutrient lookup failed; using empty record");
                        nutritional_info.insert(meal.clone(), NutrientRecord::new());
                    }
                    LookupFailurePolicy::AbortAll => {
                        first_failure.get_or_insert(e);
                    }
                },
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(nutritional_info),
        }
    }
}
