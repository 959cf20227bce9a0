//! Meal plan request and result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{PlannerError, Result};

/// First and last day a plan can be requested for.
pub const MIN_DAY: u8 = 1;
pub const MAX_DAY: u8 = 7;

/// Name of a dish produced by the generative stage. Not guaranteed unique.
pub type MealName = String;

/// Structured dietary request for a single day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealPlanRequest {
    /// e.g. "vegan", "keto", "balanced"
    pub dietary_preferences: String,
    /// e.g. "poor", "moderate", "good"
    pub gut_health_score: String,
    /// e.g. "muscle gain", "weight loss"
    pub fitness_goal: String,
    #[serde(default = "default_day")]
    pub day: u8,
}

fn default_day() -> u8 {
    MIN_DAY
}

impl MealPlanRequest {
    pub fn new(
        dietary_preferences: impl Into<String>,
        gut_health_score: impl Into<String>,
        fitness_goal: impl Into<String>,
        day: u8,
    ) -> Self {
        Self {
            dietary_preferences: dietary_preferences.into(),
            gut_health_score: gut_health_score.into(),
            fitness_goal: fitness_goal.into(),
            day,
        }
    }

    /// Check that `day` lies in `MIN_DAY..=MAX_DAY`.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DAY..=MAX_DAY).contains(&self.day) {
            return Err(PlannerError::InvalidRequest(format!(
                "day must be between {MIN_DAY} and {MAX_DAY}, got {}",
                self.day
            )));
        }
        Ok(())
    }
}

/// Nutrients kept from a food-composition lookup.
///
/// The string forms are the exact `nutrientName` values used by FoodData Central.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Nutrient {
    #[serde(rename = "Energy")]
    #[strum(serialize = "Energy")]
    Energy,
    #[serde(rename = "Protein")]
    #[strum(serialize = "Protein")]
    Protein,
    #[serde(rename = "Fiber, total dietary")]
    #[strum(serialize = "Fiber, total dietary")]
    Fiber,
    #[serde(rename = "Probiotics")]
    #[strum(serialize = "Probiotics")]
    Probiotics,
}

impl Nutrient {
    /// Match a reported nutrient name exactly; anything else is not tracked.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Sparse mapping of tracked nutrients to their reported values.
///
/// A missing key means the lookup service did not report that nutrient.
/// Values keep the service's number representation, so an integer `250`
/// is written back as `250` and not `250.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NutrientRecord(BTreeMap<Nutrient, Number>);

impl NutrientRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, nutrient: Nutrient, value: Number) {
        self.0.insert(nutrient, value);
    }

    /// The reported value as a float.
    pub fn get(&self, nutrient: Nutrient) -> Option<f64> {
        self.0.get(&nutrient).and_then(Number::as_f64)
    }

    /// The reported value exactly as the service sent it.
    pub fn number(&self, nutrient: Nutrient) -> Option<&Number> {
        self.0.get(&nutrient)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, &Number)> + '_ {
        self.0.iter().map(|(n, v)| (*n, v))
    }
}

impl FromIterator<(Nutrient, Number)> for NutrientRecord {
    fn from_iter<I: IntoIterator<Item = (Nutrient, Number)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A generated one-day plan with nutrient annotations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlanResult {
    pub day: u8,
    /// Meal names in the order the model produced them.
    pub meal_plan: Vec<MealName>,
    /// One entry per distinct meal name.
    pub nutritional_info: BTreeMap<MealName, NutrientRecord>,
}
