//! The request pipeline: generate meal names, then resolve their nutrients.

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::generation::PlanGenerator;
use crate::nutrition::{FoodSearch, NutrientResolver, UsdaClient};
use crate::provider::create_provider;
use crate::types::{MealPlanRequest, MealPlanResult};

/// Combines the generator and resolver for one request at a time.
///
/// Holds no per-request state; share it freely behind an `Arc`.
pub struct MealPlanner {
    generator: PlanGenerator,
    config: PlannerConfig,
}

impl MealPlanner {
    pub fn new(generator: PlanGenerator, config: PlannerConfig) -> Self {
        Self { generator, config }
    }

    /// Build a planner backed by the configured model provider.
    pub fn from_config(config: PlannerConfig) -> Result<Self> {
        let generator = PlanGenerator::new(create_provider(&config)?);
        Ok(Self::new(generator, config))
    }

    /// Produce a plan, opening a USDA lookup session for this request only.
    pub async fn plan(&self, request: &MealPlanRequest) -> Result<MealPlanResult> {
        let session = UsdaClient::session(&self.config)?;
        self.plan_with(request, session).await
    }

    /// Produce a plan using `source` for nutrient lookups.
    ///
    /// `source` is consumed and dropped when the request finishes, whether
    /// it succeeded or failed.
    pub async fn plan_with<S: FoodSearch>(
        &self,
        request: &MealPlanRequest,
        source: S,
    ) -> Result<MealPlanResult> {
        let span = info_span!("meal_plan", day = request.day, request_id = %Uuid::new_v4());

        async move {
            request.validate()?;

            let meal_plan = self.generator.generate(request).await?;

            let resolver = NutrientResolver::new(source, self.config.lookup_policy());
            let nutritional_info = resolver.resolve_all(&meal_plan).await?;

            info!(
                meals = meal_plan.len(),
                resolved = nutritional_info.len(),
                "meal plan ready"
            );

            Ok(MealPlanResult {
                day: request.day,
                meal_plan,
                nutritional_info,
            })
        }
        .instrument(span)
        .await
    }
}
