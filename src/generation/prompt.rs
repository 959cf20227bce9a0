//! Prompt text for the meal plan request.

use crate::types::MealPlanRequest;

/// System role given to the model on every request.
pub const SYSTEM_PROMPT: &str =
    "You are a gut-health nutrition expert. Always respond with valid JSON.";

/// Build the user instruction embedding every request field.
pub fn build_prompt(request: &MealPlanRequest) -> String {
    format!(
        "Generate a gut-friendly meal plan for one day (Day {day}) of a {diet} diet. \
         Consider the user's gut health score: {gut}. \
         The fitness goal is {goal}. \
         Include probiotic and prebiotic foods where appropriate. \
         Respond ONLY with a valid JSON array of meal names. \
         No extra text, no explanations, no formatting hints.",
        day = request.day,
        diet = request.dietary_preferences,
        gut = request.gut_health_score,
        goal = request.fitness_goal,
    )
}
