//! Shared test helpers: a scripted model provider and an in-memory food search.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use gutplan::config::PlannerConfig;
use gutplan::error::PlannerError;
use gutplan::nutrition::{FoodItem, FoodNutrient, FoodSearch, FoodSearchResponse};
use gutplan::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use gutplan::types::*;

/// What the mock provider should do on its next call.
pub enum Scripted {
    Text(String),
    /// Text cut off by the token limit.
    Truncated(String),
    Quota,
    Failure(u16, String),
}

/// A mock provider that returns scripted responses and records requests.
pub struct MockProvider {
    script: Mutex<Vec<Scripted>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_text(text: &str) -> Self {
        let provider = Self::new();
        provider.queue(Scripted::Text(text.to_string()));
        provider
    }

    pub fn queue(&self, step: Scripted) {
        self.script.lock().unwrap().push(step);
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, PlannerError> {
        self.requests.lock().unwrap().push(request.clone());
        let step = {
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                Scripted::Text("[]".to_string())
            } else {
                script.remove(0)
            }
        };
        let usage = Usage {
            input_tokens: 10,
            output_tokens: 20,
            total_tokens: 30,
        };
        match step {
            Scripted::Text(text) => Ok(ProviderResponse {
                text,
                usage,
                finish_reason: Some(FinishReason::Stop),
            }),
            Scripted::Truncated(text) => Ok(ProviderResponse {
                text,
                usage,
                finish_reason: Some(FinishReason::Length),
            }),
            Scripted::Quota => Err(PlannerError::QuotaExceeded {
                message: "You exceeded your current quota".to_string(),
            }),
            Scripted::Failure(status, message) => Err(PlannerError::generation(status, message)),
        }
    }
}

/// In-memory food search with optional latency and failure injection.
#[derive(Default)]
pub struct MockFoodSearch {
    foods: HashMap<String, Vec<(String, f64)>>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    stamp_call_index: bool,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockFoodSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first food returned for `meal` reports these nutrients.
    pub fn with_food(mut self, meal: &str, nutrients: &[(&str, f64)]) -> Self {
        self.foods.insert(
            meal.to_string(),
            nutrients.iter().map(|(n, v)| (n.to_string(), *v)).collect(),
        );
        self
    }

    pub fn failing_for(mut self, meal: &str) -> Self {
        self.failing.insert(meal.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer every lookup with `Energy` set to the zero-based call index.
    pub fn stamping_call_index(mut self) -> Self {
        self.stamp_call_index = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

fn single_food(nutrients: Vec<(String, f64)>) -> FoodSearchResponse {
    FoodSearchResponse {
        foods: vec![FoodItem {
            food_nutrients: nutrients
                .into_iter()
                .map(|(name, value)| FoodNutrient {
                    nutrient_name: Some(name),
                    value: Some(serde_json::json!(value)),
                    unit_name: None,
                })
                .collect(),
            ..Default::default()
        }],
    }
}

#[async_trait]
impl FoodSearch for MockFoodSearch {
    async fn search_foods(&self, query: &str) -> gutplan::error::Result<FoodSearchResponse> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(query.to_string());
            calls.len() - 1
        };
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(query) {
            return Err(PlannerError::lookup(query, "HTTP 503 Service Unavailable"));
        }
        if self.stamp_call_index {
            return Ok(single_food(vec![("Energy".to_string(), index as f64)]));
        }
        Ok(match self.foods.get(query) {
            Some(nutrients) => single_food(nutrients.clone()),
            None => FoodSearchResponse::default(),
        })
    }
}

/// Config with test credentials and endpoints pointed at `base_url`.
pub fn test_config(base_url: &str) -> PlannerConfig {
    PlannerConfig::new("sk-test", "usda-test")
        .unwrap()
        .with_openai_base_url(format!("{base_url}/v1"))
        .with_usda_base_url(format!("{base_url}/fdc/v1"))
}

pub fn sample_request() -> MealPlanRequest {
    MealPlanRequest::new("vegan", "moderate", "weight loss", 2)
}
