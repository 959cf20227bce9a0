//! USDA FoodData Central search client.
//!
//! Only the `foods/search` endpoint is used, restricted to the "Foundation"
//! data type. A client owns its own connection pool, so building one per
//! request scopes the connections to that request.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::provider::http::build_client;

/// Data-quality tier requested from the search endpoint.
pub const FOUNDATION_DATA_TYPE: &str = "Foundation";

/// Search response: only the fields the resolver reads.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FoodSearchResponse {
    #[serde(default)]
    pub foods: Vec<FoodItem>,
}

/// One food item from a search, best match first.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    #[serde(default)]
    pub fdc_id: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub food_nutrients: Vec<FoodNutrient>,
}

/// A reported nutrient. `value` is kept untyped; non-numeric values are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrient {
    #[serde(default)]
    pub nutrient_name: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub unit_name: Option<String>,
}

/// Free-text food search against a nutrient database.
#[async_trait]
pub trait FoodSearch: Send + Sync {
    /// Search for `query`; failures are reported as `LookupService` errors.
    async fn search_foods(&self, query: &str) -> Result<FoodSearchResponse>;
}

#[async_trait]
impl<T: FoodSearch + ?Sized> FoodSearch for Arc<T> {
    async fn search_foods(&self, query: &str) -> Result<FoodSearchResponse> {
        (**self).search_foods(query).await
    }
}

/// USDA `FoodData` Central API client.
pub struct UsdaClient {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl UsdaClient {
    pub fn new(api_key: String, base_url: String, http_client: reqwest::Client) -> Self {
        Self {
            api_key,
            base_url,
            http_client,
        }
    }

    /// Open a lookup session with a fresh connection pool.
    pub fn session(config: &PlannerConfig) -> Result<Self> {
        Ok(Self::new(
            config.usda_api_key().to_string(),
            config.usda_base_url().to_string(),
            build_client(config.http_timeout())?,
        ))
    }
}

#[async_trait]
impl FoodSearch for UsdaClient {
    async fn search_foods(&self, query: &str) -> Result<FoodSearchResponse> {
        let url = format!("{}/foods/search", self.base_url);
        debug!(query, "USDA foods/search");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("dataType", FOUNDATION_DATA_TYPE),
            ])
            .send()
            .await
            .map_err(|e| PlannerError::lookup(query, e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlannerError::lookup(
                query,
                format!(
                    "HTTP {}: {}",
                    response.status(),
                    response.text().await.unwrap_or_default()
                ),
            ));
        }

        response
            .json::<FoodSearchResponse>()
            .await
            .map_err(|e| PlannerError::lookup(query, format!("JSON parse error: {e}")))
    }
}
