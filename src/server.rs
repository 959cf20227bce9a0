//! HTTP surface: a welcome route and the meal plan endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{error, info};

use crate::error::{ErrorKind, PlannerError, Result, QUOTA_EXCEEDED_MESSAGE};
use crate::planner::MealPlanner;
use crate::types::{MealPlanRequest, MealPlanResult};

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Gut Health AI API! Use /docs to explore the endpoints.";

/// Quota exhaustion is reported as 429 rather than a 200 carrying an error
/// body, so clients can tell it apart from a plan by status alone.
impl IntoResponse for PlannerError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = match self.kind() {
            ErrorKind::QuotaExceeded => json!({ "error": QUOTA_EXCEEDED_MESSAGE }),
            _ => json!({ "detail": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Meal plan routes.
pub struct MealPlanRoutes;

impl MealPlanRoutes {
    pub fn routes(planner: Arc<MealPlanner>) -> Router {
        Router::new()
            .route("/", get(Self::handle_home))
            .route("/generate_meal_plan", post(Self::handle_generate))
            .with_state(planner)
    }

    async fn handle_home() -> Json<serde_json::Value> {
        Json(json!({ "message": WELCOME_MESSAGE }))
    }

    /// Generate a plan. Bodies that do not deserialize into a request are
    /// answered like an out-of-range day: 422 with a `detail` message.
    async fn handle_generate(
        State(planner): State<Arc<MealPlanner>>,
        payload: std::result::Result<Json<MealPlanRequest>, JsonRejection>,
    ) -> std::result::Result<Json<MealPlanResult>, PlannerError> {
        let outcome = match payload {
            Ok(Json(request)) => planner.plan(&request).await.map(Json),
            Err(rejection) => Err(PlannerError::InvalidRequest(rejection.body_text())),
        };
        outcome.inspect_err(|e| error!(kind = %e.kind(), error = %e, "meal plan request failed"))
    }
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, planner: Arc<MealPlanner>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| PlannerError::Configuration(format!("cannot bind {addr}: {e}")))?;
    info!(%addr, "listening");

    axum::serve(listener, MealPlanRoutes::routes(planner))
        .await
        .map_err(|e| PlannerError::Configuration(format!("server error: {e}")))
}
