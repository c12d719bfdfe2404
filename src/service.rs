//! HTTP boundary: `POST /route-plans`.
//!
//! `router` builds an axum `Router` that hosts can serve directly or nest
//! under their own routes. Planning does blocking I/O (geocoding) and uses
//! rayon, so it runs on the blocking pool rather than the async workers.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::config::PlanOptions;
use crate::jobs::JobRecord;
use crate::planner::{PlanningError, PlanningOutcome, plan_route_with};
use crate::traits::StopResolver;
use crate::types::{PlanningWarning, RoutePlan};

pub const ROUTE_PLANS_PATH: &str = "/route-plans";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlanRequest {
    pub jobs: Vec<JobRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanResponse {
    #[serde(flatten)]
    pub plan: RoutePlan,
    pub warnings: Vec<PlanningWarning>,
}

impl From<PlanningOutcome> for RoutePlanResponse {
    fn from(outcome: PlanningOutcome) -> Self {
        Self {
            plan: outcome.plan,
            warnings: outcome.warnings,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_kind: String,
    pub message: String,
}

impl ErrorBody {
    fn new(error_kind: &str, message: impl Into<String>) -> Self {
        Self {
            error_kind: error_kind.to_string(),
            message: message.into(),
        }
    }
}

impl From<&PlanningError> for ErrorBody {
    fn from(err: &PlanningError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

struct RoutePlanState<R> {
    resolver: R,
    options: PlanOptions,
}

/// Router exposing `POST /route-plans`, planning with `resolver` and `options`.
pub fn router<R>(resolver: R, options: PlanOptions) -> Router
where
    R: StopResolver + Send + 'static,
{
    let state = Arc::new(RoutePlanState { resolver, options });
    Router::new()
        .route(ROUTE_PLANS_PATH, post(create_route_plan::<R>))
        .with_state(state)
}

/// 200 with the plan, 400 for a body that is not a route-plan request,
/// 422 when planning fails.
async fn create_route_plan<R>(
    State(state): State<Arc<RoutePlanState<R>>>,
    payload: Result<Json<RoutePlanRequest>, JsonRejection>,
) -> Response
where
    R: StopResolver + Send + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "rejecting malformed route-plan request");
            let body = ErrorBody::new("InvalidRequest", rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    let planned =
        tokio::task::spawn_blocking(move || plan_route_with(&request.jobs, &state.resolver, &state.options)).await;

    match planned {
        Ok(Ok(outcome)) => (StatusCode::OK, Json(RoutePlanResponse::from(outcome))).into_response(),
        Ok(Err(err)) => {
            tracing::info!(error_kind = err.kind(), "route plan rejected");
            (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorBody::from(&err))).into_response()
        }
        Err(join_error) => {
            tracing::error!(error = %join_error, "route planning task failed");
            let body = ErrorBody::new("Internal", "route planning failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

/// The banner text shown above a partial route, if any stop was skipped.
pub fn skipped_stops_notice(warnings: &[PlanningWarning]) -> Option<String> {
    match warnings.len() {
        0 => None,
        1 => Some("1 stop skipped — no location on file".to_string()),
        n => Some(format!("{n} stops skipped — no location on file")),
    }
}
