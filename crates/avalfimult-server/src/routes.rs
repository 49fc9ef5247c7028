//! HTTP routes and handlers

use avalfimult_core::Error;
use avalfimult_telemetry::RejectionReason;
use axum::{
    extract::{Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::config::{CorsSettings, ResponseMode};
use crate::openapi;
use crate::state::AppState;
use crate::validation::{validate, ScoreQuery};

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/", get(home))
        .route("/doc", get(doc))
        .route("/openapi.json", get(openapi_json))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/avalfimult", get(avalfimult))
        .fallback(fallback)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

async fn home() -> Redirect {
    Redirect::to("/openapi.json")
}

async fn doc(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.config.docs_url)
}

async fn openapi_json() -> Json<serde_json::Value> {
    Json(openapi::document())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Score the four fund indicators into a viability verdict
async fn avalfimult(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<String, AppError> {
    state.metrics.record_request();

    let query = ScoreQuery::from_pairs(&params);
    debug!(?query, "Received scoring request");

    let indicators = validate(&query).map_err(|failure| {
        warn!(missing = ?failure.missing, invalid = ?failure.invalid, "Rejected invalid parameters");
        state.metrics.record_rejection(RejectionReason::Validation);
        Error::from(failure)
    })?;

    if let Err(e) = state.policy_engine.check(&indicators) {
        warn!(patliq = indicators.patliq, "Rejected by business rules: {}", e);
        state.metrics.record_rejection(RejectionReason::Policy);
        return Err(e.into());
    }

    let outcome = state.scorer.score(&indicators).map_err(|e| {
        state.metrics.record_scoring_error();
        e
    })?;
    state.metrics.record_verdict(outcome.verdict, outcome.latency_us);

    Ok(match state.config.response_mode {
        ResponseMode::Verdict => outcome.verdict.to_string(),
        ResponseMode::Label => outcome.verdict.label().to_string(),
    })
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Error returned by handlers, rendered as a plain-text body
#[derive(Debug)]
pub struct AppError(pub Error);

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::PolicyViolation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Error::UnexpectedLabel(label) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Erro: Nenhum resultado foi obtido!!!{label}"),
            ),
            other => {
                error!("Request failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };

        (status, message).into_response()
    }
}
