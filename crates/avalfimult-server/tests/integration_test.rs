//! Integration tests for the AvalFIMult HTTP routes

use avalfimult_core::{FeatureVector, Label, Result};
use avalfimult_model::{Classifier, LoadedArtifacts, ScoringProcedure, StandardScaler};
use avalfimult_policy::PolicyEngine;
use avalfimult_server::config::CorsSettings;
use avalfimult_server::{create_router, AppState, ResponseMode, ServerConfig};
use avalfimult_telemetry::MetricsCollector;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// Predicts "Viable" when normalized redemptions are at or below zero, counting calls
struct CountingClassifier {
    calls: AtomicU32,
    fixed: Option<f64>,
}

impl CountingClassifier {
    fn new() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fixed: None,
        }
    }

    fn always(label: f64) -> Self {
        Self {
            calls: AtomicU32::new(0),
            fixed: Some(label),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Classifier for CountingClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Label> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some(label) = self.fixed {
            return Ok(Label(label));
        }
        Ok(Label(if features.0[0] <= 0.0 { 1.0 } else { 0.0 }))
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn app_with(classifier: Arc<CountingClassifier>, mode: ResponseMode) -> (Router, AppState) {
    let config = ServerConfig {
        response_mode: mode,
        ..Default::default()
    };
    app_with_config(classifier, config, None)
}

fn app_with_config(
    classifier: Arc<CountingClassifier>,
    config: ServerConfig,
    metrics_handle: Option<PrometheusHandle>,
) -> (Router, AppState) {
    let scaler = StandardScaler::new(&[500.0, 0.0, 0.0, 0.0], &[100.0, 1.0, 1.0, 1.0]).unwrap();
    let scorer = ScoringProcedure::new(LoadedArtifacts::new(Arc::new(scaler), classifier));
    let state = AppState::from_parts(config, scorer, PolicyEngine::with_defaults(), metrics_handle);
    (create_router(state.clone()), state)
}

async fn origin_header(app: Router, origin: &str) -> Option<String> {
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, origin)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|v| v.to_str().unwrap().to_string())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = app_with(Arc::new(CountingClassifier::new()), ResponseMode::Verdict);
    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_viable_verdict() {
    let classifier = Arc::new(CountingClassifier::new());
    let (app, state) = app_with(classifier.clone(), ResponseMode::Verdict);

    let (status, body) = get(
        app,
        "/avalfimult?resgate=100&capta=200&patliq=2000000&pattotal=5000000",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Viable");
    assert_eq!(classifier.calls(), 1);
    assert_eq!(state.metrics.snapshot().viable, 1);
}

#[tokio::test]
async fn test_not_viable_verdict() {
    let (app, _) = app_with(Arc::new(CountingClassifier::new()), ResponseMode::Verdict);
    let (status, body) = get(
        app,
        "/avalfimult?resgate=900&capta=200&patliq=2000000&pattotal=5000000",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Not Viable");
}

#[tokio::test]
async fn test_label_mode_returns_raw_label() {
    let (app, _) = app_with(Arc::new(CountingClassifier::new()), ResponseMode::Label);
    let (status, body) = get(
        app.clone(),
        "/avalfimult?resgate=100&capta=200&patliq=2000000&pattotal=5000000",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1");

    let (_, body) = get(
        app,
        "/avalfimult?resgate=900&capta=200&patliq=2000000&pattotal=5000000",
    )
    .await;
    assert_eq!(body, "0");
}

#[tokio::test]
async fn test_label_mode_normalizes_negative_zero() {
    let (app, _) = app_with(Arc::new(CountingClassifier::always(-0.0)), ResponseMode::Label);
    let (status, body) = get(
        app,
        "/avalfimult?resgate=100&capta=200&patliq=2000000&pattotal=5000000",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "0");
}

#[tokio::test]
async fn test_non_numeric_parameter_is_bad_request() {
    let classifier = Arc::new(CountingClassifier::new());
    let (app, state) = app_with(classifier.clone(), ResponseMode::Verdict);

    let (status, body) = get(
        app,
        "/avalfimult?resgate=abc&capta=200&patliq=2000000&pattotal=5000000",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Não numéricos: resgate."));
    assert_eq!(classifier.calls(), 0);
    assert_eq!(state.metrics.snapshot().validation_rejections, 1);
}

#[tokio::test]
async fn test_missing_parameter_is_bad_request() {
    let classifier = Arc::new(CountingClassifier::new());
    let (app, _) = app_with(classifier.clone(), ResponseMode::Verdict);

    let (status, body) = get(app, "/avalfimult?resgate=100&capta=200&patliq=2000000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Ausentes: pattotal."));
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn test_no_query_string() {
    let (app, _) = app_with(Arc::new(CountingClassifier::new()), ResponseMode::Verdict);
    let (status, body) = get(app, "/avalfimult").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("resgate, capta, patliq, pattotal"));
}

#[tokio::test]
async fn test_net_equity_below_floor_is_rejected() {
    let classifier = Arc::new(CountingClassifier::new());
    let (app, state) = app_with(classifier.clone(), ResponseMode::Verdict);

    let (status, body) = get(
        app,
        "/avalfimult?resgate=100&capta=200&patliq=999999&pattotal=5000000",
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, "Erro: patliq deve ser >= 1M !!!");
    assert_eq!(classifier.calls(), 0);
    assert_eq!(state.metrics.snapshot().policy_rejections, 1);
}

#[tokio::test]
async fn test_net_equity_floor_is_inclusive() {
    let classifier = Arc::new(CountingClassifier::new());
    let (app, _) = app_with(classifier.clone(), ResponseMode::Verdict);

    let (status, _) = get(
        app,
        "/avalfimult?resgate=100&capta=200&patliq=1000000&pattotal=5000000",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(classifier.calls(), 1);
}

#[tokio::test]
async fn test_unexpected_label_is_server_error() {
    let (app, state) = app_with(Arc::new(CountingClassifier::always(3.0)), ResponseMode::Verdict);

    let (status, body) = get(
        app,
        "/avalfimult?resgate=100&capta=200&patliq=2000000&pattotal=5000000",
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Erro: Nenhum resultado foi obtido!!!3");
    assert_eq!(state.metrics.snapshot().scoring_errors, 1);
}

#[tokio::test]
async fn test_identical_requests_yield_identical_verdicts() {
    let (app, _) = app_with(Arc::new(CountingClassifier::new()), ResponseMode::Verdict);
    let uri = "/avalfimult?resgate=450.5&capta=.5&patliq=3000000.&pattotal=7000000";

    let (_, first) = get(app.clone(), uri).await;
    let (_, second) = get(app, uri).await;
    assert_eq!(first, second);
    assert_eq!(first, "Viable");
}

#[tokio::test]
async fn test_documentation_redirects() {
    let (app, state) = app_with(Arc::new(CountingClassifier::new()), ResponseMode::Verdict);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/openapi.json");

    let response = app
        .oneshot(Request::builder().uri("/doc").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        state.config.docs_url.as_str()
    );
}

#[tokio::test]
async fn test_openapi_document() {
    let (app, _) = app_with(Arc::new(CountingClassifier::new()), ResponseMode::Verdict);
    let (status, body) = get(app, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);

    let doc: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(doc["paths"]["/avalfimult"]["get"].is_object());
}

#[tokio::test]
async fn test_unknown_route() {
    let (app, _) = app_with(Arc::new(CountingClassifier::new()), ResponseMode::Verdict);
    let (status, body) = get(app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not found");
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let (app, _) = app_with(Arc::new(CountingClassifier::new()), ResponseMode::Verdict);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_cors_configured_origins() {
    let config = ServerConfig {
        cors: CorsSettings {
            allowed_origins: vec!["http://a.example".to_string()],
        },
        ..Default::default()
    };
    let (app, _) = app_with_config(Arc::new(CountingClassifier::new()), config, None);

    assert_eq!(
        origin_header(app.clone(), "http://a.example").await.as_deref(),
        Some("http://a.example")
    );
    assert_eq!(origin_header(app, "http://b.example").await, None);
}

#[tokio::test]
async fn test_cors_invalid_origin_is_skipped() {
    let config = ServerConfig {
        cors: CorsSettings {
            allowed_origins: vec!["bad\norigin".to_string(), "http://a.example".to_string()],
        },
        ..Default::default()
    };
    let (app, _) = app_with_config(Arc::new(CountingClassifier::new()), config, None);

    assert_eq!(
        origin_header(app.clone(), "http://a.example").await.as_deref(),
        Some("http://a.example")
    );
    assert_eq!(origin_header(app, "http://b.example").await, None);
}

#[tokio::test]
async fn test_metrics_without_recorder_is_empty() {
    let (app, _) = app_with(Arc::new(CountingClassifier::new()), ResponseMode::Verdict);
    let (status, body) = get(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_metrics_renders_prometheus_text() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    metrics::with_local_recorder(&recorder, || MetricsCollector::new().record_request());

    let (app, _) = app_with_config(
        Arc::new(CountingClassifier::new()),
        ServerConfig::default(),
        Some(handle),
    );
    let (status, body) = get(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("avalfimult_requests_total 1"));
}
