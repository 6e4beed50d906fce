use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::handlers::AnalyzeHandler;
use crate::models::{AnalyzeRequest, HealthResponse, ValidationError};

const INDEX_HTML: &str = include_str!("../static/index.html");
const MANIFEST: &str = include_str!("../static/manifest.webmanifest");
const ICON_SVG: &str = include_str!("../static/icon.svg");

pub struct AppState {
    pub analyze_handler: Arc<AnalyzeHandler>,
    pub config: Arc<Config>,
}

pub fn create_router(analyze_handler: Arc<AnalyzeHandler>, config: Arc<Config>) -> Router {
    let cors = setup_cors(&config);
    let state = Arc::new(AppState {
        analyze_handler,
        config,
    });

    Router::new()
        .route("/", get(index_page))
        .route("/manifest.webmanifest", get(manifest))
        .route("/icon.svg", get(icon))
        .route("/api/health", get(health_check))
        .route("/api/coach/analyze", post(analyze_meal))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}

/// `CORS_ALLOWED_ORIGINS` is a comma separated list; empty or `*` allows any origin.
fn setup_cors(config: &Config) -> CorsLayer {
    let raw = config.cors_allowed_origins.trim();
    let origins: Vec<HeaderValue> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty() && *origin != "*")
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let allow_origin = if raw.is_empty() || raw == "*" || origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": self.0 }))).into_response()
    }
}

async fn analyze_meal(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            log::debug!("❌ Rejected non-JSON analyze body: {}", e);
            return ValidationError(ValidationError::INVALID_BODY.to_string()).into_response();
        }
    };

    let request = match AnalyzeRequest::from_json(&payload) {
        Ok(request) => request,
        Err(e) => {
            log::info!("⚠️ Invalid analyze request: {}", e);
            return e.into_response();
        }
    };

    let response = state.analyze_handler.analyze(&request).await;
    (StatusCode::OK, Json(response)).into_response()
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        providers: state.config.provider_status(),
    })
}

async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn manifest() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/manifest+json")], MANIFEST)
}

async fn icon() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], ICON_SVG)
}
