mod geocode;
mod places;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};
use crate::upstream::{UpstreamClient, UpstreamError};

#[derive(Debug, Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

/// Error body returned by every proxy route: `{ error, details?, error_message? }`.
#[derive(Debug, Serialize)]
pub struct ProxyErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ProxyErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            error_message: None,
        }
    }
}

#[derive(Debug)]
pub struct ProxyError {
    status: StatusCode,
    body: ProxyErrorBody,
}

impl ProxyError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ProxyErrorBody::new(message),
        }
    }

    /// 500 carrying the upstream failure in `details`.
    pub fn upstream(message: impl Into<String>, error: &UpstreamError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ProxyErrorBody {
                details: Some(error.to_string()),
                ..ProxyErrorBody::new(message)
            },
        }
    }

    /// 500 with only a message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ProxyErrorBody::new(message),
        }
    }

    pub fn not_found(body: ProxyErrorBody) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

/// Logs an upstream failure against the request and builds the 500 body.
pub(super) fn map_upstream_error(
    req_id: &RequestId,
    message: &'static str,
    error: &UpstreamError,
) -> ProxyError {
    tracing::error!(request_id = %req_id.0, error = %error, "{message}");
    ProxyError::upstream(message, error)
}

/// Treats absent and whitespace-only query values alike.
pub(super) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn proxied_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/places/nearby", get(places::nearby))
        .route("/api/places/search", get(places::search))
        .route("/api/places/details/{place_id}", get(places::details))
        .route("/api/places/reviews/{place_id}", get(places::reviews))
        .route("/api/places/autocomplete", get(places::autocomplete))
        .route("/api/places/photo", get(places::photo))
        .route("/api/geocode", get(geocode::geocode))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

/// Assembles the proxy router.
///
/// `/api/health` is never rate limited. When `static_dir` is given, unknown
/// paths are served from it, falling back to its `index.html`.
pub fn build_app(state: AppState, rate_limit: RateLimitState, static_dir: Option<&Path>) -> Router {
    let public_routes = Router::new().route("/api/health", get(health));

    let mut app = Router::new()
        .merge(public_routes)
        .merge(proxied_router(rate_limit));

    if let Some(dir) = static_dir {
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        app = app.fallback_service(spa);
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(build_cors())
            .layer(axum::middleware::from_fn(request_id)),
    )
    .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData {
        status: "OK",
        timestamp: Utc::now(),
    })
}

pub fn rate_limit_state_from_config(config: &scrolleats_core::AppConfig) -> RateLimitState {
    RateLimitState::new(
        config.rate_limit_max_requests,
        Duration::from_secs(config.rate_limit_window_secs),
    )
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
