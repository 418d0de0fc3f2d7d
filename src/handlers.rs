// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact relay service.

use crate::client::{header_user_agent, resolve_client_key};
use crate::config::Config;
use crate::error::{AppError, SubmitResponse};
use crate::metrics::{Metrics, Outcome};
use crate::pipeline::{InquiryPipeline, Submission};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error, warn};

/// Path the contact form posts to.
pub const CONTACT_PATH: &str = "/api/contact";

/// Shared application state.
pub struct AppState {
    pub pipeline: InquiryPipeline,
    pub metrics: Metrics,
    pub config: Config,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub email_configured: bool,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route(CONTACT_PATH, post(submit));

    if state.config.metrics.enabled {
        router = router.route(&state.config.metrics.path, get(metrics));
    }

    let router = match cors_layer(&state.config) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "contact-relay",
        version: env!("CARGO_PKG_VERSION"),
        email_configured: state.config.email.routing().is_some(),
    })
}

/// Accept a contact form submission.
///
/// The body is taken raw so the rate limit is applied before any parsing.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let client_key = resolve_client_key(&headers);
    let user_agent = header_user_agent(&headers);

    debug!(client = %client_key, bytes = body.len(), "Processing contact submission");

    let result = state
        .pipeline
        .submit(&client_key, user_agent.as_deref(), &body)
        .await;

    record_outcome(&state.metrics, &result);

    match result {
        Ok(_) => (StatusCode::OK, Json(SubmitResponse::ok())).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Prometheus exposition endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    state
        .metrics
        .set_tracked_clients(state.pipeline.limiter().tracked_keys());

    match state.metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => AppError::Internal(format!("metrics encoding failed: {}", e)).into_response(),
    }
}

fn record_outcome(metrics: &Metrics, result: &crate::error::Result<Submission>) {
    let outcome = match result {
        Ok(Submission::Delivered {
            auto_reply_sent,
            suspected_spam,
        }) => {
            if !auto_reply_sent {
                metrics.record_auto_reply_failure();
            }
            if *suspected_spam {
                metrics.record_suspected_spam();
            }
            Outcome::Delivered
        }
        Ok(Submission::Suppressed) => Outcome::HoneypotSuppressed,
        Err(AppError::RateLimited { .. }) => Outcome::RateLimited,
        Err(AppError::BadRequest(_) | AppError::Validation(_)) => Outcome::Invalid,
        Err(AppError::Configuration) => Outcome::ConfigMissing,
        Err(AppError::Dispatch(_)) => Outcome::DispatchFailed,
        Err(AppError::Internal(_)) => Outcome::Error,
    };
    metrics.record(outcome);
}

/// Allow the marketing site to post cross-origin when its URL is configured.
fn cors_layer(config: &Config) -> Option<CorsLayer> {
    let url = config.site.url.as_deref()?.trim_end_matches('/');
    match HeaderValue::from_str(url) {
        Ok(origin) => Some(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        ),
        Err(_) => {
            warn!(site_url = %url, "SITE_URL is not a valid origin, CORS disabled");
            None
        }
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SubmitResponse::error("Server error")),
    )
        .into_response()
}
