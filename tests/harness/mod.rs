// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for the contact relay.
//!
//! Builds the real router around a recording mailer and a manual clock,
//! and provides abuse simulation helpers.

#![allow(dead_code)]

pub mod attacks;
pub mod generators;
pub mod mailer;
pub mod metrics;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use contact_relay::{
    clock::{MockClock, SharedClock},
    config::{Config, EmailConfig},
    handlers::{router, AppState, CONTACT_PATH},
    limiter::FixedWindowLimiter,
    metrics::Metrics,
    pipeline::InquiryPipeline,
};
use mailer::RecordingMailer;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Fixed start time for every simulated clock.
pub const START_MS: i64 = 1_700_000_000_000;

/// A router wired to test doubles.
pub struct TestApp {
    pub router: Router,
    pub mailer: Arc<RecordingMailer>,
    pub clock: MockClock,
    pub state: Arc<AppState>,
}

/// Configuration with a sender and two internal recipients.
pub fn configured() -> Config {
    Config {
        email: EmailConfig {
            from: Some("Appscend Labs <hello@studio.test>".into()),
            to: vec!["inbox@studio.test".into(), "sales@studio.test".into()],
            timeout_ms: 200,
            ..Default::default()
        },
        ..Default::default()
    }
}

impl TestApp {
    pub fn new(config: Config) -> Self {
        Self::with_mailer(config, RecordingMailer::default())
    }

    pub fn with_mailer(config: Config, mailer: RecordingMailer) -> Self {
        let mailer = Arc::new(mailer);
        let clock = MockClock::new(START_MS);
        let shared: SharedClock = Arc::new(clock.clone());
        let limiter = Arc::new(FixedWindowLimiter::new(config.rate_limit.clone(), shared.clone()));

        let state = Arc::new(AppState {
            pipeline: InquiryPipeline::new(config.clone(), limiter, mailer.clone(), shared),
            metrics: Metrics::new().expect("metrics registry"),
            config,
        });

        Self {
            router: router(state.clone()),
            mailer,
            clock,
            state,
        }
    }

    /// POST a JSON body to the contact endpoint from `client`.
    pub async fn submit(&self, client: &str, body: &Value) -> (StatusCode, Value) {
        self.submit_raw(client, body.to_string()).await
    }

    pub async fn submit_raw(&self, client: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(CONTACT_PATH)
            .header("content-type", "application/json")
            .header("x-forwarded-for", client)
            .header("user-agent", "harness/1.0")
            .body(Body::from(body))
            .expect("request");
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// GET a path and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("request");
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }
}
