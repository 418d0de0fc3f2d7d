// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Relay Service
//!
//! Receives the website's project inquiry form on `POST /api/contact`,
//! screens it, and relays it to the studio inbox.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables (and `.env`):
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `CONTACT_FROM_EMAIL`: Sender address for both emails
//! - `CONTACT_TO_EMAIL`: Comma-separated internal recipients
//! - `RESEND_API_KEY`: Provider key; without it emails are only logged
//! - `RATE_LIMIT_MAX` / `RATE_LIMIT_WINDOW_MS`: Per-client quota (default: 8 per 60000ms)
//! - `MIN_FILL_MS`: Fill time below which a submission is flagged (default: 4000)
//! - `SITE_NAME` / `SITE_URL`: Auto-reply signature and allowed CORS origin

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contact_relay::{
    clock::{SharedClock, SystemClock},
    config::Config,
    email::{LogMailer, Mailer, ResendMailer},
    handlers::{router, AppState},
    limiter::{FixedWindowLimiter, RateLimiter},
    metrics::Metrics,
    pipeline::InquiryPipeline,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        max_requests = config.rate_limit.max_requests,
        window_ms = config.rate_limit.window_ms,
        min_fill_ms = config.spam.min_fill_ms,
        recipients = config.email.to.len(),
        "Starting contact relay"
    );
    if config.email.routing().is_none() {
        warn!("CONTACT_FROM_EMAIL/CONTACT_TO_EMAIL not set; submissions will fail until configured");
    }

    let mailer: Arc<dyn Mailer> = match config.email.resend_api_key.as_deref() {
        Some(key) => Arc::new(ResendMailer::new(
            key,
            config.email.api_url.as_str(),
            config.email.dispatch_timeout(),
        )?),
        None => {
            warn!("RESEND_API_KEY not set, emails will be logged instead of sent");
            Arc::new(LogMailer)
        }
    };

    let clock: SharedClock = Arc::new(SystemClock);
    let limiter: Arc<dyn RateLimiter> = Arc::new(FixedWindowLimiter::new(
        config.rate_limit.clone(),
        clock.clone(),
    ));

    let state = Arc::new(AppState {
        pipeline: InquiryPipeline::new(config.clone(), limiter.clone(), mailer, clock),
        metrics: Metrics::new()?,
        config: config.clone(),
    });

    // Spawn cleanup task
    let cleanup_interval = config.rate_limit.cleanup_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            let evicted = limiter.evict_expired();
            if evicted > 0 {
                tracing::debug!(evicted, remaining = limiter.tracked_keys(), "Evicted expired rate buckets");
            }
        }
    });

    let app = router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
