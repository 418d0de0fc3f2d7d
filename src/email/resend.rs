// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Mailer implementations.
//!
//! - [`ResendMailer`] posts to the Resend HTTP API.
//! - [`LogMailer`] only logs, for running without a provider key.

use super::{DispatchError, Mailer, OutboundEmail};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

/// Resend API response.
#[derive(Debug, Deserialize)]
struct ResendEmailResponse {
    id: String,
}

/// Sends email through the Resend API.
#[derive(Clone)]
pub struct ResendMailer {
    api_key: String,
    api_url: String,
    timeout: Duration,
    http_client: Client,
}

impl ResendMailer {
    /// Create a mailer whose HTTP client gives up after `timeout`.
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DispatchError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        Ok(Self {
            api_key: api_key.into(),
            api_url: api_url.into(),
            timeout,
            http_client,
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), DispatchError> {
        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to send request to Resend API");
                if e.is_timeout() {
                    DispatchError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    DispatchError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Resend API returned an error");
            return Err(DispatchError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        // The id is only used for tracing; a 2xx without one still counts as sent.
        match response.json::<ResendEmailResponse>().await {
            Ok(ResendEmailResponse { id }) => {
                info!(email_id = %id, recipients = email.to.len(), "Email sent via Resend")
            }
            Err(e) => debug!(error = %e, "Resend response carried no email id"),
        }
        Ok(())
    }
}

/// Logs emails instead of sending them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), DispatchError> {
        info!(
            from = %email.from,
            to = ?email.to,
            reply_to = ?email.reply_to,
            subject = %email.subject,
            html_bytes = email.html.len(),
            "Email delivery disabled, logging only"
        );
        Ok(())
    }
}
