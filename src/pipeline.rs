// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! The submission pipeline.
//!
//! `rate check → parse → screen → config check → notification → auto-reply`
//!
//! The notification is the business-critical email: if it fails the whole
//! submission fails. The auto-reply is attempted only after a successful
//! notification, and its failure is logged without changing the outcome.

use crate::clock::SharedClock;
use crate::config::Config;
use crate::email::compose::{self, SubmissionMeta};
use crate::email::{DispatchError, Mailer, OutboundEmail};
use crate::error::{AppError, Result};
use crate::limiter::{RateLimitResult, RateLimiter};
use crate::validator::{InquiryPayload, InquiryValidator, Screening};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Successful end states of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Notification sent; auto-reply attempted
    Delivered {
        auto_reply_sent: bool,
        suspected_spam: bool,
    },
    /// Honeypot hit; nothing sent
    Suppressed,
}

pub struct InquiryPipeline {
    limiter: Arc<dyn RateLimiter>,
    validator: InquiryValidator<SharedClock>,
    mailer: Arc<dyn Mailer>,
    config: Config,
}

impl InquiryPipeline {
    pub fn new(
        config: Config,
        limiter: Arc<dyn RateLimiter>,
        mailer: Arc<dyn Mailer>,
        clock: SharedClock,
    ) -> Self {
        Self {
            limiter,
            validator: InquiryValidator::new(config.spam.clone(), clock),
            mailer,
            config,
        }
    }

    pub fn limiter(&self) -> &Arc<dyn RateLimiter> {
        &self.limiter
    }

    /// Run one submission from raw request body to outcome.
    pub async fn submit(
        &self,
        client_key: &str,
        header_user_agent: Option<&str>,
        body: &[u8],
    ) -> Result<Submission> {
        if let RateLimitResult::Limited { retry_after } = self.limiter.check(client_key) {
            info!(
                client = %client_key,
                retry_after_secs = retry_after.as_secs(),
                "Submission rate limited"
            );
            return Err(AppError::RateLimited { retry_after });
        }

        let payload: InquiryPayload =
            serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))?;

        let inquiry = match self.validator.validate(payload, header_user_agent) {
            Ok(Screening::Accepted(inquiry)) => inquiry,
            Ok(Screening::Honeypot) => {
                info!(client = %client_key, "Honeypot filled, suppressing submission");
                return Ok(Submission::Suppressed);
            }
            Err(err) => {
                info!(client = %client_key, error = %err, "Submission failed validation");
                return Err(err.into());
            }
        };

        if inquiry.suspected_spam {
            info!(
                client = %client_key,
                elapsed_ms = inquiry.elapsed_ms,
                "Fast submission, flagging as suspected spam"
            );
        }

        let Some((from, to)) = self.config.email.routing() else {
            error!("CONTACT_FROM_EMAIL or CONTACT_TO_EMAIL is not configured");
            return Err(AppError::Configuration);
        };

        let notification =
            compose::notification(&inquiry, SubmissionMeta { client_key }, from, to);
        if let Err(err) = self.dispatch(&notification).await {
            error!(client = %client_key, error = %err, "Inquiry notification failed");
            return Err(AppError::Dispatch(err));
        }
        info!(
            client = %client_key,
            project_type = %inquiry.project_type,
            suspected_spam = inquiry.suspected_spam,
            "Inquiry notification sent"
        );

        let reply = compose::auto_reply(
            &inquiry,
            from,
            to.first().map(String::as_str),
            &self.config.site.name,
        );
        let auto_reply_sent = match self.dispatch(&reply).await {
            Ok(()) => true,
            Err(err) => {
                warn!(client = %client_key, error = %err, "Auto-reply failed");
                false
            }
        };

        Ok(Submission::Delivered {
            auto_reply_sent,
            suspected_spam: inquiry.suspected_spam,
        })
    }

    /// Send through the mailer, bounded by the configured timeout.
    async fn dispatch(&self, email: &OutboundEmail) -> std::result::Result<(), DispatchError> {
        let timeout = self.config.email.dispatch_timeout();
        tokio::time::timeout(timeout, self.mailer.send(email))
            .await
            .unwrap_or_else(|_| Err(DispatchError::Timeout(duration_ms(timeout))))
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
