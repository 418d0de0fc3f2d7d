// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Inquiry validation and spam screening.
//!
//! Two heuristics with different weight:
//! - Honeypot: a hidden field humans never fill. A hit is treated as a bot
//!   and the submission is dropped while the client is told it succeeded.
//! - Fill time: forms submitted within `min_fill_ms` of rendering (or with
//!   no render timestamp) are flagged for the human reading the inbox, but
//!   still delivered.

use crate::client::resolve_user_agent;
use crate::clock::Clock;
use crate::config::SpamConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Inquiry as posted by the contact form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// When the form was rendered, epoch milliseconds
    #[serde(default)]
    pub started_at: Option<f64>,
    /// Honeypot
    #[serde(default)]
    pub hp: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// An inquiry that passed validation, with its spam annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInquiry {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub project_type: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub message: String,
    pub user_agent: String,
    /// Time between form render and submit; 0 when unknown
    pub elapsed_ms: i64,
    pub suspected_spam: bool,
}

/// Outcome of screening a well-formed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening {
    /// Deliver the inquiry
    Accepted(ValidatedInquiry),
    /// Honeypot was filled; report success, send nothing
    Honeypot,
}

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Validates inquiries and applies the spam heuristics.
pub struct InquiryValidator<C: Clock> {
    config: SpamConfig,
    clock: C,
}

impl<C: Clock> InquiryValidator<C> {
    pub fn new(config: SpamConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// Screen a submission.
    ///
    /// The honeypot is checked before anything else, so a bot gets the same
    /// silent success whether or not it also filled the real fields.
    pub fn validate(
        &self,
        payload: InquiryPayload,
        header_user_agent: Option<&str>,
    ) -> Result<Screening, ValidationError> {
        if is_filled(payload.hp.as_deref()) {
            debug!("Honeypot field filled");
            return Ok(Screening::Honeypot);
        }

        let mut missing = Vec::new();
        let name = required(payload.name, "name", &mut missing);
        let email = required(payload.email, "email", &mut missing);
        let project_type = required(payload.project_type, "projectType", &mut missing);
        let message = required(payload.message, "message", &mut missing);

        let (Some(name), Some(email), Some(project_type), Some(message)) =
            (name, email, project_type, message)
        else {
            debug!(missing = ?missing, "Inquiry missing required fields");
            return Err(ValidationError::MissingFields(missing));
        };

        let (elapsed_ms, suspected_spam) = self.fill_time(payload.started_at);

        let user_agent = resolve_user_agent(payload.user_agent.as_deref(), header_user_agent);

        Ok(Screening::Accepted(ValidatedInquiry {
            name,
            email,
            company: optional(payload.company),
            phone: optional(payload.phone),
            project_type,
            budget: optional(payload.budget),
            timeline: optional(payload.timeline),
            message,
            user_agent,
            elapsed_ms,
            suspected_spam,
        }))
    }

    /// Elapsed fill time and whether it looks automated.
    fn fill_time(&self, started_at: Option<f64>) -> (i64, bool) {
        let started_at = started_at
            .filter(|v| v.is_finite() && *v != 0.0)
            .map(|v| v as i64);

        match started_at {
            Some(started_at) => {
                let elapsed = self.clock.now_ms().saturating_sub(started_at);
                (elapsed, elapsed < self.config.min_fill_ms)
            }
            None => (0, true),
        }
    }
}

fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    let value = optional(value);
    if value.is_none() {
        missing.push(field);
    }
    value
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
