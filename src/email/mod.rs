// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outbound email.
//!
//! Composition is pure and lives in [`compose`]; delivery goes through the
//! [`Mailer`] trait so the provider can be swapped or faked.

pub mod compose;
pub mod resend;

pub use resend::{LogMailer, ResendMailer};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// A fully composed email, ready for a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Email delivery failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Email transport error: {0}")]
    Transport(String),

    #[error("Email provider error: {status} - {body}")]
    Provider { status: u16, body: String },

    #[error("Email provider did not respond within {0}ms")]
    Timeout(u64),
}

/// Delivers composed emails.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), DispatchError>;
}
