// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Relay
//!
//! This crate relays a website's project inquiry form to the studio inbox
//! through a transactional email provider:
//!
//! - Per-client fixed-window rate limiting (8 requests per minute default)
//! - Required-field validation
//! - Honeypot suppression (silent success, no mail)
//! - Fill-time spam annotation (advisory only)
//! - Internal notification, then a best-effort auto-reply

pub mod client;
pub mod clock;
pub mod config;
pub mod email;
pub mod error;
pub mod handlers;
pub mod limiter;
pub mod metrics;
pub mod pipeline;
pub mod validator;

pub use config::Config;
pub use error::{AppError, SubmitResponse};
pub use limiter::{FixedWindowLimiter, RateLimitResult, RateLimiter};
pub use pipeline::{InquiryPipeline, Submission};
pub use validator::{InquiryValidator, Screening, ValidationError};
