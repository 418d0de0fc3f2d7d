// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact relay.
//!
//! Resolved once at process start and handed to the handlers as state.
//! Missing sender/recipient addresses do not prevent startup; each
//! submission fails with a configuration error instead.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resend transactional email endpoint.
pub const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Configuration for the contact relay service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Spam heuristics configuration
    #[serde(default)]
    pub spam: SpamConfig,

    /// Outbound email configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Site identity used in the auto-reply
    #[serde(default)]
    pub site: SiteConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Fixed-window rate limiting, keyed by client address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum accepted requests per window (default: 8)
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in milliseconds (default: 60000)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Interval between expired-bucket sweeps in seconds (default: 60)
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpamConfig {
    /// Submissions filled faster than this are flagged (default: 4000)
    #[serde(default = "default_min_fill_ms")]
    pub min_fill_ms: i64,
}

/// Outbound email configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Sender address, e.g. `Appscend Labs <hello@example.com>`
    #[serde(default)]
    pub from: Option<String>,

    /// Internal recipients of the notification
    #[serde(default)]
    pub to: Vec<String>,

    /// Resend API key; without it emails are only logged
    #[serde(default)]
    pub resend_api_key: Option<String>,

    /// Provider endpoint (default: Resend)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Upper bound on each provider call in milliseconds (default: 10000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,

    #[serde(default)]
    pub url: Option<String>,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_max_requests() -> u32 {
    8
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_cleanup_interval_secs() -> u64 {
    60
}

fn default_min_fill_ms() -> i64 {
    4000
}

fn default_api_url() -> String {
    RESEND_API_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_site_name() -> String {
    "Appscend Labs".to_string()
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            spam: SpamConfig::default(),
            email: EmailConfig::default(),
            site: SiteConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_ms: default_window_ms(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

impl Default for SpamConfig {
    fn default() -> Self {
        Self {
            min_fill_ms: default_min_fill_ms(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from: None,
            to: Vec::new(),
            resend_api_key: None,
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            url: None,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the rate window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    /// Get the sweep interval, never shorter than one second
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }
}

impl EmailConfig {
    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Sender and recipients, if both are configured.
    pub fn routing(&self) -> Option<(&str, &[String])> {
        match self.from.as_deref().map(str::trim) {
            Some(from) if !from.is_empty() && !self.to.is_empty() => Some((from, &self.to)),
            _ => None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let rate_defaults = RateLimitConfig::default();
        let email_defaults = EmailConfig::default();

        Config {
            bind_addr: text("BIND_ADDR").unwrap_or_else(default_bind_addr),
            rate_limit: RateLimitConfig {
                max_requests: parse_var(&lookup, "RATE_LIMIT_MAX").unwrap_or(rate_defaults.max_requests),
                window_ms: parse_var(&lookup, "RATE_LIMIT_WINDOW_MS").unwrap_or(rate_defaults.window_ms),
                cleanup_interval_secs: parse_var(&lookup, "RATE_LIMIT_CLEANUP_SECS")
                    .unwrap_or(rate_defaults.cleanup_interval_secs),
            },
            spam: SpamConfig {
                min_fill_ms: parse_var(&lookup, "MIN_FILL_MS").unwrap_or_else(default_min_fill_ms),
            },
            email: EmailConfig {
                from: text("CONTACT_FROM_EMAIL"),
                to: parse_recipients(lookup("CONTACT_TO_EMAIL").as_deref()),
                resend_api_key: text("RESEND_API_KEY"),
                api_url: text("RESEND_API_URL").unwrap_or(email_defaults.api_url),
                timeout_ms: parse_var(&lookup, "EMAIL_TIMEOUT_MS").unwrap_or(email_defaults.timeout_ms),
            },
            site: SiteConfig {
                name: text("SITE_NAME").unwrap_or_else(default_site_name),
                url: text("SITE_URL"),
            },
            metrics: MetricsConfig {
                enabled: lookup("METRICS_ENABLED")
                    .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"))
                    .unwrap_or_else(default_true),
                ..Default::default()
            },
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

/// Split a comma-separated address list, dropping blank entries.
pub fn parse_recipients(input: Option<&str>) -> Vec<String> {
    input
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
