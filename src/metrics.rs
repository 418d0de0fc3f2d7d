// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus counters for submission outcomes.

use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Terminal outcome of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Delivered,
    HoneypotSuppressed,
    RateLimited,
    Invalid,
    ConfigMissing,
    DispatchFailed,
    Error,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::HoneypotSuppressed => "honeypot",
            Self::RateLimited => "rate_limited",
            Self::Invalid => "invalid",
            Self::ConfigMissing => "config_missing",
            Self::DispatchFailed => "dispatch_failed",
            Self::Error => "error",
        }
    }
}

pub struct Metrics {
    registry: Registry,
    submissions: IntCounterVec,
    suspected_spam: IntCounter,
    auto_reply_failures: IntCounter,
    tracked_clients: IntGauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let submissions = IntCounterVec::new(
            Opts::new("contact_submissions_total", "Contact form submissions by outcome"),
            &["outcome"],
        )?;
        let suspected_spam = IntCounter::new(
            "contact_suspected_spam_total",
            "Delivered submissions flagged by the fill-time heuristic",
        )?;
        let auto_reply_failures = IntCounter::new(
            "contact_auto_reply_failures_total",
            "Auto-replies that could not be sent",
        )?;
        let tracked_clients = IntGauge::new(
            "contact_rate_limit_tracked_clients",
            "Client addresses currently held by the rate limiter",
        )?;

        registry.register(Box::new(submissions.clone()))?;
        registry.register(Box::new(suspected_spam.clone()))?;
        registry.register(Box::new(auto_reply_failures.clone()))?;
        registry.register(Box::new(tracked_clients.clone()))?;

        Ok(Self {
            registry,
            submissions,
            suspected_spam,
            auto_reply_failures,
            tracked_clients,
        })
    }

    pub fn record(&self, outcome: Outcome) {
        self.submissions.with_label_values(&[outcome.as_str()]).inc();
    }

    pub fn record_suspected_spam(&self) {
        self.suspected_spam.inc();
    }

    pub fn record_auto_reply_failure(&self) {
        self.auto_reply_failures.inc();
    }

    pub fn set_tracked_clients(&self, count: usize) {
        self.tracked_clients.set(count as i64);
    }

    pub fn submissions(&self, outcome: Outcome) -> u64 {
        self.submissions.with_label_values(&[outcome.as_str()]).get()
    }

    /// Render all metrics in the Prometheus text format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
