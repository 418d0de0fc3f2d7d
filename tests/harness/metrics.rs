// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Metrics collection for submission simulation results.

use axum::http::StatusCode;
use std::collections::HashMap;
use std::fmt;

/// Possible outcomes for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Accepted,
    RateLimited,
    Invalid,
    ServerError,
}

impl Outcome {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::OK => Outcome::Accepted,
            StatusCode::TOO_MANY_REQUESTS => Outcome::RateLimited,
            StatusCode::BAD_REQUEST => Outcome::Invalid,
            _ => Outcome::ServerError,
        }
    }
}

/// Collects outcomes during a simulation.
#[derive(Debug, Default)]
pub struct AttackMetrics {
    outcomes: HashMap<Outcome, usize>,
    accepted_per_client: HashMap<String, usize>,
    emails_sent: usize,
}

impl AttackMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome, client: &str) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        if outcome == Outcome::Accepted {
            *self
                .accepted_per_client
                .entry(client.to_string())
                .or_insert(0) += 1;
        }
    }

    pub fn set_emails_sent(&mut self, count: usize) {
        self.emails_sent = count;
    }

    pub fn report(&self) -> AttackReport {
        let count = |o: Outcome| self.outcomes.get(&o).copied().unwrap_or(0);
        let total: usize = self.outcomes.values().sum();
        let rate_limited = count(Outcome::RateLimited);

        AttackReport {
            total_requests: total,
            accepted: count(Outcome::Accepted),
            rate_limited,
            invalid: count(Outcome::Invalid),
            server_errors: count(Outcome::ServerError),
            unique_clients: self.accepted_per_client.len(),
            max_accepted_per_client: self.accepted_per_client.values().copied().max().unwrap_or(0),
            emails_sent: self.emails_sent,
            block_rate: if total == 0 {
                0.0
            } else {
                rate_limited as f64 / total as f64
            },
        }
    }
}

/// Summary of a simulation run.
#[derive(Debug, Clone)]
pub struct AttackReport {
    pub total_requests: usize,
    pub accepted: usize,
    pub rate_limited: usize,
    pub invalid: usize,
    pub server_errors: usize,
    pub unique_clients: usize,
    pub max_accepted_per_client: usize,
    pub emails_sent: usize,
    pub block_rate: f64,
}

impl fmt::Display for AttackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Submission Simulation Report ===")?;
        writeln!(f, "Total requests:          {}", self.total_requests)?;
        writeln!(f, "Accepted:                {}", self.accepted)?;
        writeln!(f, "Rate limited:            {}", self.rate_limited)?;
        writeln!(f, "Invalid:                 {}", self.invalid)?;
        writeln!(f, "Server errors:           {}", self.server_errors)?;
        writeln!(f, "Clients with acceptance: {}", self.unique_clients)?;
        writeln!(f, "Max accepted per client: {}", self.max_accepted_per_client)?;
        writeln!(f, "Emails sent:             {}", self.emails_sent)?;
        write!(f, "Block rate:              {:.1}%", self.block_rate * 100.0)
    }
}
