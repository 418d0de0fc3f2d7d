// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Abuse patterns for security testing.

use std::time::Duration;

/// Simulation configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of submissions to send
    pub total_requests: usize,
    /// Number of unique client addresses to rotate through
    pub unique_clients: usize,
    /// Simulated time between submissions
    pub interval: Duration,
    /// Fill the honeypot field
    pub honeypot: bool,
    /// Time between form render and submit
    pub fill_time_ms: i64,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 50,
            unique_clients: 1,
            interval: Duration::from_millis(100),
            honeypot: false,
            fill_time_ms: 10_000,
        }
    }
}

/// Predefined abuse patterns.
impl AttackConfig {
    /// One address hammering the form.
    pub fn single_client_flood() -> Self {
        Self {
            total_requests: 100,
            interval: Duration::from_millis(10),
            ..Default::default()
        }
    }

    /// Many addresses, a few submissions each.
    pub fn distributed_flood() -> Self {
        Self {
            total_requests: 300,
            unique_clients: 100,
            interval: Duration::from_millis(10),
            ..Default::default()
        }
    }

    /// Form-filling bots that populate every input, including the honeypot.
    pub fn honeypot_bots() -> Self {
        Self {
            total_requests: 40,
            unique_clients: 10,
            honeypot: true,
            fill_time_ms: 50,
            ..Default::default()
        }
    }

    /// Scripted submissions that skip rendering delay but avoid the honeypot.
    pub fn fast_submitters() -> Self {
        Self {
            total_requests: 5,
            fill_time_ms: 300,
            ..Default::default()
        }
    }

    /// A patient client staying under the quota.
    pub fn slow_drip() -> Self {
        Self {
            total_requests: 30,
            interval: Duration::from_secs(10),
            ..Default::default()
        }
    }
}
