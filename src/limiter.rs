// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiter for contact form submissions.
//!
//! Each client address gets a bucket that counts requests from the first
//! request of its window. Once the window has passed, the next request
//! starts a fresh window with a count of one.
//!
//! State is local to one process. Buckets are removed by
//! [`RateLimiter::evict_expired`], which the server runs periodically.

use crate::clock::Clock;
use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Request is allowed
    Allowed {
        /// Remaining requests in current window
        remaining: u32,
        /// Time until window resets
        reset_in: Duration,
    },
    /// Request is rate limited
    Limited {
        /// Time until the window resets
        retry_after: Duration,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }
}

/// Per-client admission control.
///
/// Implementations must make `check` atomic per key: two concurrent checks
/// for the same key must never both observe the same count.
pub trait RateLimiter: Send + Sync {
    /// Record a request from `key` and decide whether it is admitted.
    fn check(&self, key: &str) -> RateLimitResult;

    /// Drop state for keys whose window has ended. Returns the number removed.
    fn evict_expired(&self) -> usize;

    /// Number of keys currently tracked.
    fn tracked_keys(&self) -> usize;
}

/// Request counter for one client address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBucket {
    /// Requests seen in the current window
    pub count: u32,
    /// Epoch milliseconds at which the window ends
    pub reset_at: i64,
}

/// In-memory fixed-window limiter guarded by a mutex.
pub struct FixedWindowLimiter<C: Clock> {
    config: RateLimitConfig,
    clock: C,
    buckets: Mutex<HashMap<String, RateBucket>>,
}

impl<C: Clock> FixedWindowLimiter<C> {
    pub fn new(config: RateLimitConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Current bucket for `key`, if any.
    pub fn bucket(&self, key: &str) -> Option<RateBucket> {
        self.lock().get(key).copied()
    }

    // A panic while holding the lock cannot leave a bucket half-updated,
    // so a poisoned map is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, RateBucket>> {
        self.buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn window_ms(&self) -> i64 {
        i64::try_from(self.config.window_duration().as_millis()).unwrap_or(i64::MAX)
    }
}

impl<C: Clock> RateLimiter for FixedWindowLimiter<C> {
    fn check(&self, key: &str) -> RateLimitResult {
        let now = self.clock.now_ms();
        let max = self.config.max_requests;
        let window_ms = self.window_ms();
        let mut buckets = self.lock();

        let bucket = buckets
            .entry(key.to_string())
            .or_insert_with(|| RateBucket {
                count: 0,
                reset_at: now.saturating_add(window_ms),
            });
        if now > bucket.reset_at {
            *bucket = RateBucket {
                count: 0,
                reset_at: now.saturating_add(window_ms),
            };
        }
        bucket.count = bucket.count.saturating_add(1);

        let reset_in = Duration::from_millis(bucket.reset_at.saturating_sub(now).max(0) as u64);

        if bucket.count <= max {
            RateLimitResult::Allowed {
                remaining: max - bucket.count,
                reset_in,
            }
        } else {
            debug!(client = %key, count = bucket.count, ?reset_in, "Client rate limit exceeded");
            RateLimitResult::Limited {
                retry_after: reset_in,
            }
        }
    }

    fn evict_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let mut buckets = self.lock();
        let before = buckets.len();
        buckets.retain(|_, bucket| now <= bucket.reset_at);
        before - buckets.len()
    }

    fn tracked_keys(&self) -> usize {
        self.lock().len()
    }
}
