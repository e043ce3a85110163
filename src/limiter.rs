// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sliding window rate limiter for form submissions.
//!
//! Each instance keeps its own ledger of attempt timestamps per identifier.
//! Timestamps at least one window old are pruned on access, and a denied
//! attempt is not recorded, so a caller that waits out the window is not
//! penalized further.
//!
//! The ledger is held in memory only. This is a UX affordance; the real
//! limit has to live behind the submission endpoint. Identifiers whose
//! attempts have all aged out are swept whenever a new identifier is first
//! seen, so a long-lived limiter only holds identifiers active in the last
//! window.

use crate::clock::{duration_to_ms, Clock, SystemClock};
use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Attempt is admitted and recorded
    Allowed {
        /// Attempts left in the current window
        remaining: u32,
    },
    /// Attempt is refused and not recorded
    Limited {
        /// Time until the oldest recorded attempt leaves the window
        retry_after: Duration,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }
}

/// Per-instance sliding window rate limiter.
pub struct RateLimiter<C = SystemClock> {
    max_attempts: u32,
    window_ms: i64,
    clock: C,
    /// Attempt timestamps per identifier, ascending
    attempts: Mutex<HashMap<String, Vec<i64>>>,
}

impl RateLimiter<SystemClock> {
    /// Create a rate limiter using the system clock.
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    /// Create a rate limiter with an injected clock.
    ///
    /// Zero limits are raised to one.
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            window_ms: duration_to_ms(config.window()).max(1),
            clock,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Check-and-record an attempt for `identifier`.
    pub fn check(&self, identifier: &str) -> RateLimitResult {
        let now = self.clock.now_ms();
        let mut ledger = self.ledger();
        if !ledger.contains_key(identifier) {
            self.sweep(&mut ledger, now);
        }
        let attempts = ledger.entry(identifier.to_string()).or_default();

        attempts.retain(|&t| now - t < self.window_ms);

        let count = u32::try_from(attempts.len()).unwrap_or(u32::MAX);
        if count >= self.max_attempts {
            let retry_after = self.time_left(attempts, now);
            debug!(identifier, count, ?retry_after, "Rate limit exceeded");
            return RateLimitResult::Limited { retry_after };
        }

        attempts.push(now);
        RateLimitResult::Allowed {
            remaining: self.max_attempts - count - 1,
        }
    }

    /// Whether an attempt for `identifier` is admitted. Admitted attempts
    /// are recorded.
    pub fn is_allowed(&self, identifier: &str) -> bool {
        self.check(identifier).is_allowed()
    }

    /// Time until the oldest recorded attempt leaves the window.
    ///
    /// Zero for unknown identifiers. With several attempts queued this is a
    /// hint for messaging, not the exact moment a new attempt is admitted.
    pub fn remaining_time(&self, identifier: &str) -> Duration {
        let now = self.clock.now_ms();
        let ledger = self.ledger();
        match ledger.get(identifier) {
            Some(attempts) => self.time_left(attempts, now),
            None => Duration::ZERO,
        }
    }

    /// Forget every attempt recorded for `identifier`.
    pub fn reset(&self, identifier: &str) {
        self.ledger().remove(identifier);
    }

    /// Drop identifiers whose attempts have all aged out.
    pub fn cleanup(&self) {
        let now = self.clock.now_ms();
        let mut ledger = self.ledger();
        self.sweep(&mut ledger, now);
    }

    /// Number of identifiers currently tracked.
    pub fn tracked(&self) -> usize {
        self.ledger().len()
    }

    fn sweep(&self, ledger: &mut HashMap<String, Vec<i64>>, now: i64) {
        let before = ledger.len();
        ledger.retain(|_, attempts| {
            attempts.retain(|&t| now - t < self.window_ms);
            !attempts.is_empty()
        });
        if ledger.len() < before {
            debug!(dropped = before - ledger.len(), "Dropped idle identifiers");
        }
    }

    fn time_left(&self, attempts: &[i64], now: i64) -> Duration {
        match attempts.first() {
            Some(&oldest) => {
                let left = self.window_ms - (now - oldest);
                Duration::from_millis(u64::try_from(left).unwrap_or(0))
            }
            None => Duration::ZERO,
        }
    }

    fn ledger(&self) -> MutexGuard<'_, HashMap<String, Vec<i64>>> {
        self.attempts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
