// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Attack simulation patterns for security testing.

use std::time::Duration;

/// Attack pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of submissions to attempt
    pub total_submissions: usize,
    /// Simulated time between submissions
    pub interval: Duration,
    /// Number of unique client identifiers
    pub unique_clients: usize,
    /// Fraction of submissions that fill the honeypot (0.0-1.0)
    pub honeypot_ratio: f64,
    /// Fraction of submissions that fail validation (0.0-1.0)
    pub invalid_ratio: f64,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_submissions: 100,
            interval: Duration::from_millis(100),
            unique_clients: 1,
            honeypot_ratio: 0.0,
            invalid_ratio: 0.0,
        }
    }
}

/// Predefined attack patterns.
impl AttackConfig {
    /// Single client flood - one script hammering the submit button.
    pub fn single_client_flood() -> Self {
        Self {
            total_submissions: 200,
            interval: Duration::from_millis(50),
            unique_clients: 1,
            ..Default::default()
        }
    }

    /// Distributed flood - many clients, each under the limit.
    pub fn distributed_flood() -> Self {
        Self {
            total_submissions: 300,
            interval: Duration::from_millis(10),
            unique_clients: 100,
            ..Default::default()
        }
    }

    /// Form-filling bots that populate every input.
    pub fn honeypot_bots() -> Self {
        Self {
            total_submissions: 50,
            unique_clients: 10,
            honeypot_ratio: 1.0,
            ..Default::default()
        }
    }

    /// Junk submissions failing field validation.
    pub fn junk_forms() -> Self {
        Self {
            total_submissions: 50,
            unique_clients: 1,
            invalid_ratio: 1.0,
            ..Default::default()
        }
    }

    /// Slow drip - one client staying under the window limit.
    pub fn slow_drip(window: Duration, max_attempts: u32) -> Self {
        Self {
            total_submissions: 20,
            interval: window / max_attempts + Duration::from_millis(1),
            unique_clients: 1,
            ..Default::default()
        }
    }

    /// Mixed traffic - some bots, some junk, some humans.
    pub fn mixed() -> Self {
        Self {
            total_submissions: 120,
            interval: Duration::from_millis(250),
            unique_clients: 12,
            honeypot_ratio: 0.3,
            invalid_ratio: 0.2,
        }
    }

    /// Simulated span of the attack.
    pub fn expected_duration(&self) -> Duration {
        self.interval * self.total_submissions as u32
    }
}
