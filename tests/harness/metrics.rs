// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Metrics collection for attack simulation results.

use std::collections::HashMap;

/// Collects metrics during attack simulation.
#[derive(Debug, Default)]
pub struct AttackMetrics {
    /// Count of submissions by outcome
    outcomes: HashMap<Outcome, usize>,
    /// Count of submissions by client
    submissions_per_client: HashMap<String, usize>,
    /// Distinct CSRF tokens attached to admitted payloads
    tokens: std::collections::HashSet<String>,
}

/// Possible outcomes for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Allowed,
    RateLimited,
    HoneypotBlocked,
    ValidationFailed,
    CsrfUnavailable,
}

impl AttackMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submission outcome.
    pub fn record(&mut self, outcome: Outcome, client: &str) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        *self
            .submissions_per_client
            .entry(client.to_string())
            .or_insert(0) += 1;
    }

    /// Record the CSRF token of an admitted payload.
    pub fn record_token(&mut self, token: &str) {
        self.tokens.insert(token.to_string());
    }

    /// Get total submission count.
    pub fn total(&self) -> usize {
        self.outcomes.values().sum()
    }

    /// Get count for a specific outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Get block rate (ratio of blocked to total).
    pub fn block_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let allowed = self.count(Outcome::Allowed);
        (total - allowed) as f64 / total as f64
    }

    /// Generate a summary report.
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            total: self.total(),
            allowed: self.count(Outcome::Allowed),
            rate_limited: self.count(Outcome::RateLimited),
            honeypot_blocked: self.count(Outcome::HoneypotBlocked),
            validation_failed: self.count(Outcome::ValidationFailed),
            csrf_unavailable: self.count(Outcome::CsrfUnavailable),
            block_rate: self.block_rate(),
            unique_clients: self.submissions_per_client.len(),
            distinct_tokens: self.tokens.len(),
        }
    }
}

/// Summary report of attack metrics.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub total: usize,
    pub allowed: usize,
    pub rate_limited: usize,
    pub honeypot_blocked: usize,
    pub validation_failed: usize,
    pub csrf_unavailable: usize,
    pub block_rate: f64,
    pub unique_clients: usize,
    pub distinct_tokens: usize,
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Attack Metrics Report ===")?;
        writeln!(f, "Total Submissions: {}", self.total)?;
        writeln!(f)?;
        writeln!(f, "--- Outcomes ---")?;
        writeln!(f, "Allowed:           {}", self.allowed)?;
        writeln!(f, "Rate Limited:      {}", self.rate_limited)?;
        writeln!(f, "Honeypot Blocked:  {}", self.honeypot_blocked)?;
        writeln!(f, "Validation Failed: {}", self.validation_failed)?;
        writeln!(f, "CSRF Unavailable:  {}", self.csrf_unavailable)?;
        writeln!(f, "Block Rate:        {:.1}%", self.block_rate * 100.0)?;
        writeln!(f)?;
        writeln!(f, "--- Distribution ---")?;
        writeln!(f, "Unique Clients:    {}", self.unique_clients)?;
        writeln!(f, "Distinct Tokens:   {}", self.distinct_tokens)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let mut metrics = AttackMetrics::new();
        metrics.record(Outcome::Allowed, "a");
        metrics.record(Outcome::Allowed, "b");
        metrics.record(Outcome::RateLimited, "a");

        assert_eq!(metrics.total(), 3);
        assert_eq!(metrics.count(Outcome::Allowed), 2);
        assert_eq!(metrics.report().unique_clients, 2);
    }

    #[test]
    fn test_block_rate() {
        let mut metrics = AttackMetrics::new();
        for _ in 0..3 {
            metrics.record(Outcome::Allowed, "a");
        }
        for _ in 0..7 {
            metrics.record(Outcome::HoneypotBlocked, "a");
        }

        assert!((metrics.block_rate() - 0.7).abs() < 0.01);
    }
}
