// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the form guard.
//!
//! Expected conditions (missing token, exhausted rate limit, bad input) are
//! plain return values. These types only cover environmental faults and
//! the reasons a submission is refused.

use crate::transport::TransportError;
use crate::validator::ValidationError;
use std::time::Duration;
use thiserror::Error;

/// Session storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session storage is unavailable")]
    Unavailable,

    #[error("Session storage lock poisoned")]
    Poisoned,

    #[error("Malformed stored record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reasons a contact form submission does not go out.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Submission rejected")]
    Honeypot,

    #[error("{}", rate_limit_message(.retry_after))]
    RateLimited { retry_after: Duration },

    #[error("Form has {} invalid field(s)", .0.len())]
    Invalid(Vec<ValidationError>),

    #[error("CSRF token unavailable, cannot protect this submission")]
    CsrfUnavailable,

    #[error("Transport failed: {0}")]
    Transport(#[from] TransportError),
}

fn rate_limit_message(retry_after: &Duration) -> String {
    crate::submission::wait_message(*retry_after)
}

impl SubmitError {
    /// Field failures, empty for every other kind of refusal.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            SubmitError::Invalid(errors) => errors,
            _ => &[],
        }
    }
}
