// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact form submission pipeline.
//!
//! [`FormGuard`] runs the checks in a fixed order: honeypot, sanitization,
//! field validation, rate limit, then CSRF token. Only a form that passes all
//! of them becomes a [`SubmissionPayload`]. Validation sees the sanitized
//! fields, so markup cannot pad a field past its minimum length. Invalid
//! forms are rejected before the rate limiter so they do not burn attempts.

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::csrf::CsrfProtection;
use crate::error::SubmitError;
use crate::honeypot::Honeypot;
use crate::limiter::{RateLimitResult, RateLimiter};
use crate::sanitizer::{
    has_sql_injection, sanitize_email, sanitize_html, sanitize_phone, sanitize_text,
};
use crate::store::SessionStore;
use crate::transport::Transport;
use crate::validator::{ContactForm, FormValidator, ValidationResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Body posted to the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub data: ContactForm,
    pub csrf_token: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// A sanitized payload ready to send.
#[derive(Debug, Clone)]
pub struct PreparedSubmission {
    pub payload: SubmissionPayload,
    /// Fields whose raw value looks like SQL. Advisory only.
    pub sql_warnings: Vec<&'static str>,
}

/// Message shown while the rate limiter refuses submissions.
pub fn wait_message(remaining: Duration) -> String {
    let minutes = remaining.as_millis().div_ceil(60_000).max(1);
    let unit = if minutes == 1 { "minute" } else { "minutes" };
    format!("Too many submissions. Please wait {minutes} {unit}.")
}

/// Composition of the form security components.
pub struct FormGuard<S, C = SystemClock> {
    csrf: CsrfProtection<S, C>,
    limiter: RateLimiter<C>,
    validator: FormValidator,
    honeypot: Honeypot,
    clock: C,
    max_text_length: usize,
}

impl<S: SessionStore> FormGuard<S, SystemClock> {
    pub fn new(store: S, config: &Config) -> Self {
        Self::with_clock(store, SystemClock, config)
    }
}

impl<S: SessionStore, C: Clock + Clone> FormGuard<S, C> {
    pub fn with_clock(store: S, clock: C, config: &Config) -> Self {
        let honeypot = if config.honeypot.randomize {
            Honeypot::new()
        } else {
            Honeypot::pending()
        };

        Self {
            csrf: CsrfProtection::with_clock(store, clock.clone(), config.csrf.clone()),
            limiter: RateLimiter::with_clock(config.rate_limit.clone(), clock.clone()),
            validator: FormValidator::new(config.sanitizer.clone()),
            honeypot,
            clock,
            max_text_length: config.sanitizer.max_text_length,
        }
    }

    pub fn csrf(&self) -> &CsrfProtection<S, C> {
        &self.csrf
    }

    pub fn limiter(&self) -> &RateLimiter<C> {
        &self.limiter
    }

    /// Honeypot whose field name the form must render.
    pub fn honeypot(&self) -> &Honeypot {
        &self.honeypot
    }

    /// Run every check and build the payload.
    pub fn prepare(
        &self,
        identifier: &str,
        form: &ContactForm,
        honeypot_value: &str,
    ) -> Result<PreparedSubmission, SubmitError> {
        if !self.honeypot.validate(honeypot_value) {
            warn!(identifier, field = self.honeypot.field_name(), "Honeypot field filled");
            return Err(SubmitError::Honeypot);
        }

        let data = self.sanitize(form);
        if let ValidationResult::Invalid(errors) = self.validator.validate(&data) {
            return Err(SubmitError::Invalid(errors));
        }

        if let RateLimitResult::Limited { retry_after } = self.limiter.check(identifier) {
            info!(
                identifier,
                retry_after_ms = u64::try_from(retry_after.as_millis()).unwrap_or(u64::MAX),
                tracked = self.limiter.tracked(),
                "Submission rate limited"
            );
            return Err(SubmitError::RateLimited { retry_after });
        }

        let sql_warnings = sql_warnings(form);
        if !sql_warnings.is_empty() {
            debug!(identifier, fields = ?sql_warnings, "SQL-shaped input");
        }

        let csrf_token = self
            .csrf
            .get_or_generate()
            .ok_or(SubmitError::CsrfUnavailable)?;

        Ok(PreparedSubmission {
            payload: SubmissionPayload {
                data,
                csrf_token,
                timestamp: self.clock.now_ms(),
            },
            sql_warnings,
        })
    }

    /// Prepare, send through `transport`, and rotate the CSRF token once the
    /// endpoint accepts the payload.
    pub async fn submit<T: Transport>(
        &self,
        identifier: &str,
        form: &ContactForm,
        honeypot_value: &str,
        transport: &T,
    ) -> Result<PreparedSubmission, SubmitError> {
        let prepared = self.prepare(identifier, form, honeypot_value)?;
        transport.send(&prepared.payload).await?;

        if self.csrf.rotate().is_none() {
            warn!("CSRF token rotation failed after submission");
        }
        info!(identifier, "Submission delivered");
        Ok(prepared)
    }

    fn sanitize(&self, form: &ContactForm) -> ContactForm {
        let text = |value: &str| sanitize_text(&sanitize_html(value), self.max_text_length);
        ContactForm {
            name: text(&form.name),
            email: sanitize_email(&form.email),
            message: text(&form.message),
            phone: form.phone.as_deref().map(sanitize_phone),
            company: form.company.as_deref().map(text),
        }
    }
}

fn sql_warnings(form: &ContactForm) -> Vec<&'static str> {
    let fields = [
        ("name", Some(form.name.as_str())),
        ("message", Some(form.message.as_str())),
        ("company", form.company.as_deref()),
    ];
    fields
        .into_iter()
        .filter(|(_, value)| value.is_some_and(has_sql_injection))
        .map(|(field, _)| field)
        .collect()
}
