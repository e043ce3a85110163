// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Contact form field validation.
//!
//! Checks the shape rules the form shows inline errors for:
//! - Name length
//! - Email address shape
//! - Message length
//!
//! Unlike sanitization, validation reports every failing field at once so
//! the UI can mark them all.

use crate::config::SanitizerConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Contact form as submitted by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be at least {min} characters")]
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::TooShort { field, .. } => field,
            ValidationError::InvalidEmail => "email",
        }
    }
}

/// Result of validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Every field passes
    Valid,
    /// One entry per failing field
    Invalid(Vec<ValidationError>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn errors(&self) -> &[ValidationError] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(errors) => errors,
        }
    }
}

/// Contact form validator.
pub struct FormValidator {
    config: SanitizerConfig,
}

impl FormValidator {
    /// Create a new validator with the given configuration.
    pub fn new(config: SanitizerConfig) -> Self {
        Self { config }
    }

    /// Validate every field, collecting all failures.
    pub fn validate(&self, form: &ContactForm) -> ValidationResult {
        let mut errors = Vec::new();

        if let Err(err) = check_min_length("name", &form.name, self.config.min_name_length) {
            errors.push(err);
        }

        if !is_valid_email(&form.email) {
            debug!(email = %form.email, "Invalid email shape");
            errors.push(ValidationError::InvalidEmail);
        }

        if let Err(err) = check_min_length("message", &form.message, self.config.min_message_length)
        {
            errors.push(err);
        }

        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            debug!(count = errors.len(), "Form validation failed");
            ValidationResult::Invalid(errors)
        }
    }
}

fn check_min_length(field: &'static str, value: &str, min: usize) -> Result<(), ValidationError> {
    let actual = value.trim().chars().count();
    if actual < min {
        return Err(ValidationError::TooShort { field, min, actual });
    }
    Ok(())
}

/// Whether `email` has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern compiles"))
        .is_match(email.trim())
}
