// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Honeypot field for bot detection.
//!
//! The form renders an input humans never see. Naive form fillers populate
//! every field, so any value in it marks the submission as automated. The
//! field name carries a random suffix so it cannot be targeted by a
//! selector written ahead of time.
//!
//! Pre-rendered markup cannot know the random name, so the name starts as
//! [`HoneypotField::Pending`] with a fixed default and becomes
//! [`HoneypotField::Resolved`] once the live form takes over.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Field name used until a random one is resolved.
pub const DEFAULT_FIELD_NAME: &str = "website";

/// Length of the random suffix.
const SUFFIX_LEN: usize = 10;

/// Honeypot field name state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoneypotField {
    /// Fixed placeholder, identical across renders
    Pending(&'static str),
    /// Randomized name for the live form
    Resolved(String),
}

impl HoneypotField {
    pub fn name(&self) -> &str {
        match self {
            HoneypotField::Pending(name) => name,
            HoneypotField::Resolved(name) => name,
        }
    }
}

/// Honeypot descriptor: a field name and its validation predicate.
#[derive(Debug, Clone)]
pub struct Honeypot {
    field: HoneypotField,
}

impl Honeypot {
    /// Honeypot with a freshly randomized field name.
    pub fn new() -> Self {
        let mut honeypot = Self::pending();
        honeypot.resolve();
        honeypot
    }

    /// Honeypot still carrying the default name.
    pub fn pending() -> Self {
        Self {
            field: HoneypotField::Pending(DEFAULT_FIELD_NAME),
        }
    }

    /// Move to a random field name. A resolved name is kept as is.
    pub fn resolve(&mut self) -> &str {
        if let HoneypotField::Pending(base) = self.field {
            let suffix: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(SUFFIX_LEN)
                .map(char::from)
                .collect();
            self.field = HoneypotField::Resolved(format!("{base}_{suffix}"));
        }
        self.field.name()
    }

    pub fn field(&self) -> &HoneypotField {
        &self.field
    }

    pub fn field_name(&self) -> &str {
        self.field.name()
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.field, HoneypotField::Resolved(_))
    }

    /// True iff the trap field was left empty.
    pub fn validate(&self, value: &str) -> bool {
        value.is_empty()
    }
}

impl Default for Honeypot {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a honeypot for a live form.
pub fn use_honeypot() -> Honeypot {
    Honeypot::new()
}
