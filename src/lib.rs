// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Form Guard
//!
//! This crate hardens a contact form before it submits to an external
//! endpoint:
//!
//! - Per-session CSRF token with lazy one-hour expiry
//! - Sliding window rate limiting per identifier
//! - Text, email, phone and markup sanitization
//! - Heuristic SQL-injection shape detection (advisory)
//! - Randomized honeypot field for bot detection
//!
//! None of these replace validation at the endpoint. They run synchronously
//! against an injected clock and session store.

pub mod clock;
pub mod config;
pub mod csrf;
pub mod error;
pub mod honeypot;
pub mod limiter;
pub mod sanitizer;
pub mod store;
pub mod submission;
pub mod transport;
pub mod validator;

pub use config::Config;
pub use csrf::CsrfProtection;
pub use error::{StoreError, SubmitError};
pub use honeypot::{use_honeypot, Honeypot, HoneypotField};
pub use limiter::{RateLimitResult, RateLimiter};
pub use store::{MemoryStore, SessionStore};
pub use submission::{FormGuard, PreparedSubmission, SubmissionPayload};
pub use transport::{HttpTransport, Transport};
pub use validator::{ContactForm, FormValidator, ValidationError, ValidationResult};
