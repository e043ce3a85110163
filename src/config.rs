// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact form guard.
//!
//! Every field has a default, so an empty document deserializes into the
//! policy the contact form ships with.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration for the form guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Submission endpoint (default: none, payloads are printed instead of sent)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// CSRF token configuration
    #[serde(default)]
    pub csrf: CsrfConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Field sanitization and validation configuration
    #[serde(default)]
    pub sanitizer: SanitizerConfig,

    /// Honeypot field configuration
    #[serde(default)]
    pub honeypot: HoneypotConfig,
}

/// CSRF token lifetime and storage key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrfConfig {
    /// Session storage key holding the token record (default: csrf_token)
    #[serde(default = "default_csrf_key")]
    pub storage_key: String,

    /// Token lifetime in milliseconds (default: 3600000)
    #[serde(default = "default_csrf_ttl_ms")]
    pub ttl_ms: u64,
}

/// Sliding window limits for form submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Attempts admitted per identifier inside one window (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Window length in milliseconds (default: 60000)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

/// Field limits applied before a payload is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizerConfig {
    /// Maximum characters kept in free-text fields (default: 1000)
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Minimum characters in the name field (default: 2)
    #[serde(default = "default_min_name_length")]
    pub min_name_length: usize,

    /// Minimum characters in the message field (default: 10)
    #[serde(default = "default_min_message_length")]
    pub min_message_length: usize,
}

/// Honeypot naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoneypotConfig {
    /// Randomize the field name (default: true)
    #[serde(default = "default_true")]
    pub randomize: bool,
}

// Default value functions
fn default_csrf_key() -> String {
    "csrf_token".to_string()
}

fn default_csrf_ttl_ms() -> u64 {
    60 * 60 * 1000 // 1 hour
}

fn default_max_attempts() -> u32 {
    3
}

fn default_window_ms() -> u64 {
    60_000
}

fn default_max_text_length() -> usize {
    crate::sanitizer::DEFAULT_MAX_TEXT_LENGTH
}

fn default_min_name_length() -> usize {
    2
}

fn default_min_message_length() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            csrf: CsrfConfig::default(),
            rate_limit: RateLimitConfig::default(),
            sanitizer: SanitizerConfig::default(),
            honeypot: HoneypotConfig::default(),
        }
    }
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            storage_key: default_csrf_key(),
            ttl_ms: default_csrf_ttl_ms(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            window_ms: default_window_ms(),
        }
    }
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_text_length: default_max_text_length(),
            min_name_length: default_min_name_length(),
            min_message_length: default_min_message_length(),
        }
    }
}

impl Default for HoneypotConfig {
    fn default() -> Self {
        Self {
            randomize: default_true(),
        }
    }
}

impl CsrfConfig {
    /// Get the token lifetime
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl RateLimitConfig {
    /// Build a config from raw limits.
    pub fn new(max_attempts: u32, window_ms: u64) -> Self {
        Self {
            max_attempts,
            window_ms,
        }
    }

    /// Get the rate window duration
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}
