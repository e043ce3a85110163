// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Per-session CSRF token issuance and validation.
//!
//! A single token record is kept in session storage. Expiry is enforced
//! lazily: a read that finds an expired record purges it and reports no
//! token. Storage faults never surface as errors; they are logged and the
//! operation degrades to "no token", which callers must read as "cannot
//! protect this submission".

use crate::clock::{duration_to_ms, Clock, SystemClock};
use crate::config::CsrfConfig;
use crate::store::SessionStore;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

/// Random bytes per token (43 base64url characters).
const TOKEN_BYTES: usize = 32;

/// Stored token record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub token: String,
    /// Expiry instant, milliseconds since the Unix epoch
    pub expires_at: i64,
}

/// CSRF token manager over an injected session store and clock.
pub struct CsrfProtection<S, C = SystemClock> {
    store: S,
    clock: C,
    config: CsrfConfig,
}

impl<S: SessionStore> CsrfProtection<S, SystemClock> {
    /// Create a manager using the system clock.
    pub fn new(store: S, config: CsrfConfig) -> Self {
        Self::with_clock(store, SystemClock, config)
    }
}

impl<S: SessionStore, C: Clock> CsrfProtection<S, C> {
    pub fn with_clock(store: S, clock: C, config: CsrfConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Mint a fresh token, replacing any stored one.
    ///
    /// Returns `None` when the store refuses the write.
    pub fn generate_token(&self) -> Option<String> {
        let token = random_token();
        let record = TokenRecord {
            token: token.clone(),
            expires_at: self
                .clock
                .now_ms()
                .saturating_add(duration_to_ms(self.config.ttl())),
        };

        let encoded = match serde_json::to_string(&record) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "Failed to encode CSRF token record");
                return None;
            }
        };

        match self.store.set(&self.config.storage_key, encoded) {
            Ok(()) => {
                debug!(expires_at = record.expires_at, "Issued CSRF token");
                Some(token)
            }
            Err(err) => {
                warn!(error = %err, "Cannot store CSRF token, submissions are unprotected");
                None
            }
        }
    }

    /// Current token, if one is stored and not expired.
    pub fn get_token(&self) -> Option<String> {
        let raw = match self.store.get(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "Cannot read CSRF token");
                return None;
            }
        };

        let record: TokenRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "Discarding malformed CSRF token record");
                self.clear_token();
                return None;
            }
        };

        if self.clock.now_ms() > record.expires_at {
            debug!(expires_at = record.expires_at, "CSRF token expired");
            self.clear_token();
            return None;
        }

        Some(record.token)
    }

    /// Whether `candidate` matches the live token.
    pub fn validate_token(&self, candidate: &str) -> bool {
        match self.get_token() {
            Some(token) => token.as_bytes().ct_eq(candidate.as_bytes()).into(),
            None => false,
        }
    }

    /// Remove the token record. Idempotent.
    pub fn clear_token(&self) {
        if let Err(err) = self.store.remove(&self.config.storage_key) {
            warn!(error = %err, "Cannot clear CSRF token");
        }
    }

    /// Live token, minting one if none is stored.
    pub fn get_or_generate(&self) -> Option<String> {
        self.get_token().or_else(|| self.generate_token())
    }

    /// Replace the token after a successful submission.
    pub fn rotate(&self) -> Option<String> {
        self.clear_token();
        self.generate_token()
    }
}

fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
