// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Delivery of prepared submissions to the external endpoint.
//!
//! The endpoint is a black box. It receives the payload as a JSON body
//! and the CSRF token again in the `X-CSRF-Token` header, and is expected to
//! run its own validation.

use crate::submission::SubmissionPayload;
use std::future::Future;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Header echoing the payload's CSRF token.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Transport error types.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Endpoint responded with status {0}")]
    Status(u16),
}

/// Sink for prepared submissions.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// JSON-over-HTTP POST transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport for `endpoint`. Only http and https URLs with a
    /// host are accepted.
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: parse_endpoint(endpoint)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn send(&self, payload: &SubmissionPayload) -> Result<(), TransportError> {
        debug!(endpoint = %self.endpoint, "Posting submission");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CSRF_HEADER, payload.csrf_token.as_str())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(())
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, TransportError> {
    let url = Url::parse(endpoint.trim())
        .map_err(|_| TransportError::InvalidEndpoint(endpoint.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(TransportError::InvalidEndpoint(endpoint.to_string()));
    }
    Ok(url)
}
