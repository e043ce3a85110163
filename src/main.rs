// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Form Guard CLI
//!
//! Runs a contact form through the guard and either prints the resulting
//! payload or posts it to the submission endpoint.
//!
//! ## Usage
//!
//! The form is read as JSON from stdin (or `--form <path>`):
//!
//! ```text
//! echo '{"name":"Ada","email":"ada@example.com","message":"Need a pipeline review"}' \
//!     | form-guard --endpoint https://forms.example.com/contact
//! ```
//!
//! ## Configuration
//!
//! An optional JSON config file (`--config`) is loaded first, then
//! environment variables and flags override it:
//!
//! - `FORM_GUARD_ENDPOINT`: Submission endpoint (default: print payload)
//! - `RATE_LIMIT_MAX_ATTEMPTS`: Attempts per window (default: 3)
//! - `RATE_LIMIT_WINDOW_MS`: Window length in milliseconds (default: 60000)
//! - `CSRF_TTL_MS`: CSRF token lifetime in milliseconds (default: 3600000)

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use form_guard::{
    config::Config,
    store::MemoryStore,
    submission::{FormGuard, PreparedSubmission},
    transport::HttpTransport,
    validator::ContactForm,
    SubmitError,
};

#[derive(Parser)]
#[command(name = "form-guard", about = "Harden and submit a contact form", version)]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON form file (default: stdin)
    #[arg(long)]
    form: Option<PathBuf>,

    /// Submission endpoint
    #[arg(long, env = "FORM_GUARD_ENDPOINT")]
    endpoint: Option<String>,

    /// Rate limit identifier for this form
    #[arg(long, default_value = "contact-form")]
    identifier: String,

    /// Value submitted in the honeypot field
    #[arg(long, default_value = "")]
    honeypot: String,

    /// Attempts admitted per window
    #[arg(long, env = "RATE_LIMIT_MAX_ATTEMPTS")]
    max_attempts: Option<u32>,

    /// Rate limit window in milliseconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_MS")]
    window_ms: Option<u64>,

    /// CSRF token lifetime in milliseconds
    #[arg(long, env = "CSRF_TTL_MS")]
    csrf_ttl_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr, stdout carries the payload
    tracing_subscriber::registry()
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(
        endpoint = ?config.endpoint,
        max_attempts = config.rate_limit.max_attempts,
        window_ms = config.rate_limit.window_ms,
        "Starting form guard"
    );

    let form = read_form(args.form.as_deref()).await?;
    let guard = FormGuard::new(MemoryStore::new(), &config);

    let result = match &config.endpoint {
        Some(endpoint) => {
            let transport = HttpTransport::new(endpoint)?;
            guard
                .submit(&args.identifier, &form, &args.honeypot, &transport)
                .await
        }
        None => guard.prepare(&args.identifier, &form, &args.honeypot),
    };

    match result {
        Ok(prepared) => report(&prepared, config.endpoint.is_some()),
        Err(SubmitError::Invalid(errors)) => {
            for err in &errors {
                eprintln!("{}: {err}", err.field());
            }
            anyhow::bail!("form has {} invalid field(s)", errors.len())
        }
        Err(err) => Err(err.into()),
    }
}

fn report(prepared: &PreparedSubmission, delivered: bool) -> anyhow::Result<()> {
    for field in &prepared.sql_warnings {
        warn!(field, "Field looks like SQL, the endpoint must validate it");
    }

    if delivered {
        info!("Submission delivered");
    } else {
        println!("{}", serde_json::to_string_pretty(&prepared.payload)?);
    }
    Ok(())
}

/// Load configuration from the config file, then apply overrides.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(endpoint) = &args.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    if let Some(max_attempts) = args.max_attempts {
        config.rate_limit.max_attempts = max_attempts;
    }
    if let Some(window_ms) = args.window_ms {
        config.rate_limit.window_ms = window_ms;
    }
    if let Some(ttl_ms) = args.csrf_ttl_ms {
        config.csrf.ttl_ms = ttl_ms;
    }
    Ok(config)
}

async fn read_form(path: Option<&std::path::Path>) -> anyhow::Result<ContactForm> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading form {}", path.display()))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            raw
        }
    };
    serde_json::from_str(&raw).context("parsing form JSON")
}
