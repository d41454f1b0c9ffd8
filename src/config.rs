//! Client configuration: the injected base URL plus retry/timeout tunables.

use std::env;
use std::time::Duration;

use crate::{Error, Result};

/// Budget for roster, health, stats and log calls.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Budget for calls that upload a photograph and run server-side inference.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);
/// Hard ceiling on attempts per call, first attempt included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
/// First backoff delay; doubles per failed attempt.
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(1000);
/// Cap on any single backoff delay.
pub const DEFAULT_BACKOFF_CEILING: Duration = Duration::from_millis(5000);

/// Resolved configuration held by a built client.
///
/// The base URL is injected explicitly at construction; there is no
/// process-wide default and no global mutable state. Tunables can be seeded
/// from the environment by the builder (`ROSTRO_TIMEOUT_MS`,
/// `ROSTRO_UPLOAD_TIMEOUT_MS`, `ROSTRO_MAX_ATTEMPTS`), read once at build
/// time.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Normalized base URL without a trailing slash.
    pub base_url: String,
    pub request_timeout: Duration,
    /// Recognition and photo uploads legitimately run for minutes on the
    /// backend, so they carry a much larger budget than roster reads.
    pub upload_timeout: Duration,
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub backoff_ceiling: Duration,
}

/// Validate and normalize a base URL: accept only http/https, drop any
/// trailing slash so path concatenation stays predictable.
pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::config("base URL must not be empty"));
    }
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| Error::config(format!("invalid base URL '{trimmed}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "base URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

pub(crate) fn env_millis(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

pub(crate) fn env_u32(name: &str) -> Option<u32> {
    env::var(name).ok().and_then(|s| s.parse::<u32>().ok())
}
