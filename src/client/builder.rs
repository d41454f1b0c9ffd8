use std::sync::Arc;
use std::time::Duration;

use crate::client::core::RostroClient;
use crate::client::policy::RetryPolicy;
use crate::config::{self, ClientConfig};
use crate::telemetry::{noop_observer, AttemptObserver};
use crate::transport::HttpTransport;
use crate::{Error, Result};

/// Builder for [`RostroClient`].
///
/// The base URL is always explicit; there is no ambient default. Tunables
/// start from crate defaults, may be seeded from the environment
/// (`ROSTRO_TIMEOUT_MS`, `ROSTRO_UPLOAD_TIMEOUT_MS`, `ROSTRO_MAX_ATTEMPTS`,
/// read once when the builder is created), and explicit setters win over
/// both.
pub struct RostroClientBuilder {
    base_url: Option<String>,
    request_timeout: Duration,
    upload_timeout: Duration,
    max_attempts: u32,
    backoff_base: Duration,
    backoff_ceiling: Duration,
    observer: Arc<dyn AttemptObserver>,
}

impl RostroClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            request_timeout: config::env_millis("ROSTRO_TIMEOUT_MS")
                .unwrap_or(config::DEFAULT_REQUEST_TIMEOUT),
            upload_timeout: config::env_millis("ROSTRO_UPLOAD_TIMEOUT_MS")
                .unwrap_or(config::DEFAULT_UPLOAD_TIMEOUT),
            max_attempts: config::env_u32("ROSTRO_MAX_ATTEMPTS")
                .unwrap_or(config::DEFAULT_MAX_ATTEMPTS),
            backoff_base: config::DEFAULT_BACKOFF_BASE,
            backoff_ceiling: config::DEFAULT_BACKOFF_CEILING,
            observer: noop_observer(),
        }
    }

    /// Backend origin, e.g. `http://10.0.2.2:8000` for a local emulator or
    /// the deployed service URL. Required.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Budget for roster, health, stats and log calls.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Budget for photo uploads and recognition calls.
    pub fn upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Hard ceiling on attempts per call, first attempt included.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// First backoff delay and the cap it doubles toward.
    pub fn backoff(mut self, base: Duration, ceiling: Duration) -> Self {
        self.backoff_base = base;
        self.backoff_ceiling = ceiling;
        self
    }

    /// Diagnostic destination for per-attempt records.
    pub fn attempt_observer(mut self, observer: Arc<dyn AttemptObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn build(self) -> Result<RostroClient> {
        let raw = self.base_url.ok_or_else(|| {
            Error::config("base URL is required; set it with RostroClientBuilder::base_url")
        })?;
        let base_url = config::normalize_base_url(&raw)?;
        if self.max_attempts == 0 {
            return Err(Error::config("max_attempts must be at least 1"));
        }

        let config = ClientConfig {
            base_url,
            request_timeout: self.request_timeout,
            upload_timeout: self.upload_timeout,
            max_attempts: self.max_attempts,
            backoff_base: self.backoff_base,
            backoff_ceiling: self.backoff_ceiling,
        };
        let transport = HttpTransport::new(&config)?;
        let policy = RetryPolicy::new(self.max_attempts, self.backoff_base, self.backoff_ceiling);

        Ok(RostroClient {
            transport: Arc::new(transport),
            config,
            policy,
            observer: self.observer,
        })
    }
}

impl Default for RostroClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
