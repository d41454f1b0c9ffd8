use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Method;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::policy::{Decision, RetryPolicy};
use crate::config::ClientConfig;
use crate::telemetry::{AttemptObserver, AttemptOutcome, AttemptRecord};
use crate::transport::http::{FormBody, HttpTransport};
use crate::{Error, Result};

/// Asynchronous client for the student face-recognition backend.
///
/// Every operation funnels through one consolidated retry loop: a per-call
/// timeout budget, bounded attempts with exponential backoff, and the
/// normalized error taxonomy in [`crate::Error`]. The client is stateless
/// between calls and cheap to clone; clones share the connection pool and
/// may run any number of calls concurrently. Dropping a returned future
/// cancels the in-flight request and releases its resources.
///
/// ```rust,no_run
/// use rostro_client::RostroClient;
///
/// # async fn run() -> rostro_client::Result<()> {
/// let client = RostroClient::builder()
///     .base_url("http://10.0.2.2:8000")
///     .build()?;
/// let health = client.health().await?;
/// println!("backend healthy: {}", health.is_healthy());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RostroClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) config: ClientConfig,
    pub(crate) policy: RetryPolicy,
    pub(crate) observer: Arc<dyn AttemptObserver>,
}

impl std::fmt::Debug for RostroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RostroClient")
            .field("config", &self.config)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// One logical call: endpoint, optional multipart body, timeout class.
#[derive(Debug)]
pub(crate) struct CallSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<FormBody>,
    pub timeout: Duration,
}

impl RostroClient {
    pub fn builder() -> crate::client::builder::RostroClientBuilder {
        crate::client::builder::RostroClientBuilder::new()
    }

    /// Client for `base_url` with default tunables.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Reachability probe. `GET /health`.
    pub async fn health(&self) -> Result<crate::types::HealthStatus> {
        let value = self.execute(self.quick(Method::GET, "/health")).await?;
        decode(value)
    }

    /// Display URL for a student's stored reference photograph. The image
    /// endpoint serves raw bytes, so it is handed to image widgets as a URL
    /// rather than fetched and decoded here.
    pub fn student_image_url(&self, id: i64) -> String {
        self.transport.url_for(&format!("/api/students/{id}/image"))
    }

    /// Short-budget call: roster reads, health, stats, logs.
    pub(crate) fn quick(&self, method: Method, path: impl Into<String>) -> CallSpec {
        CallSpec {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            timeout: self.config.request_timeout,
        }
    }

    /// Long-budget call: uploads that run server-side inference.
    pub(crate) fn upload(
        &self,
        method: Method,
        path: impl Into<String>,
        body: FormBody,
    ) -> CallSpec {
        CallSpec {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
            timeout: self.config.upload_timeout,
        }
    }

    /// The consolidated retry loop.
    ///
    /// Attempts are numbered from 1. Each attempt races the transport
    /// dispatch against the budget; 2xx decodes and returns, 4xx surfaces
    /// immediately, and 5xx/timeout/transport failures retry with
    /// exponential backoff until the attempt ceiling, after which the final
    /// attempt's error surfaces unchanged. Every attempt is reported to the
    /// observer and traced; neither can block or fail the call.
    pub(crate) async fn execute(&self, spec: CallSpec) -> Result<serde_json::Value> {
        let request_id = Uuid::new_v4().to_string();
        let budget_ms = spec.timeout.as_millis() as u64;
        let mut attempt: u32 = 1;

        loop {
            let started = Instant::now();
            let attempt_fut = self.transport.dispatch(
                &spec.method,
                &spec.path,
                &spec.query,
                spec.body.as_ref(),
                &request_id,
                attempt,
            );
            let attempt_res = match timeout(spec.timeout, attempt_fut).await {
                Ok(Ok(raw)) => Ok(raw),
                Ok(Err(e)) => Err(Error::Transport(e)),
                Err(_) => Err(Error::Timeout { budget_ms }),
            };
            let elapsed = started.elapsed();

            // Terminal paths return from inside the match; retryable-class
            // failures fall through to the policy decision below.
            let (err, outcome) = match attempt_res {
                Ok(raw) if (200..300).contains(&raw.status) => {
                    self.observe(
                        &spec,
                        &request_id,
                        attempt,
                        AttemptOutcome::Succeeded { status: raw.status },
                        elapsed,
                        None,
                    );
                    debug!(
                        request_id = %request_id,
                        method = %spec.method,
                        path = %spec.path,
                        attempt,
                        http_status = raw.status,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "call succeeded"
                    );
                    return serde_json::from_str(&raw.body).map_err(|e| {
                        warn!(
                            request_id = %request_id,
                            path = %spec.path,
                            http_status = raw.status,
                            "2xx body was not valid JSON"
                        );
                        Error::Decode(e)
                    });
                }
                Ok(raw) if (400..500).contains(&raw.status) => {
                    let err = Error::api_from_body(raw.status, &raw.body);
                    self.observe(
                        &spec,
                        &request_id,
                        attempt,
                        AttemptOutcome::Rejected { status: raw.status },
                        elapsed,
                        None,
                    );
                    warn!(
                        request_id = %request_id,
                        path = %spec.path,
                        attempt,
                        http_status = raw.status,
                        "backend rejected the request"
                    );
                    return Err(err);
                }
                // 5xx, plus any status outside the classes above, counts as
                // a server-side failure.
                Ok(raw) => (
                    Error::Server { status: raw.status },
                    AttemptOutcome::ServerError { status: raw.status },
                ),
                Err(err) => {
                    let outcome = match &err {
                        Error::Timeout { .. } => AttemptOutcome::TimedOut,
                        _ => AttemptOutcome::TransportFailed,
                    };
                    (err, outcome)
                }
            };

            match self.policy.decide(&err, attempt) {
                Decision::Retry { delay } => {
                    self.observe(&spec, &request_id, attempt, outcome, elapsed, Some(delay));
                    warn!(
                        request_id = %request_id,
                        path = %spec.path,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "attempt failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Decision::Fail => {
                    self.observe(&spec, &request_id, attempt, outcome, elapsed, None);
                    warn!(
                        request_id = %request_id,
                        path = %spec.path,
                        attempt,
                        error = %err,
                        "attempts exhausted"
                    );
                    return Err(err);
                }
            }
        }
    }

    fn observe(
        &self,
        spec: &CallSpec,
        request_id: &str,
        attempt: u32,
        outcome: AttemptOutcome,
        elapsed: Duration,
        retry_in: Option<Duration>,
    ) {
        let record = AttemptRecord {
            request_id: request_id.to_string(),
            method: spec.method.to_string(),
            path: spec.path.clone(),
            attempt,
            max_attempts: self.policy.max_attempts,
            outcome,
            elapsed,
            retry_in,
        };
        self.observer.on_attempt(&record);
    }
}

/// Map a decoded JSON value onto its typed endpoint shape.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(Error::Decode)
}
