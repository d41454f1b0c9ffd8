//! Attempt-level diagnostics.
//!
//! Every network attempt a client makes is reported to an [`AttemptObserver`]
//! alongside the crate's `tracing` events. Observation is strictly
//! fire-and-forget: implementations get a borrowed record and return
//! nothing, so an observer can never fail a call or alter control flow.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`AttemptRecord`] | What happened on one attempt |
//! | [`AttemptOutcome`] | Terminal classification of the attempt |
//! | [`AttemptObserver`] | Trait for diagnostic destinations |
//! | [`NoopAttemptObserver`] | Default observer (no collection) |
//! | [`InMemoryAttemptObserver`] | In-memory observer for testing |

use std::sync::{Arc, RwLock};
use std::time::Duration;

/// How a single attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded { status: u16 },
    /// 4xx response; terminal for the call, never retried.
    Rejected { status: u16 },
    /// 5xx response; retried while attempts remain.
    ServerError { status: u16 },
    /// The timeout budget elapsed before a response arrived.
    TimedOut,
    /// No response at all: DNS, connect or mid-flight transport failure.
    TransportFailed,
}

/// One attempt of one logical call.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    /// Correlation id shared by every attempt of the call.
    pub request_id: String,
    pub method: String,
    pub path: String,
    /// 1-based ordinal of this attempt.
    pub attempt: u32,
    pub max_attempts: u32,
    pub outcome: AttemptOutcome,
    /// Wall time spent inside this attempt.
    pub elapsed: Duration,
    /// Backoff scheduled after this attempt, when a retry follows.
    pub retry_in: Option<Duration>,
}

/// Destination for attempt diagnostics.
pub trait AttemptObserver: Send + Sync {
    fn on_attempt(&self, record: &AttemptRecord);
}

/// Default observer: collects nothing.
pub struct NoopAttemptObserver;

impl AttemptObserver for NoopAttemptObserver {
    fn on_attempt(&self, _record: &AttemptRecord) {}
}

/// Convenience constructor for the default observer.
pub fn noop_observer() -> Arc<dyn AttemptObserver> {
    Arc::new(NoopAttemptObserver)
}

/// In-memory observer for testing.
#[derive(Default)]
pub struct InMemoryAttemptObserver {
    records: RwLock<Vec<AttemptRecord>>,
}

impl InMemoryAttemptObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<AttemptRecord> {
        match self.records.read() {
            Ok(guard) => guard.clone(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.records.write() {
            guard.clear();
        }
    }
}

impl AttemptObserver for InMemoryAttemptObserver {
    fn on_attempt(&self, record: &AttemptRecord) {
        if let Ok(mut guard) = self.records.write() {
            guard.push(record.clone());
        }
    }
}
