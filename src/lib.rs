//! # rostro-client
//!
//! Async Rust client for the Rostro student face-recognition service.
//!
//! ## Overview
//!
//! The backend owns all the heavy lifting: face detection, feature-vector
//! extraction, similarity scoring and persistence. This crate is the
//! counterpart built for unreliable mobile-grade networks: a typed client
//! whose every call runs through one resilient request layer with per-call
//! timeout budgets, bounded retries with exponential backoff, and a small
//! normalized error taxonomy.
//!
//! - **One retry loop**: every operation (roster CRUD, recognition, health,
//!   stats) is parameterized over the same loop; there are no per-call-site
//!   retry policies to drift apart.
//! - **Injected configuration**: the base URL and tunables are set at
//!   construction. No globals, no singletons.
//! - **Canonical types**: wire-shape variance across backend versions
//!   (Spanish vs English field names, legacy response fields) is absorbed at
//!   the decode boundary and never reaches calling code.
//! - **Observable attempts**: every attempt emits `tracing` events and an
//!   [`AttemptRecord`] to an optional observer, without ever affecting the
//!   call's control flow.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rostro_client::types::{Photo, RosterPage};
//! use rostro_client::RostroClient;
//!
//! #[tokio::main]
//! async fn main() -> rostro_client::Result<()> {
//!     let client = RostroClient::builder()
//!         .base_url("http://10.0.2.2:8000")
//!         .build()?;
//!
//!     let roster = client.list_students(&RosterPage::default()).await?;
//!     println!("{} students enrolled", roster.len());
//!
//!     let photo = Photo::jpeg(std::fs::read("capture.jpg").expect("photo file"));
//!     let result = client.recognize(photo).await?;
//!     if let Some(student) = &result.student {
//!         println!("match: {} ({})", student.full_name(), result.confidence);
//!     } else {
//!         println!("no match: {}", result.message);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder and the consolidated retry loop |
//! | [`config`] | Injected base URL and retry/timeout tunables |
//! | [`error`] | Normalized error taxonomy |
//! | [`telemetry`] | Per-attempt diagnostics |
//! | [`transport`] | Single-attempt HTTP dispatch |
//! | [`types`] | Canonical domain types and wire normalization |

pub mod client;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{RostroClient, RostroClientBuilder};
pub use config::ClientConfig;
pub use error::Error;
pub use telemetry::{AttemptObserver, AttemptOutcome, AttemptRecord};
pub use types::{
    ConfidenceLabel, HealthStatus, NewStudent, Photo, RecognitionLogEntry, RecognitionResult,
    RecognitionStats, RosterPage, StudentRecord, StudentUpdate,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
