//! Domain types exchanged with the recognition backend.
//!
//! All wire-shape variance is absorbed here: responses use Spanish field
//! names (with English aliases in some deployments), and decoding maps them
//! onto one canonical shape immediately. Calling code never sees the raw
//! wire names.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StudentRecord`] | Canonical enrolled-student entity |
//! | [`NewStudent`] | Fields for enrolling a student |
//! | [`StudentUpdate`] | Partial-field update |
//! | [`Photo`] | Binary photograph attached to uploads |
//! | [`RecognitionResult`] | Outcome of one recognition attempt |
//! | [`ConfidenceLabel`] | High/medium/low match confidence |
//! | [`RecognitionStats`] | Aggregate counters, degradable to zeroes |
//! | [`RecognitionLogEntry`] | One entry of the recognition audit trail |
//! | [`HealthStatus`] | Backend reachability snapshot |

pub mod photo;
pub mod recognition;
pub mod student;

pub use photo::Photo;
pub use recognition::{
    ConfidenceLabel, HealthStatus, RecognitionLogEntry, RecognitionResult, RecognitionStats,
};
pub use student::{NewStudent, RosterPage, StudentRecord, StudentUpdate};
