//! Recognition outcomes, aggregate statistics and backend health.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::student::StudentRecord;

/// Confidence bucket attached to a match. The backend localizes these as
/// `"Alta"`, `"Media"` and `"Baja"`; both the localized and the English
/// spellings decode. Anything unrecognized is treated as low confidence,
/// matching the backend's own default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLabel {
    High,
    Medium,
    #[default]
    Low,
}

impl ConfidenceLabel {
    fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "alta" | "high" => ConfidenceLabel::High,
            "media" | "medium" => ConfidenceLabel::Medium,
            _ => ConfidenceLabel::Low,
        }
    }
}

impl<'de> Deserialize<'de> for ConfidenceLabel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ConfidenceLabel::from_wire(&raw))
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfidenceLabel::High => "high",
            ConfidenceLabel::Medium => "medium",
            ConfidenceLabel::Low => "low",
        };
        f.write_str(label)
    }
}

/// Outcome of one recognition attempt. Ephemeral; never persisted by the
/// client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognitionResult {
    pub found: bool,
    /// The matched student when `found` is true.
    pub student: Option<StudentRecord>,
    /// Similarity against the best candidate, clamped into `[0, 1]`.
    pub similarity: f64,
    pub confidence: ConfidenceLabel,
    /// Human-readable explanation from the backend.
    pub message: String,
    /// Server-side processing time in seconds, when reported.
    pub processing_time: Option<f64>,
}

/// Older deployments reported `success` instead of `found`; `found` wins
/// when both are present.
#[derive(Deserialize)]
struct RawRecognition {
    found: Option<bool>,
    success: Option<bool>,
    student: Option<StudentRecord>,
    #[serde(alias = "similarity_score")]
    similarity: Option<f64>,
    confidence: Option<ConfidenceLabel>,
    message: Option<String>,
    #[serde(alias = "processing_time_seconds")]
    processing_time: Option<f64>,
}

impl From<RawRecognition> for RecognitionResult {
    fn from(raw: RawRecognition) -> Self {
        Self {
            found: raw.found.or(raw.success).unwrap_or(false),
            student: raw.student,
            similarity: raw.similarity.unwrap_or(0.0).clamp(0.0, 1.0),
            confidence: raw.confidence.unwrap_or_default(),
            message: raw.message.unwrap_or_default(),
            processing_time: raw.processing_time,
        }
    }
}

impl<'de> Deserialize<'de> for RecognitionResult {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(RawRecognition::deserialize(deserializer)?.into())
    }
}

/// Aggregate recognition counters. The stats fetch is non-critical and
/// degrades to [`RecognitionStats::default`] (all zeroes) on any failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionStats {
    pub total_recognitions: u64,
    pub successful_recognitions: u64,
    pub failed_recognitions: u64,
    pub success_rate: f64,
    pub average_processing_time: f64,
    pub total_students: u64,
}

/// One entry of the backend's recognition audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionLogEntry {
    pub id: i64,
    pub found: bool,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub student: Option<StudentRecord>,
    #[serde(default)]
    pub similarity: f64,
    #[serde(default)]
    pub confidence: ConfidenceLabel,
    #[serde(default)]
    pub processing_time: f64,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Backend reachability snapshot. Deployments differ in which diagnostic
/// fields they include; only `status` is guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub students_loaded: Option<u64>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
