//! Recognition, statistics and audit-trail operations.

use reqwest::Method;
use tracing::warn;

use crate::client::core::{decode, RostroClient};
use crate::transport::http::FormBody;
use crate::types::{Photo, RecognitionLogEntry, RecognitionResult, RecognitionStats, RosterPage};
use crate::Result;

impl RostroClient {
    /// Submit a photograph for identification against the roster.
    /// `POST /api/recognize`. Server-side inference can legitimately run for
    /// a long time, so this call uses the upload budget.
    pub async fn recognize(&self, photo: Photo) -> Result<RecognitionResult> {
        photo.validate()?;
        let spec = self.upload(Method::POST, "/api/recognize", FormBody::with_photo(photo));
        decode(self.execute(spec).await?)
    }

    /// Aggregate recognition counters. `GET /api/recognition/stats`.
    ///
    /// Non-critical read: any failure degrades to
    /// [`RecognitionStats::default`] (all zeroes) instead of propagating, so
    /// callers need no special-case handling.
    pub async fn recognition_stats(&self) -> RecognitionStats {
        let spec = self.quick(Method::GET, "/api/recognition/stats");
        match self.execute(spec).await.and_then(decode) {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, "stats fetch failed, returning zeroed defaults");
                RecognitionStats::default()
            }
        }
    }

    /// Recent recognition attempts, newest first.
    /// `GET /api/recognition/logs`.
    pub async fn recognition_logs(&self, page: &RosterPage) -> Result<Vec<RecognitionLogEntry>> {
        let mut spec = self.quick(Method::GET, "/api/recognition/logs");
        spec.query = page.query();
        decode(self.execute(spec).await?)
    }
}
