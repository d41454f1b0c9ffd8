//! Recognize a face photo against the enrolled roster
//!
//! Sends one photo to the recognition endpoint, prints the match outcome and
//! the backend's aggregate statistics. An attempt observer on stdout shows
//! how the call behaves when the backend is flaky.
//!
//! Usage:
//!   ROSTRO_BASE_URL=http://localhost:8000 cargo run --example recognize_photo -- face.jpg

use std::sync::Arc;

use rostro_client::telemetry::{AttemptObserver, AttemptRecord};
use rostro_client::{Photo, RostroClient};

struct StdoutObserver;

impl AttemptObserver for StdoutObserver {
    fn on_attempt(&self, record: &AttemptRecord) {
        println!(
            "  [{} {}] attempt {}/{}: {:?} in {:?}",
            record.method, record.path, record.attempt, record.max_attempts, record.outcome,
            record.elapsed
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("rostro_client=info")
        .init();

    let base_url =
        std::env::var("ROSTRO_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let photo_path = std::env::args()
        .nth(1)
        .ok_or("usage: recognize_photo <photo-file>")?;
    let bytes = std::fs::read(&photo_path)?;
    let photo = if photo_path.ends_with(".png") {
        Photo::png(bytes)
    } else {
        Photo::jpeg(bytes)
    };

    let client = RostroClient::builder()
        .base_url(&base_url)
        .attempt_observer(Arc::new(StdoutObserver))
        .build()?;

    println!("Recognizing {photo_path} against {base_url} ...");
    match client.recognize(photo).await {
        Ok(result) if result.found => {
            let name = result
                .student
                .as_ref()
                .map(|s| s.full_name())
                .unwrap_or_else(|| "<unnamed>".to_string());
            println!(
                "Match: {name} (similarity {:.2}, confidence {})",
                result.similarity, result.confidence
            );
            if let Some(student) = &result.student {
                if student.flagged {
                    println!("NOTE: this student is flagged.");
                }
            }
        }
        Ok(result) => {
            println!(
                "No match (best similarity {:.2}): {}",
                result.similarity, result.message
            );
        }
        Err(err) => {
            eprintln!("Recognition failed: {}", err.user_message());
            return Err(err.into());
        }
    }

    let stats = client.recognition_stats().await;
    println!(
        "Backend totals: {} recognitions, {} successful ({:.1}% success rate)",
        stats.total_recognitions, stats.successful_recognitions, stats.success_rate
    );

    Ok(())
}
