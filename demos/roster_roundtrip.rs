//! Roster round trip against a running backend
//!
//! Checks backend health, enrolls a student with a reference photo, reads the
//! record back by id and by code, applies a partial update and finally removes
//! the student again.
//!
//! Usage:
//!   ROSTRO_BASE_URL=http://localhost:8000 cargo run --example roster_roundtrip -- photo.jpg

use rostro_client::{NewStudent, Photo, RosterPage, RostroClient, StudentUpdate};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing to see per-attempt events
    tracing_subscriber::fmt()
        .with_env_filter("rostro_client=debug")
        .init();

    let base_url =
        std::env::var("ROSTRO_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let photo_path = std::env::args()
        .nth(1)
        .ok_or("usage: roster_roundtrip <photo-file>")?;
    let photo = photo_from_path(&photo_path)?;

    let client = RostroClient::builder().base_url(&base_url).build()?;

    let health = client.health().await?;
    println!(
        "Backend at {base_url}: status={} students_loaded={:?}",
        health.status, health.students_loaded
    );
    if !health.is_healthy() {
        eprintln!("Warning: backend does not report healthy, continuing anyway.");
    }

    let enrollment = NewStudent::new("Ana María", "Quispe Rojas", "demo-0456", "ana.demo@uni.edu");
    let stored = client.create_student(&enrollment, photo).await?;
    println!(
        "Enrolled {} as #{} (code {})",
        stored.full_name(),
        stored.id,
        stored.code
    );
    println!("Photo served from {}", client.student_image_url(stored.id));

    let by_code = client.student_by_code(&stored.code).await?;
    println!("Lookup by code found #{}", by_code.id);

    let page = client.list_students(&RosterPage::default()).await?;
    println!("Roster currently holds {} students", page.len());

    let change = StudentUpdate::new().email("ana.quispe@alumni.edu");
    let updated = client.update_student(stored.id, &change, None).await?;
    println!(
        "Updated email to {}",
        updated.email.as_deref().unwrap_or("(none)")
    );

    client.delete_student(stored.id).await?;
    println!("Removed #{} again", stored.id);

    Ok(())
}

fn photo_from_path(path: &str) -> Result<Photo, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)?;
    let photo = if path.ends_with(".png") {
        Photo::png(bytes)
    } else {
        Photo::jpeg(bytes)
    };
    Ok(photo)
}
