//! Roster operations: list, lookup, enroll, update, remove.

use reqwest::Method;
use tracing::debug;

use crate::client::core::{decode, RostroClient};
use crate::transport::http::FormBody;
use crate::types::{NewStudent, Photo, RosterPage, StudentRecord, StudentUpdate};
use crate::{Error, Result};

impl RostroClient {
    /// Fetch a roster page. `GET /api/students`.
    pub async fn list_students(&self, page: &RosterPage) -> Result<Vec<StudentRecord>> {
        let mut spec = self.quick(Method::GET, "/api/students");
        spec.query = page.query();
        decode(self.execute(spec).await?)
    }

    /// Fetch one student by server-assigned id. `GET /api/students/{id}`.
    pub async fn student(&self, id: i64) -> Result<StudentRecord> {
        let spec = self.quick(Method::GET, format!("/api/students/{id}"));
        decode(self.execute(spec).await?)
    }

    /// Look a student up by unique code. `GET /api/students/codigo/{code}`.
    /// The code is uppercased before dispatch, matching how the backend
    /// stores it.
    pub async fn student_by_code(&self, code: &str) -> Result<StudentRecord> {
        let code = code.trim().to_uppercase();
        let spec = self.quick(Method::GET, format!("/api/students/codigo/{code}"));
        decode(self.execute(spec).await?)
    }

    /// Enroll a student with exactly one reference photograph.
    /// `POST /api/students`. Local validation runs first, so malformed input
    /// never reaches the network.
    pub async fn create_student(&self, student: &NewStudent, photo: Photo) -> Result<StudentRecord> {
        student.validate()?;
        photo.validate()?;
        let body = FormBody::new(student.form_fields(), Some(photo));
        let spec = self.upload(Method::POST, "/api/students", body);
        decode(self.execute(spec).await?)
    }

    /// Apply a partial update, optionally replacing the reference
    /// photograph. `PUT /api/students/{id}`.
    pub async fn update_student(
        &self,
        id: i64,
        update: &StudentUpdate,
        photo: Option<Photo>,
    ) -> Result<StudentRecord> {
        update.validate()?;
        if update.is_empty() && photo.is_none() {
            return Err(Error::validation("update carries no changes"));
        }
        if let Some(photo) = &photo {
            photo.validate()?;
        }
        let body = FormBody::new(update.form_fields(), photo);
        let spec = self.upload(Method::PUT, format!("/api/students/{id}"), body);
        decode(self.execute(spec).await?)
    }

    /// Remove a student. `DELETE /api/students/{id}`. Resolves once the
    /// backend confirms; deleting an id twice yields a not-found rejection
    /// on the second call.
    pub async fn delete_student(&self, id: i64) -> Result<()> {
        let spec = self.quick(Method::DELETE, format!("/api/students/{id}"));
        let value = self.execute(spec).await?;
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            debug!(id, message, "student deleted");
        }
        Ok(())
    }
}
