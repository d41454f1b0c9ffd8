//! Roster entities and their wire-shape normalization.
//!
//! The backend speaks Spanish on the wire. Canonical fields map as follows:
//!
//! | Canonical | Wire | Notes |
//! |-----------|------|-------|
//! | `given_name` | `nombre` | |
//! | `family_name` | `apellidos` | |
//! | `code` | `codigo` | uppercased on decode and before dispatch |
//! | `email` | `correo` | some deployments send `email`; null on legacy records |
//! | `flagged` | `requisitoriado` | defaults to false when absent |
//! | `photo_path` | `imagen_path` | stored reference image, optional |

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Canonical record for an enrolled student. The backend is the sole source
/// of truth; instances only exist as decoded responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Server-assigned, immutable once created.
    pub id: i64,
    #[serde(rename = "nombre")]
    pub given_name: String,
    #[serde(rename = "apellidos")]
    pub family_name: String,
    /// Unique within the roster, always uppercase.
    #[serde(rename = "codigo", deserialize_with = "uppercase_code")]
    pub code: String,
    /// Nullable on the backend; records enrolled with an unusable address
    /// come back without one.
    #[serde(rename = "correo", alias = "email", default)]
    pub email: Option<String>,
    /// Marks a special-status individual surfaced prominently on recognition.
    #[serde(rename = "requisitoriado", default)]
    pub flagged: bool,
    /// Reference to the stored photograph, when the backend reports one.
    #[serde(rename = "imagen_path", alias = "photo_path", default)]
    pub photo_path: Option<String>,
    /// Server timestamp, passed through verbatim for display.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl StudentRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

fn uppercase_code<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_uppercase())
}

/// Fields for enrolling a new student. The reference photograph travels
/// separately and is required by the create operation's signature.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub given_name: String,
    pub family_name: String,
    pub code: String,
    pub email: String,
    pub flagged: bool,
}

impl NewStudent {
    pub fn new(
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        code: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            given_name: given_name.into(),
            family_name: family_name.into(),
            code: code.into(),
            email: email.into(),
            flagged: false,
        }
    }

    pub fn flagged(mut self, flagged: bool) -> Self {
        self.flagged = flagged;
        self
    }

    /// Local checks applied before any network call.
    pub fn validate(&self) -> Result<()> {
        validate_required("given name", &self.given_name)?;
        validate_required("family name", &self.family_name)?;
        validate_required("student code", &self.code)?;
        validate_email(&self.email)
    }

    pub(crate) fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("nombre".to_string(), self.given_name.trim().to_string()),
            ("apellidos".to_string(), self.family_name.trim().to_string()),
            ("codigo".to_string(), self.code.trim().to_uppercase()),
            ("correo".to_string(), self.email.trim().to_string()),
            ("requisitoriado".to_string(), self.flagged.to_string()),
        ]
    }
}

/// Partial update for an existing student. Only the fields set here are sent;
/// a replacement photograph, when any, travels separately.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub code: Option<String>,
    pub email: Option<String>,
    pub flagged: Option<bool>,
}

impl StudentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn given_name(mut self, value: impl Into<String>) -> Self {
        self.given_name = Some(value.into());
        self
    }

    pub fn family_name(mut self, value: impl Into<String>) -> Self {
        self.family_name = Some(value.into());
        self
    }

    pub fn code(mut self, value: impl Into<String>) -> Self {
        self.code = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn flagged(mut self, value: bool) -> Self {
        self.flagged = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.given_name.is_none()
            && self.family_name.is_none()
            && self.code.is_none()
            && self.email.is_none()
            && self.flagged.is_none()
    }

    /// Local checks for the fields actually present.
    pub fn validate(&self) -> Result<()> {
        if let Some(value) = &self.given_name {
            validate_required("given name", value)?;
        }
        if let Some(value) = &self.family_name {
            validate_required("family name", value)?;
        }
        if let Some(value) = &self.code {
            validate_required("student code", value)?;
        }
        if let Some(value) = &self.email {
            validate_email(value)?;
        }
        Ok(())
    }

    pub(crate) fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        if let Some(value) = &self.given_name {
            fields.push(("nombre".to_string(), value.trim().to_string()));
        }
        if let Some(value) = &self.family_name {
            fields.push(("apellidos".to_string(), value.trim().to_string()));
        }
        if let Some(value) = &self.code {
            fields.push(("codigo".to_string(), value.trim().to_uppercase()));
        }
        if let Some(value) = &self.email {
            fields.push(("correo".to_string(), value.trim().to_string()));
        }
        if let Some(value) = self.flagged {
            fields.push(("requisitoriado".to_string(), value.to_string()));
        }
        fields
    }
}

fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn validate_email(value: &str) -> Result<()> {
    if !value.trim().contains('@') {
        return Err(Error::validation("email must contain '@'"));
    }
    Ok(())
}

/// Pagination window for roster and log listings. The backend accepts
/// `skip >= 0` and `1 <= limit <= 1000` and applies its own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterPage {
    pub skip: u32,
    pub limit: u32,
}

impl Default for RosterPage {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
        }
    }
}

impl RosterPage {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    pub(crate) fn query(&self) -> Vec<(String, String)> {
        vec![
            ("skip".to_string(), self.skip.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_spanish_wire_shape() {
        let record: StudentRecord = serde_json::from_str(
            r#"{
                "id": 7,
                "nombre": "Lucía",
                "apellidos": "Ramos Vega",
                "codigo": "est-0417",
                "correo": "lucia.ramos@uni.edu.pe",
                "requisitoriado": true,
                "imagen_path": "storage/students/7.jpg",
                "created_at": "2024-05-02T10:14:00"
            }"#,
        )
        .unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.given_name, "Lucía");
        assert_eq!(record.family_name, "Ramos Vega");
        assert_eq!(record.code, "EST-0417");
        assert_eq!(record.email.as_deref(), Some("lucia.ramos@uni.edu.pe"));
        assert!(record.flagged);
        assert_eq!(record.photo_path.as_deref(), Some("storage/students/7.jpg"));
        assert_eq!(record.full_name(), "Lucía Ramos Vega");
    }

    #[test]
    fn accepts_english_field_variants() {
        let record: StudentRecord = serde_json::from_str(
            r#"{
                "id": 3,
                "nombre": "Marco",
                "apellidos": "Quispe",
                "codigo": "EST-0001",
                "email": "marco@uni.edu.pe",
                "photo_path": "storage/students/3.jpg"
            }"#,
        )
        .unwrap();
        assert_eq!(record.email.as_deref(), Some("marco@uni.edu.pe"));
        assert_eq!(record.photo_path.as_deref(), Some("storage/students/3.jpg"));
        assert!(!record.flagged);
        assert!(record.created_at.is_none());
    }

    #[test]
    fn tolerates_records_without_email() {
        let record: StudentRecord = serde_json::from_str(
            r#"{"id": 9, "nombre": "Iván", "apellidos": "Soto", "codigo": "EST-9", "correo": null}"#,
        )
        .unwrap();
        assert_eq!(record.email, None);

        let record: StudentRecord = serde_json::from_str(
            r#"{"id": 10, "nombre": "Rosa", "apellidos": "Díaz", "codigo": "EST-10"}"#,
        )
        .unwrap();
        assert_eq!(record.email, None);
    }

    #[test]
    fn new_student_wire_fields() {
        let student = NewStudent::new("Ana", "Torres", "est-99", "ana@uni.edu.pe").flagged(true);
        let fields = student.form_fields();
        assert!(fields.contains(&("nombre".to_string(), "Ana".to_string())));
        assert!(fields.contains(&("codigo".to_string(), "EST-99".to_string())));
        assert!(fields.contains(&("requisitoriado".to_string(), "true".to_string())));
    }

    #[test]
    fn new_student_validation() {
        assert!(NewStudent::new("Ana", "Torres", "EST-1", "ana@uni.edu.pe")
            .validate()
            .is_ok());
        let err = NewStudent::new("  ", "Torres", "EST-1", "ana@uni.edu.pe")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("given name"));
        let err = NewStudent::new("Ana", "Torres", "EST-1", "ana.uni.edu.pe")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains('@'));
    }

    #[test]
    fn update_sends_only_present_fields() {
        let update = StudentUpdate::new().email("nuevo@uni.edu.pe").flagged(false);
        let fields = update.form_fields();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains(&("correo".to_string(), "nuevo@uni.edu.pe".to_string())));
        assert!(fields.contains(&("requisitoriado".to_string(), "false".to_string())));
        assert!(StudentUpdate::new().is_empty());
        assert!(!update.is_empty());
    }

    #[test]
    fn update_validates_present_fields_only() {
        assert!(StudentUpdate::new().validate().is_ok());
        let err = StudentUpdate::new().email("sin-arroba").validate().unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
