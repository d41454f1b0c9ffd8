use bytes::Bytes;

use crate::{Error, Result};

/// Formats the backend accepts for photo uploads.
const ACCEPTED_FORMATS: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/bmp",
    "image/webp",
];

/// Binary photograph attached to enrollment and recognition uploads.
///
/// The payload is reference-counted ([`Bytes`]), so rebuilding the multipart
/// form for a retry attempt does not copy the image data. Accepted formats
/// mirror the backend: JPEG, PNG, BMP and WEBP.
#[derive(Debug, Clone)]
pub struct Photo {
    pub(crate) bytes: Bytes,
    pub(crate) file_name: String,
    pub(crate) mime_type: String,
}

impl Photo {
    pub fn new(
        bytes: impl Into<Bytes>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// JPEG payload with a generic file name.
    pub fn jpeg(bytes: impl Into<Bytes>) -> Self {
        Self::new(bytes, "photo.jpg", "image/jpeg")
    }

    /// PNG payload with a generic file name.
    pub fn png(bytes: impl Into<Bytes>) -> Self {
        Self::new(bytes, "photo.png", "image/png")
    }

    /// Local checks applied before any network call. Failures here are
    /// deterministic and never retried.
    pub fn validate(&self) -> Result<()> {
        if self.bytes.is_empty() {
            return Err(Error::validation("photo must not be empty"));
        }
        if !ACCEPTED_FORMATS.contains(&self.mime_type.as_str()) {
            return Err(Error::validation(format!(
                "unsupported photo format '{}'",
                self.mime_type
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}
