use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::config::ClientConfig;
use crate::types::Photo;
use crate::{Error, Result};

/// Multipart form name the backend expects for binary photo parts.
const PHOTO_PART: &str = "image";

/// Structured body of an upload call: plain text fields plus at most one
/// binary photo part. Kept in this owned form so every retry attempt can
/// rebuild a fresh `multipart::Form` (forms are consumed on send).
#[derive(Debug, Clone, Default)]
pub(crate) struct FormBody {
    pub fields: Vec<(String, String)>,
    pub photo: Option<Photo>,
}

impl FormBody {
    pub fn with_photo(photo: Photo) -> Self {
        Self {
            fields: Vec::new(),
            photo: Some(photo),
        }
    }

    pub fn new(fields: Vec<(String, String)>, photo: Option<Photo>) -> Self {
        Self { fields, photo }
    }
}

/// Raw outcome of one dispatched attempt. Status classification and JSON
/// decoding happen in the retry loop, not here.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: String,
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self> {
        // No client-level timeout: the per-call budget in the retry loop is
        // the single source of truth for how long an attempt may run.
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(8)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` under the configured base.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one attempt and read the full body. Cancellation-safe: the
    /// caller races this future against its timeout budget and may drop it
    /// at any point, which aborts the in-flight request.
    pub(crate) async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&FormBody>,
        request_id: &str,
        attempt: u32,
    ) -> std::result::Result<RawResponse, TransportError> {
        let url = self.url_for(path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("x-request-id", request_id)
            .header("x-request-attempt", attempt.to_string());

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.multipart(multipart_form(body)?);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

/// Build a fresh multipart form. Forms are consumed on send, so every
/// attempt assembles its own; `Photo` bytes are reference-counted and the
/// rebuild never copies the image payload.
fn multipart_form(body: &FormBody) -> std::result::Result<Form, TransportError> {
    let mut form = Form::new();
    for (name, value) in &body.fields {
        form = form.text(name.clone(), value.clone());
    }
    if let Some(photo) = &body.photo {
        let length = photo.bytes.len() as u64;
        let part = Part::stream_with_length(reqwest::Body::from(photo.bytes.clone()), length)
            .file_name(photo.file_name.clone())
            .mime_str(&photo.mime_type)?;
        form = form.part(PHOTO_PART, part);
    }
    Ok(form)
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
