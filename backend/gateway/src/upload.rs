//! Multipart upload reader.
//!
//! Requests send the document in a `file` form field. Requests that are not
//! multipart at all are treated as carrying no upload.

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use bytes::Bytes;
use tracing::debug;

use crate::error::ApiError;

pub const FILE_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct Upload {
    pub bytes: Bytes,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

/// Pull the `file` field out of the request, ignoring any other fields.
pub async fn read_upload(request: Request) -> Result<Option<Upload>, ApiError> {
    if !is_multipart(&request) {
        return Ok(None);
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|rejection| {
            ApiError::from(formscan_core::ScanError::Upload(rejection.body_text()))
        })?;

    while let Some(field) = multipart.next_field().await.map_err(ApiError::multipart)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(ApiError::multipart)?;

        debug!(
            file_name = file_name.as_deref().unwrap_or("<none>"),
            content_type = content_type.as_deref().unwrap_or("<none>"),
            bytes = bytes.len(),
            "Received upload"
        );
        return Ok(Some(Upload {
            bytes,
            file_name,
            content_type,
        }));
    }

    Ok(None)
}
