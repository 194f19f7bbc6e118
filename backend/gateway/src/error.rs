//! HTTP error mapping.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use formscan_core::ScanError;
use serde::{Deserialize, Serialize};

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
    pub status_code: u16,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error_type: error_type.into(),
                message: message.into(),
                status_code: status.as_u16(),
            },
        }
    }

    /// Multipart parse failures keep axum's status (413 for oversized bodies).
    pub fn multipart(err: MultipartError) -> Self {
        let status = err.status();
        let error = ScanError::Upload(err.body_text());
        Self::new(status, error.kind(), error.to_string())
    }
}

pub fn status_for(error: &ScanError) -> StatusCode {
    match error {
        ScanError::Provider { .. }
        | ScanError::InvalidField(_)
        | ScanError::MissingDocument
        | ScanError::Upload(_) => StatusCode::BAD_REQUEST,
        ScanError::UnsupportedDocument(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ScanError::SampleUnavailable(_) | ScanError::ConfigError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<ScanError> for ApiError {
    fn from(error: ScanError) -> Self {
        Self::new(status_for(&error), error.kind(), error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&ScanError::InvalidField("RG".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ScanError::provider("textract", "AccessDenied")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ScanError::UnsupportedDocument("image/gif".into())),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            status_for(&ScanError::SampleUnavailable("gone".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&ScanError::ConfigError("missing provider setting: region".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body() {
        let err = ApiError::from(ScanError::InvalidField("RG".into()));
        assert_eq!(err.body.error_type, "InvalidField");
        assert_eq!(err.body.status_code, 400);
        assert!(err.body.message.contains("RG"));
    }
}
