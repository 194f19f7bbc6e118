use thiserror::Error;

/// Top-level error type for FormScan extraction.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("OCR provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    /// The requested form field is absent from the resolved mapping.
    #[error("invalid field: {0}")]
    InvalidField(String),

    #[error("no document provided")]
    MissingDocument,

    #[error("unsupported document type: {0}")]
    UnsupportedDocument(String),

    #[error("sample document unavailable: {0}")]
    SampleUnavailable(String),

    #[error("upload error: {0}")]
    Upload(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl ScanError {
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Stable, machine-readable name of the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Provider { .. } => "ProviderError",
            Self::InvalidField(_) => "InvalidField",
            Self::MissingDocument => "MissingDocument",
            Self::UnsupportedDocument(_) => "UnsupportedDocument",
            Self::SampleUnavailable(_) => "SampleUnavailable",
            Self::Upload(_) => "UploadError",
            Self::ConfigError(_) => "ConfigError",
        }
    }
}

pub type Result<T, E = ScanError> = std::result::Result<T, E>;
