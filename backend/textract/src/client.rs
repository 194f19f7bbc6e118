use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_textract::config::timeout::TimeoutConfig;
use aws_sdk_textract::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_textract::error::DisplayErrorContext;
use aws_sdk_textract::primitives::Blob;
use aws_sdk_textract::types::{Document, FeatureType};
use aws_sdk_textract::Client;
use tracing::{debug, error};

use formscan_config::ProviderConfig;
use formscan_core::{Block, DocumentAnalyzer, Result, ScanError};

use crate::convert::convert_blocks;

const PROVIDER_NAME: &str = "textract";

/// Errors building a Textract client from configuration.
#[derive(Debug, thiserror::Error)]
pub enum TextractConfigError {
    #[error("missing provider setting: {0}")]
    Missing(&'static str),
}

/// AWS Textract document analyzer.
///
/// Built from an explicit [`ProviderConfig`]; the ambient AWS credential
/// chain and shared config files are never consulted.
#[derive(Debug, Clone)]
pub struct TextractAnalyzer {
    client: Client,
    region: String,
}

impl TextractAnalyzer {
    pub fn new(config: &ProviderConfig) -> std::result::Result<Self, TextractConfigError> {
        let region = required(&config.region, "region")?;
        let access_key_id = required(&config.access_key_id, "accessKeyId")?;
        let secret_access_key = required(&config.secret_access_key, "secretAccessKey")?;

        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            config.session_token.clone(),
            None,
            "formscan-config",
        );

        let mut builder = aws_sdk_textract::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .credentials_provider(credentials);

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(Duration::from_secs(secs))
                    .build(),
            );
        }
        if let Some(url) = &config.endpoint_url {
            debug!(endpoint = %url, "Using custom Textract endpoint");
            builder = builder.endpoint_url(url);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            region,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn document(bytes: &[u8]) -> Document {
        Document::builder().bytes(Blob::new(bytes.to_vec())).build()
    }
}

fn required(value: &Option<String>, name: &'static str) -> std::result::Result<String, TextractConfigError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(TextractConfigError::Missing(name))
}

fn provider_error(operation: &str, err: impl std::error::Error) -> ScanError {
    let message = format!("{operation} failed: {}", DisplayErrorContext(&err));
    error!(provider = PROVIDER_NAME, operation, error = %message, "Textract call failed");
    ScanError::provider(PROVIDER_NAME, message)
}

#[async_trait]
impl DocumentAnalyzer for TextractAnalyzer {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn analyze_forms(&self, document: &[u8]) -> Result<Vec<Block>> {
        debug!(region = %self.region, bytes = document.len(), "Sending AnalyzeDocument (FORMS)");

        let output = self
            .client
            .analyze_document()
            .document(Self::document(document))
            .feature_types(FeatureType::Forms)
            .send()
            .await
            .map_err(|e| provider_error("AnalyzeDocument", e))?;

        Ok(convert_blocks(output.blocks()))
    }

    async fn detect_lines(&self, document: &[u8]) -> Result<Vec<Block>> {
        debug!(region = %self.region, bytes = document.len(), "Sending DetectDocumentText");

        let output = self
            .client
            .detect_document_text()
            .document(Self::document(document))
            .send()
            .await
            .map_err(|e| provider_error("DetectDocumentText", e))?;

        Ok(convert_blocks(output.blocks()))
    }
}
