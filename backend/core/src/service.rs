//! Request orchestration: document bytes in, form fields or text lines out.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::document::{describe_unknown, DocumentFormat};
use crate::error::{Result, ScanError};
use crate::graph::{join_lines, BlockGraph, KeyValueResult};
use crate::traits::DocumentAnalyzer;

/// Result of a forms-mode extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Extraction {
    /// Every resolved form field.
    Fields(KeyValueResult),
    /// The value of the single field that was asked for.
    Field(String),
}

/// Runs one provider round trip per call and resolves the response.
///
/// Holds no per-request state and can be shared across tasks behind an `Arc`.
pub struct ExtractionService {
    analyzer: Arc<dyn DocumentAnalyzer>,
    sample_path: Option<PathBuf>,
}

impl std::fmt::Debug for ExtractionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionService")
            .field("provider", &self.analyzer.name())
            .field("sample_path", &self.sample_path)
            .finish()
    }
}

impl ExtractionService {
    pub fn new(analyzer: Arc<dyn DocumentAnalyzer>) -> Self {
        Self {
            analyzer,
            sample_path: None,
        }
    }

    /// Document analysed when a request carries no upload.
    pub fn with_sample(mut self, path: impl Into<PathBuf>) -> Self {
        self.sample_path = Some(path.into());
        self
    }

    pub fn provider(&self) -> &str {
        self.analyzer.name()
    }

    pub fn sample_path(&self) -> Option<&Path> {
        self.sample_path.as_deref()
    }

    /// Read the configured sample document.
    pub async fn load_sample(&self) -> Result<Bytes> {
        let path = self
            .sample_path
            .as_deref()
            .ok_or_else(|| ScanError::SampleUnavailable("no sample document configured".into()))?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ScanError::SampleUnavailable(format!("{}: {e}", path.display())))?;

        debug!(path = %path.display(), bytes = bytes.len(), "Loaded sample document");
        Ok(Bytes::from(bytes))
    }

    /// Forms mode.
    ///
    /// Without a document the sample is analysed. With a filter only that
    /// field's value is returned, or [`ScanError::InvalidField`] when the
    /// mapping has no such key.
    pub async fn extract(&self, document: Option<Bytes>, filter: Option<&str>) -> Result<Extraction> {
        let document = match document {
            Some(document) => document,
            None => self.load_sample().await?,
        };

        let mut fields = self.key_values(&document).await?;

        match filter {
            Some(field) => fields
                .swap_remove(field)
                .map(Extraction::Field)
                .ok_or_else(|| {
                    warn!(field = %field, available = fields.len(), "Requested field not found");
                    ScanError::InvalidField(field.to_string())
                }),
            None => Ok(Extraction::Fields(fields)),
        }
    }

    /// Analyse a document for forms and resolve its key/value pairs.
    pub async fn key_values(&self, document: &[u8]) -> Result<KeyValueResult> {
        let format = check_document(document)?;
        let start = Instant::now();

        let blocks = self.analyzer.analyze_forms(document).await?;
        let graph = BlockGraph::index(&blocks);
        let fields = graph.key_values();

        info!(
            provider = %self.provider(),
            format = %format,
            bytes = document.len(),
            blocks = graph.len(),
            fields = fields.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Resolved form fields"
        );
        Ok(fields)
    }

    /// Line mode: detected LINE texts joined with newlines.
    pub async fn lines(&self, document: &[u8]) -> Result<String> {
        let format = check_document(document)?;
        let start = Instant::now();

        let blocks = self.analyzer.detect_lines(document).await?;
        let text = join_lines(&blocks);

        info!(
            provider = %self.provider(),
            format = %format,
            bytes = document.len(),
            blocks = blocks.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Detected text lines"
        );
        Ok(text)
    }
}

/// Reject empty or unsupported documents before calling the provider.
pub fn check_document(document: &[u8]) -> Result<DocumentFormat> {
    if document.is_empty() {
        return Err(ScanError::MissingDocument);
    }
    DocumentFormat::sniff(document)
        .ok_or_else(|| ScanError::UnsupportedDocument(describe_unknown(document)))
}
