use async_trait::async_trait;

use crate::block::Block;
use crate::error::Result;

/// An external OCR service that turns document bytes into a block graph.
///
/// Implementations hold their own client configuration, fixed at
/// construction; calls never mutate shared state.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    /// Provider name (e.g., "textract").
    fn name(&self) -> &str;

    /// Analyse a document for form features, returning KEY_VALUE_SET,
    /// WORD and SELECTION_ELEMENT blocks among others.
    async fn analyze_forms(&self, document: &[u8]) -> Result<Vec<Block>>;

    /// Detect plain text, returning LINE blocks in reading order.
    async fn detect_lines(&self, document: &[u8]) -> Result<Vec<Block>>;
}
