pub mod block;
pub mod document;
pub mod error;
pub mod graph;
pub mod service;
pub mod traits;
pub mod wire;

pub use block::{Block, BlockKind, EntityRole, Relationship, RelationshipKind, SelectionStatus};
pub use document::DocumentFormat;
pub use error::{Result, ScanError};
pub use graph::{join_lines, resolve_key_values, BlockGraph, KeyValueResult};
pub use service::{check_document, Extraction, ExtractionService};
pub use traits::DocumentAnalyzer;
pub use wire::WireResponse;
