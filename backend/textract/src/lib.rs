//! AWS Textract provider for FormScan.
//!
//! Implements [`formscan_core::DocumentAnalyzer`] on top of `aws-sdk-textract`
//! and converts the SDK's block graph into the core block model.

pub mod client;
pub mod convert;

pub use client::{TextractAnalyzer, TextractConfigError};
pub use convert::{convert_block, convert_blocks};
