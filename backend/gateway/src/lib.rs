//! FormScan HTTP API
//!
//! Multipart upload endpoints in front of [`formscan_core::ExtractionService`].

pub mod error;
pub mod handlers;
pub mod server;
pub mod types;
pub mod upload;

pub use error::{ApiError, ErrorResponse};
pub use server::{build_router, start_server, ApiState, ServerOptions};
pub use types::HealthResponse;
