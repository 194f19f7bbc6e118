//! Telemetry and structured logging components for FormScan.
//!
//! Handles subscriber setup, NDJSON file rotation, log redaction, and
//! per-request scan event logging.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{ScanEvent, ScanEventEntry, ScanEventLogger, ScanMode};
pub use logger::{init_logger, LoggerOptions};
pub use redact::redact_sensitive_data;
