//! Scan Event Logger
//!
//! One structured event per extraction request, emitted on the
//! `scan_events` target so it can be routed to its own sink.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::redact::redact_sensitive_data;

/// Which extraction mode a request ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    Forms,
    Filter,
    Lines,
    Sample,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ScanEvent {
    Completed {
        mode: ScanMode,
        document_bytes: usize,
        /// Fields returned (1 for a filter hit, line count in line mode)
        items: usize,
        latency_ms: u64,
    },
    Failed {
        mode: ScanMode,
        error_type: String,
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct ScanEventEntry {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: ScanEvent,
}

pub struct ScanEventLogger;

impl ScanEventLogger {
    /// Log a request's outcome, redacting error text first.
    pub fn log_event(request_id: Uuid, mut event: ScanEvent) -> ScanEventEntry {
        if let ScanEvent::Failed { error_msg, .. } = &mut event {
            *error_msg = redact_sensitive_data(error_msg);
        }

        let entry = ScanEventEntry {
            request_id,
            timestamp: Utc::now(),
            event,
        };

        let payload = serde_json::to_string(&entry).unwrap_or_default();
        match entry.event {
            ScanEvent::Completed { .. } => {
                info!(target: "scan_events", request_id = %request_id, event = %payload, "Scan completed")
            }
            ScanEvent::Failed { .. } => {
                warn!(target: "scan_events", request_id = %request_id, event = %payload, "Scan failed")
            }
        }
        entry
    }
}
