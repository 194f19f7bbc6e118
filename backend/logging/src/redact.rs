//! Log Redaction
//!
//! Scrubs AWS credentials and bearer tokens from strings prior to logging.
//! Provider error messages can echo request headers, so they pass through
//! here before they reach a log line.

use regex::Regex;
use std::sync::LazyLock;

static ACCESS_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:AKIA|ASIA)[0-9A-Z]{16}\b").expect("valid access key regex"));
static SIGNATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Signature=[0-9a-f]{64}").expect("valid signature regex"));
static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").expect("valid bearer regex"));

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = ACCESS_KEY_RE.replace_all(input, "[REDACTED_ACCESS_KEY]");
    let redacted = SIGNATURE_RE.replace_all(&redacted, "Signature=[REDACTED]");
    BEARER_RE.replace_all(&redacted, "[REDACTED_TOKEN]").into_owned()
}
