//! Config validation: schema checks with user-friendly error messages.

use crate::defaults::DEFAULT_MAX_UPLOAD_BYTES;
use crate::schema::FormScanConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &FormScanConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_provider(config, &mut report);
    validate_sample(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_server(config: &FormScanConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    if let Some(port) = server.port {
        if port == 0 {
            report.error("server.port", "port must be > 0");
        } else if port < 1024 && port != 80 && port != 443 {
            report.warn(
                "server.port",
                format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
            );
        }
    }
    if let Some(limit) = server.max_upload_bytes {
        if limit == 0 {
            report.error("server.maxUploadBytes", "maxUploadBytes must be > 0");
        } else if limit > DEFAULT_MAX_UPLOAD_BYTES {
            report.warn(
                "server.maxUploadBytes",
                "Textract rejects inline documents above 10 MiB; larger uploads will fail at the provider",
            );
        }
    }
}

/// The provider needs a region and a complete static credential pair.
fn validate_provider(config: &FormScanConfig, report: &mut ValidationReport) {
    let provider = config.provider();
    let is_blank = |v: &Option<String>| v.as_deref().map(str::trim).map_or(true, str::is_empty);

    if is_blank(&provider.region) {
        report.error("provider.region", "AWS region is required (set AWS_REGION)");
    }
    match (is_blank(&provider.access_key_id), is_blank(&provider.secret_access_key)) {
        (true, true) => report.error(
            "provider.accessKeyId",
            "AWS credentials are required (set ACCESS_KEY_ID and SECRET_ACCESS_KEY)",
        ),
        (true, false) => report.error(
            "provider.accessKeyId",
            "secretAccessKey is set but accessKeyId is missing",
        ),
        (false, true) => report.error(
            "provider.secretAccessKey",
            "accessKeyId is set but secretAccessKey is missing",
        ),
        (false, false) => {}
    }
    if let Some(url) = &provider.endpoint_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            report.error("provider.endpointUrl", format!("'{url}' is not an http(s) URL"));
        }
    }
    if provider.timeout_secs == Some(0) {
        report.error("provider.timeoutSecs", "timeoutSecs must be > 0");
    }
}

fn validate_sample(config: &FormScanConfig, report: &mut ValidationReport) {
    let Some(path) = config.sample_path() else { return };
    if !std::path::Path::new(path).exists() {
        report.warn(
            "sample.path",
            format!("Sample document '{path}' not found; requests without an upload will fail"),
        );
    }
}

fn validate_logging(config: &FormScanConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else {
        return;
    };
    let base = level.split(',').next().unwrap_or_default().trim();
    if !base.contains('=')
        && !matches!(
            base.to_ascii_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        )
    {
        report.warn("logging.level", format!("Unknown log level '{level}'"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ProviderConfig, ServerConfig};

    fn with_credentials() -> FormScanConfig {
        FormScanConfig {
            provider: Some(ProviderConfig {
                region: Some("us-east-1".into()),
                access_key_id: Some("AKIAEXAMPLE".into()),
                secret_access_key: Some("secret".into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn complete_provider_is_valid() {
        let report = validate(&with_credentials());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    #[test]
    fn missing_provider_is_error() {
        let report = validate(&FormScanConfig::default());
        assert!(!report.is_valid());
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"provider.region"));
        assert!(paths.contains(&"provider.accessKeyId"));
    }

    #[test]
    fn secret_without_key_id_is_error() {
        let mut cfg = with_credentials();
        cfg.provider.as_mut().unwrap().access_key_id = None;
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].message.contains("accessKeyId is missing"));
    }

    #[test]
    fn zero_port_is_error_and_large_upload_warns() {
        let mut cfg = with_credentials();
        cfg.server = Some(ServerConfig {
            port: Some(0),
            max_upload_bytes: Some(50 * 1024 * 1024),
            ..Default::default()
        });
        let report = validate(&cfg);
        assert_eq!(report.errors[0].path, "server.port");
        assert_eq!(report.warnings[0].path, "server.maxUploadBytes");
    }

    #[test]
    fn bad_endpoint_url_is_error() {
        let mut cfg = with_credentials();
        cfg.provider.as_mut().unwrap().endpoint_url = Some("localhost:4566".into());
        let report = validate(&cfg);
        assert_eq!(report.errors[0].path, "provider.endpointUrl");
    }
}
