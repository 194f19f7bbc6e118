//! Config defaults: applies default values to parsed config.

use crate::schema::{FormScanConfig, LoggingConfig, ProviderConfig, SampleConfig, ServerConfig};

pub const DEFAULT_BIND: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 3000;

/// Textract's limit for documents sent inline as bytes.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_SAMPLE_PATH: &str = "./assets/BoletoBancario.png";

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: FormScanConfig) -> FormScanConfig {
    let config = apply_server_defaults(config);
    let config = apply_provider_defaults(config);
    let config = apply_sample_defaults(config);
    apply_logging_defaults(config)
}

fn apply_server_defaults(mut config: FormScanConfig) -> FormScanConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    server.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    server.max_upload_bytes.get_or_insert(DEFAULT_MAX_UPLOAD_BYTES);
    server.cors.get_or_insert(true);
    config
}

fn apply_provider_defaults(mut config: FormScanConfig) -> FormScanConfig {
    let provider = config.provider.get_or_insert_with(ProviderConfig::default);
    provider.timeout_secs.get_or_insert(DEFAULT_PROVIDER_TIMEOUT_SECS);
    config
}

fn apply_sample_defaults(mut config: FormScanConfig) -> FormScanConfig {
    let sample = config.sample.get_or_insert_with(SampleConfig::default);
    sample.path.get_or_insert_with(|| DEFAULT_SAMPLE_PATH.to_string());
    config
}

fn apply_logging_defaults(mut config: FormScanConfig) -> FormScanConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    logging.json.get_or_insert(false);
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_server_defaults() {
        let cfg = apply_all_defaults(FormScanConfig::default());
        let server = cfg.server();
        assert_eq!(server.bind.as_deref(), Some(DEFAULT_BIND));
        assert_eq!(server.port, Some(DEFAULT_PORT));
        assert_eq!(server.max_upload_bytes, Some(DEFAULT_MAX_UPLOAD_BYTES));
    }

    #[test]
    fn applies_sample_and_logging_defaults() {
        let cfg = apply_all_defaults(FormScanConfig::default());
        assert_eq!(cfg.sample_path(), Some(DEFAULT_SAMPLE_PATH));
        assert_eq!(cfg.logging().level.as_deref(), Some("info"));
        assert!(cfg.logging().dir.is_none());
    }

    #[test]
    fn does_not_override_user_settings() {
        let mut cfg = FormScanConfig::default();
        cfg.server = Some(ServerConfig {
            port: Some(8080),
            ..Default::default()
        });
        let cfg = apply_all_defaults(cfg);
        assert_eq!(cfg.server().port, Some(8080));
        assert_eq!(cfg.provider().timeout_secs, Some(DEFAULT_PROVIDER_TIMEOUT_SECS));
    }

    #[test]
    fn credentials_have_no_default() {
        let cfg = apply_all_defaults(FormScanConfig::default());
        assert!(cfg.provider().region.is_none());
        assert!(cfg.provider().access_key_id.is_none());
    }
}
