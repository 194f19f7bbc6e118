//! Environment overrides applied on top of the config file.
//!
//! Provider credentials are read from the unprefixed `AWS_REGION`,
//! `ACCESS_KEY_ID` and `SECRET_ACCESS_KEY` variables.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::schema::{FormScanConfig, LoggingConfig, ProviderConfig, SampleConfig, ServerConfig};

pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_ACCESS_KEY_ID: &str = "ACCESS_KEY_ID";
pub const ENV_SECRET_ACCESS_KEY: &str = "SECRET_ACCESS_KEY";
pub const ENV_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const ENV_ENDPOINT_URL: &str = "TEXTRACT_ENDPOINT_URL";
pub const ENV_BIND: &str = "FORMSCAN_BIND";
pub const ENV_PORT: &str = "FORMSCAN_PORT";
pub const ENV_MAX_UPLOAD_BYTES: &str = "FORMSCAN_MAX_UPLOAD_BYTES";
pub const ENV_SAMPLE_PATH: &str = "FORMSCAN_SAMPLE_PATH";
pub const ENV_LOG_DIR: &str = "FORMSCAN_LOG_DIR";

/// Apply overrides from a provided map. Empty values are ignored.
pub fn apply_env_overrides_with(
    mut config: FormScanConfig,
    env: &HashMap<String, String>,
) -> FormScanConfig {
    let get = |name: &str| env.get(name).filter(|v| !v.trim().is_empty()).cloned();

    let provider = config.provider.get_or_insert_with(ProviderConfig::default);
    for (name, slot) in [
        (ENV_REGION, &mut provider.region),
        (ENV_ACCESS_KEY_ID, &mut provider.access_key_id),
        (ENV_SECRET_ACCESS_KEY, &mut provider.secret_access_key),
        (ENV_SESSION_TOKEN, &mut provider.session_token),
        (ENV_ENDPOINT_URL, &mut provider.endpoint_url),
    ] {
        if let Some(value) = get(name) {
            debug!(var = name, "Provider setting overridden from environment");
            *slot = Some(value);
        }
    }

    let server = config.server.get_or_insert_with(ServerConfig::default);
    if let Some(bind) = get(ENV_BIND) {
        server.bind = Some(bind);
    }
    if let Some(raw) = get(ENV_PORT) {
        match raw.parse() {
            Ok(port) => server.port = Some(port),
            Err(_) => warn!(var = ENV_PORT, value = %raw, "Ignoring non-numeric port override"),
        }
    }
    if let Some(raw) = get(ENV_MAX_UPLOAD_BYTES) {
        match raw.parse() {
            Ok(bytes) => server.max_upload_bytes = Some(bytes),
            Err(_) => warn!(var = ENV_MAX_UPLOAD_BYTES, value = %raw, "Ignoring invalid upload limit override"),
        }
    }

    if let Some(path) = get(ENV_SAMPLE_PATH) {
        config.sample.get_or_insert_with(SampleConfig::default).path = Some(path);
    }
    if let Some(dir) = get(ENV_LOG_DIR) {
        config.logging.get_or_insert_with(LoggingConfig::default).dir = Some(dir);
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn overrides_provider_credentials() {
        let cfg = apply_env_overrides_with(
            FormScanConfig::default(),
            &env(&[
                (ENV_REGION, "sa-east-1"),
                (ENV_ACCESS_KEY_ID, "AKIAEXAMPLE"),
                (ENV_SECRET_ACCESS_KEY, "shh"),
            ]),
        );
        let provider = cfg.provider();
        assert_eq!(provider.region.as_deref(), Some("sa-east-1"));
        assert_eq!(provider.access_key_id.as_deref(), Some("AKIAEXAMPLE"));
        assert_eq!(provider.secret_access_key.as_deref(), Some("shh"));
        assert!(provider.session_token.is_none());
    }

    #[test]
    fn empty_values_do_not_clobber_file_settings() {
        let mut cfg = FormScanConfig::default();
        cfg.provider = Some(ProviderConfig {
            region: Some("us-east-1".into()),
            ..Default::default()
        });
        let cfg = apply_env_overrides_with(cfg, &env(&[(ENV_REGION, "  ")]));
        assert_eq!(cfg.provider().region.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn bad_port_is_ignored() {
        let cfg = apply_env_overrides_with(
            FormScanConfig::default(),
            &env(&[(ENV_PORT, "http"), (ENV_BIND, "127.0.0.1")]),
        );
        assert_eq!(cfg.server().port, None);
        assert_eq!(cfg.server().bind.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn overrides_sample_and_log_dir() {
        let cfg = apply_env_overrides_with(
            FormScanConfig::default(),
            &env(&[(ENV_SAMPLE_PATH, "/srv/boleto.png"), (ENV_LOG_DIR, "/var/log/formscan")]),
        );
        assert_eq!(cfg.sample_path(), Some("/srv/boleto.png"));
        assert_eq!(cfg.logging().dir.as_deref(), Some("/var/log/formscan"));
    }
}
