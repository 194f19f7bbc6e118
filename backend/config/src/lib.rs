//! `formscan-config`: FormScan runtime configuration management.
//!
//! Provides:
//! - Typed config schema (server, OCR provider, sample document, logging)
//! - YAML read/write with atomic backup rotation
//! - `${ENV_VAR}` substitution
//! - Environment overrides for provider credentials and server settings
//! - Config redaction for safe logging/display
//! - Default value application
//! - Validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod overrides;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{collect_referenced_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, load_raw_config, write_config};
pub use overrides::apply_env_overrides_with;
pub use redact::{collect_redacted_paths, redact, redacted_config};
pub use schema::{FormScanConfig, LoggingConfig, ProviderConfig, SampleConfig, ServerConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Load, apply env substitution, env overrides and defaults to a config file.
///
/// This is the main entry point for loading a config at runtime. The
/// validation report is returned alongside so callers decide how strict to be.
pub async fn load_and_prepare(path: &Path) -> Result<(FormScanConfig, ValidationReport)> {
    let raw = load_raw_config(path).await?;
    prepare(raw, &std::env::vars().collect())
}

/// Pure half of [`load_and_prepare`], driven by an explicit environment.
pub fn prepare(
    raw: serde_json::Value,
    env: &HashMap<String, String>,
) -> Result<(FormScanConfig, ValidationReport)> {
    let referenced = collect_referenced_vars(&raw);
    if !referenced.is_empty() {
        tracing::debug!(vars = ?referenced, "Config references environment variables");
    }
    let value = resolve_env_vars_with(&raw, env).context("Failed to resolve env vars in config")?;

    let config: FormScanConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_env_overrides_with(config, env);
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }

    Ok((config, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn prepares_from_environment_only() {
        let (cfg, report) = prepare(
            json!({}),
            &env(&[
                ("AWS_REGION", "us-east-1"),
                ("ACCESS_KEY_ID", "AKIAEXAMPLE"),
                ("SECRET_ACCESS_KEY", "secret"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.provider().region.as_deref(), Some("us-east-1"));
        assert_eq!(cfg.server().port, Some(defaults::DEFAULT_PORT));
        assert!(report.is_valid(), "errors: {:?}", report.errors);
    }

    #[test]
    fn substitutes_then_overrides() {
        let raw = json!({
            "provider": { "region": "${TEXTRACT_REGION}", "accessKeyId": "file-key" },
            "server": { "port": 8080 }
        });
        let (cfg, _) = prepare(
            raw,
            &env(&[("TEXTRACT_REGION", "eu-west-1"), ("ACCESS_KEY_ID", "env-key")]),
        )
        .unwrap();
        assert_eq!(cfg.provider().region.as_deref(), Some("eu-west-1"));
        assert_eq!(cfg.provider().access_key_id.as_deref(), Some("env-key"));
        assert_eq!(cfg.server().port, Some(8080));
    }

    #[test]
    fn missing_substitution_var_fails() {
        let raw = json!({ "provider": { "region": "${UNSET_REGION}" } });
        assert!(prepare(raw, &HashMap::new()).is_err());
    }
}
