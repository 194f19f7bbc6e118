//! CLI Config Commands
//!
//! `init` writes a starter config file; `config` prints the effective
//! settings with secrets masked.

use std::path::Path;

use anyhow::{bail, Result};
use formscan_config::{
    apply_all_defaults, collect_redacted_paths, redacted_config, write_config, FormScanConfig, ProviderConfig,
};

use crate::config::Config;

/// Default region written by `init`; credentials come from the environment.
const STARTER_REGION: &str = "us-east-1";

pub fn starter_config() -> FormScanConfig {
    apply_all_defaults(FormScanConfig {
        provider: Some(ProviderConfig {
            region: Some(STARTER_REGION.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    })
}

pub async fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    write_config(&starter_config(), path).await?;
    println!("Wrote {}", path.display());
    println!("Set ACCESS_KEY_ID and SECRET_ACCESS_KEY before running `formscan serve`.");
    Ok(())
}

pub fn show(config: &Config) -> Result<()> {
    let snapshot = redacted_config(&config.file);
    println!("# {}", config.path.display());
    let masked = collect_redacted_paths(&snapshot);
    if !masked.is_empty() {
        println!("# masked: {}", masked.join(", "));
    }
    println!("{}", serde_yaml::to_string(&snapshot)?);

    for warning in &config.report.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &config.report.errors {
        println!("error: {}: {}", error.path, error.message);
    }
    if config.report.is_valid() {
        println!("Config OK");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_config_has_defaults() {
        let cfg = starter_config();
        assert_eq!(cfg.provider().region.as_deref(), Some(STARTER_REGION));
        assert_eq!(cfg.server().port, Some(formscan_config::defaults::DEFAULT_PORT));
        assert!(cfg.provider().access_key_id.is_none());
    }

    #[tokio::test]
    async fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        init(&path, false).await.unwrap();
        assert!(path.exists());
        assert!(init(&path, false).await.is_err());
        init(&path, true).await.unwrap();
        assert!(path.with_extension("yaml.bak.1").exists());
    }

    #[tokio::test]
    async fn init_replaces_config_that_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "provider:\n  region: ${FORMSCAN_TEST_UNSET_REGION_VAR}\n",
        )
        .unwrap();

        assert!(Config::load(Some(&path)).await.is_err());

        init(&crate::config::config_path(Some(&path)), true).await.unwrap();
        assert!(Config::load(Some(&path)).await.is_ok());
    }
}
