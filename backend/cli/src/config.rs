use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use formscan_config::{defaults, FormScanConfig, ValidationReport};
use formscan_core::{ExtractionService, ScanError};
use formscan_gateway::ServerOptions;
use formscan_textract::TextractAnalyzer;

/// Effective FormScan configuration for one CLI invocation.
#[derive(Debug)]
pub struct Config {
    /// File the settings were read from (it may not exist)
    pub path: PathBuf,
    pub file: FormScanConfig,
    pub report: ValidationReport,
}

impl Config {
    /// Load from `--config`, else `$FORMSCAN_CONFIG_DIR/config.yaml`, else
    /// `~/.formscan/config.yaml`.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let path = config_path(path);
        let (file, report) = formscan_config::load_and_prepare(&path)
            .await
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        Ok(Self { path, file, report })
    }

    pub fn log_level(&self) -> String {
        self.file
            .logging()
            .level
            .unwrap_or_else(|| defaults::DEFAULT_LOG_LEVEL.to_string())
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.file.logging().dir.map(PathBuf::from)
    }

    pub fn port(&self) -> u16 {
        self.file.server().port.unwrap_or(defaults::DEFAULT_PORT)
    }

    /// Listen address, with CLI flags taking precedence over the file.
    pub fn bind_addr(&self, bind: Option<&str>, port: Option<u16>) -> Result<SocketAddr> {
        let server = self.file.server();
        let host = bind
            .map(str::to_string)
            .or(server.bind)
            .unwrap_or_else(|| defaults::DEFAULT_BIND.to_string());
        let port = port.unwrap_or(self.port());
        format!("{host}:{port}")
            .parse()
            .with_context(|| format!("Invalid bind address: {host}:{port}"))
    }

    pub fn server_options(&self) -> ServerOptions {
        let server = self.file.server();
        ServerOptions {
            max_upload_bytes: server
                .max_upload_bytes
                .unwrap_or(defaults::DEFAULT_MAX_UPLOAD_BYTES),
            cors: server.cors.unwrap_or(true),
        }
    }

    /// Build the extraction service backed by Textract. Fails on config errors.
    pub fn build_service(&self) -> Result<ExtractionService> {
        if !self.report.is_valid() {
            let messages: Vec<String> = self.report.errors.iter().map(|e| e.to_string()).collect();
            bail!(
                "Invalid configuration in {}:\n  {}",
                self.path.display(),
                messages.join("\n  ")
            );
        }

        let analyzer = TextractAnalyzer::new(&self.file.provider())
            .map_err(|e| ScanError::ConfigError(e.to_string()))?;
        let mut service = ExtractionService::new(Arc::new(analyzer));
        if let Some(sample) = self.file.sample_path() {
            service = service.with_sample(sample);
        }
        Ok(service)
    }
}

/// The `--config` path, or the default location when none was given.
pub fn config_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| formscan_config::config_file_path(&formscan_config::config_dir()))
}
