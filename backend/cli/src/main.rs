mod analyze_cmd;
mod config;
mod config_cmd;
mod status_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use formscan_config::defaults;
use formscan_gateway::{start_server, ApiState};
use logging::{init_logger, LoggerOptions};

use config::Config;

#[derive(Parser)]
#[command(name = "formscan")]
#[command(about = "FormScan: form field and text line extraction over AWS Textract")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.formscan/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind the HTTP server to
        #[arg(short, long)]
        bind: Option<String>,
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Extract form fields from a document
    Analyze {
        file: PathBuf,
        /// Print only this field's value
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Extract the text lines of a document
    Lines { file: PathBuf },
    /// Resolve a saved Textract JSON response offline
    Resolve {
        file: PathBuf,
        #[arg(short, long, conflicts_with = "lines")]
        filter: Option<String>,
        /// Join LINE blocks instead of resolving key/value pairs
        #[arg(long)]
        lines: bool,
    },
    /// Write a starter config file
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Print the effective config with secrets redacted
    Config,
    /// Check whether a local server is running
    Status,
}

impl Commands {
    /// `resolve` and `init` work without a loadable config file.
    fn needs_config(&self) -> bool {
        !matches!(self, Commands::Resolve { .. } | Commands::Init { .. })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.command.needs_config() {
        let _guard = init_logger(LoggerOptions {
            level: defaults::DEFAULT_LOG_LEVEL,
            ..Default::default()
        });
        match cli.command {
            Commands::Resolve {
                file,
                filter,
                lines,
            } => analyze_cmd::resolve(&file, filter.as_deref(), lines).await?,
            Commands::Init { force } => {
                config_cmd::init(&config::config_path(cli.config.as_deref()), force).await?
            }
            Commands::Serve { .. }
            | Commands::Analyze { .. }
            | Commands::Lines { .. }
            | Commands::Config
            | Commands::Status => {}
        }
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref()).await?;

    let level = config.log_level();
    let log_dir = config.log_dir();
    let _guard = init_logger(LoggerOptions {
        level: &level,
        dir: log_dir.as_deref(),
        json: config.file.logging().json.unwrap_or(false),
    });
    for warning in &config.report.warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }

    match cli.command {
        Commands::Serve { bind, port } => run_server(&config, bind.as_deref(), port).await?,
        Commands::Analyze { file, filter } => {
            analyze_cmd::analyze(&config, &file, filter.as_deref()).await?
        }
        Commands::Lines { file } => analyze_cmd::lines(&config, &file).await?,
        Commands::Config => config_cmd::show(&config)?,
        Commands::Status => status_cmd::run(&config).await?,
        Commands::Resolve { .. } | Commands::Init { .. } => {}
    }

    Ok(())
}

async fn run_server(config: &Config, bind: Option<&str>, port: Option<u16>) -> Result<()> {
    let addr = config.bind_addr(bind, port)?;
    let options = config.server_options();
    let service = config.build_service()?;

    info!(
        addr = %addr,
        provider = %service.provider(),
        max_upload_bytes = options.max_upload_bytes,
        config = %config.path.display(),
        "Starting FormScan"
    );

    start_server(addr, ApiState::new(service), options).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> Commands {
        let mut argv = vec!["formscan"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn offline_commands_skip_config() {
        assert!(!command(&["resolve", "response.json", "--lines"]).needs_config());
        assert!(!command(&["init", "--force"]).needs_config());
    }

    #[test]
    fn provider_commands_need_config() {
        assert!(command(&["serve", "--port", "8080"]).needs_config());
        assert!(command(&["analyze", "boleto.png", "--filter", "CPF"]).needs_config());
        assert!(command(&["config"]).needs_config());
    }

    #[test]
    fn filter_conflicts_with_lines() {
        let argv = ["formscan", "resolve", "r.json", "--filter", "CPF", "--lines"];
        assert!(Cli::try_parse_from(argv).is_err());
    }
}
