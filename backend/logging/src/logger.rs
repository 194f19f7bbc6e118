//! Structured Logger
//!
//! Wraps `tracing` with environment-based level control, a console layer
//! and, when a log directory is given, daily-rolling NDJSON files.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Prefix of the rolling log files: `formscan.log.YYYY-MM-DD`.
pub const LOG_FILE_PREFIX: &str = "formscan.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logger settings, usually taken from the `logging` config section.
#[derive(Debug, Clone, Default)]
pub struct LoggerOptions<'a> {
    pub level: &'a str,
    pub dir: Option<&'a Path>,
    pub json: bool,
}

/// Initialize the global structured logger. Console output goes to stderr.
///
/// `RUST_LOG` takes precedence over `options.level`. The returned guard
/// flushes the file writer on drop and must be held for the life of the
/// process. Calling this twice is a no-op.
pub fn init_logger(options: LoggerOptions<'_>) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(options.level));

    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);

    // Console
    if options.json {
        layers.push(fmt::layer().json().with_writer(std::io::stderr).boxed());
    } else {
        layers.push(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(true)
                .boxed(),
        );
    }

    // Rolling NDJSON file
    let guard = options.dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(
            fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .boxed(),
        );
        guard
    });

    let _ = tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init();

    guard
}
