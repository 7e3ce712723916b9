use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use reelist_config::PathManager;

/// Log to stderr. Used by the one-shot subcommands.
pub fn init_logging(verbose_level: u8, quiet: bool) -> Result<()> {
    let filter = build_filter(verbose_level, quiet);
    let registry = Registry::default().with(filter);

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr),
            )
            .init();
    }

    Ok(())
}

/// Log to a daily-rotated file under the log directory. Used while the
/// interactive browser owns the terminal.
pub fn init_file_logging(verbose_level: u8, quiet: bool) -> Result<()> {
    let paths = PathManager::new()?;
    std::fs::create_dir_all(paths.log_dir())?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, paths.log_dir(), "reelist");

    let filter = build_filter(verbose_level, quiet);
    Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(file_appender),
        )
        .init();

    Ok(())
}

// 0 = info, 1 = debug (with hyper noise suppressed), 2+ = trace.
fn build_filter(verbose_level: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }

    let filter_str = match verbose_level {
        0 => "info",
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn",
        _ => "trace",
    };

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str))
}
