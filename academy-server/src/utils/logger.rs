//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional JSON formatting and file output
///
/// `RUST_LOG` overrides `log_level` when set. Logs go to a daily-rolling
/// file under `log_dir` if that directory exists, otherwise to stdout.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("academy_server={level},shared={level},tower_http={level}")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_appender = log_dir
        .map(Path::new)
        .filter(|p| p.is_dir())
        .map(|p| tracing_appender::rolling::daily(p, "academy-server"));

    // A second init (e.g. from tests) keeps the first subscriber
    let result = match (file_appender, json) {
        (Some(appender), true) => builder.json().with_writer(appender).with_ansi(false).try_init(),
        (Some(appender), false) => builder.with_writer(appender).with_ansi(false).try_init(),
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };
    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}
