//! Logging Infrastructure
//!
//! Structured logging via `tracing-subscriber`, optionally written to a
//! daily-rolling file.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional JSON formatting and file output
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},surrealdb=warn")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(log_path, "staff-server");
            let subscriber = subscriber.with_writer(file_appender).with_ansi(false);
            if json {
                subscriber.json().init();
            } else {
                subscriber.init();
            }
            return;
        }
        eprintln!("Log directory {dir} does not exist, logging to stdout");
    }

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
