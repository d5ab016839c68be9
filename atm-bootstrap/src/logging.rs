use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_PREFIX: &str = "atm-tracker.log";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Stdout logging filtered by `RUST_LOG` (default `info`), plus a daily rolling
/// file when `log_dir` is set.
pub fn init(log_dir: Option<&str>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false);

    let Some(dir) = log_dir else {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(stdout_layer)
            .try_init();
        return Ok(());
    };

    std::fs::create_dir_all(Path::new(dir))
        .with_context(|| format!("failed to create log directory {}", dir))?;
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_target(true)
        .with_ansi(false);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer);

    match subscriber.try_init() {
        Ok(_) => {
            let _ = FILE_GUARD.set(guard);
        }
        Err(_) => {
            // Global subscriber already set; the file worker is not needed.
            drop(guard);
        }
    }
    Ok(())
}
