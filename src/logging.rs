use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Used when `RUST_LOG` is unset. Request traces come from `tower_http`.
const DEFAULT_FILTER: &str = "heritage_sites=debug,tower_http=debug,info";

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "heritage_sites.log";

/// Installs the global subscriber: human-readable lines on stdout and JSON
/// lines in `logs/heritage_sites.log.<date>`.
pub fn init_logging() {
    if let Err(e) = std::fs::create_dir_all(LOG_DIR) {
        eprintln!("Cannot create {} directory, file logging may fail: {}", LOG_DIR, e);
    }

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(LOG_DIR, LOG_FILE));

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_target(true).with_writer(std::io::stdout))
        .init();

    // Buffered lines are flushed when the guard drops, so it must outlive every request
    std::mem::forget(guard);
}
