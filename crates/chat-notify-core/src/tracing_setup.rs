use crate::constants::LOG_FILE_ENV;
use std::fs::OpenOptions;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber: stderr filtered by `RUST_LOG` (default `info`),
/// plus a debug-level file log when `CHAT_NOTIFY_LOG_FILE` is set.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    let registry = tracing_subscriber::registry().with(stderr_layer);

    let file = std::env::var(LOG_FILE_ENV).ok().and_then(|log_path| {
        match OpenOptions::new().create(true).append(true).open(&log_path) {
            Ok(file) => Some((log_path, file)),
            Err(e) => {
                eprintln!("Failed to open log file {}: {}", log_path, e);
                None
            }
        }
    });

    if let Some((log_path, file)) = file {
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG);

        if registry.with(file_layer).try_init().is_ok() {
            eprintln!("File logging enabled: {}", log_path);
        }
    } else {
        let _ = registry.try_init();
    }
}
