//! Logging setup shared by the binaries.

use std::{fs::OpenOptions, io, path::Path, sync::Arc};

use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install the global `tracing` subscriber.
///
/// Events at INFO and above are printed to stdout, unless overridden with the
/// `RUST_LOG` environment variable. If `debug_log_path` is given, events at
/// DEBUG and above are also appended to that file.
///
/// # Errors
/// Returns an error if the debug log file cannot be opened.
///
/// # Panics
/// Panics if a global subscriber has already been installed.
pub fn setup_logging(debug_log_path: Option<&Path>) -> Result<(), io::Error> {
    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let debug_log = match debug_log_path {
        Some(path) => {
            let log_file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_ansi(false)
                    .with_writer(Arc::new(log_file))
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}
