use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Sets up the process-wide subscriber: a console sink, plus a file sink if
/// `--log-file` was given. Both share the same verbosity. Called once at
/// startup; the process exit flushes it.
pub fn init(debug: bool, log_file: Option<&Path>) -> Result<(), std::io::Error> {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let registry = tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(tracing_subscriber::fmt::layer().with_target(false));

    match log_file {
        Some(path) => {
            let file = File::options().append(true).create(true).open(path)?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Arc::new(file)),
                )
                .init();
            tracing::info!("Logging to {}", path.display());
        }
        None => registry.init(),
    }
    Ok(())
}
