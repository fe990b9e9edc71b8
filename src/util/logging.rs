use std::path::Path;

use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter directive for the crate's own logs at the given verbosity.
pub fn filter_directive(verbose: bool) -> &'static str {
    if verbose {
        "notefall=debug,warn"
    } else {
        "notefall=info,warn"
    }
}

/// Initialize the logging system with tracing.
///
/// `RUST_LOG` overrides the default filter. If `log_dir` is provided, logs are
/// also written to a daily rotating file in that directory.
pub fn init_logging(log_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose)));

    let registry = tracing_subscriber::registry().with(filter);

    if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir)?;
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "notefall.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Logging lives for the whole process; the guard must outlive it.
        std::mem::forget(guard);

        registry
            .with(fmt::layer().with_target(true))
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }

    Ok(())
}
