//! Tracing subscriber setup for binaries embedding the pipeline.

use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Installs the global subscriber (writing to stderr) and routes `log`
/// records into it.
///
/// Returns `false` when a subscriber was already installed (tests, or an
/// embedding application that set up its own).
pub fn init_logging(format: LogFormat) -> bool {
    let registry = Registry::default().with(env_filter());
    let installed = match format {
        LogFormat::Pretty => {
            tracing::subscriber::set_global_default(
                registry.with(fmt::layer().with_target(true).with_writer(std::io::stderr)),
            )
        }
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            ),
        ),
    }
    .is_ok();

    if installed {
        // The HTTP client logs through the `log` facade.
        let _ = LogTracer::init();
    }
    installed
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
