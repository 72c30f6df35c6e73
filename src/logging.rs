//! Tracing subscriber for the dashboard binary.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset: fetch and store events from this
/// crate at debug, axum's extractor rejections, everything else at warn.
pub const DEFAULT_FILTER: &str = "warn,sectorcap=debug,axum::rejection=trace";

/// Output layout, picked from `RUST_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human-readable output.
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// `RUST_ENV=production` selects [`LogFormat::Json`].
    pub fn from_env() -> Self {
        match std::env::var("RUST_ENV") {
            Ok(env) if env == "production" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set, so a second call is an
/// error rather than a silent no-op.
pub fn init_logging(format: LogFormat) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_target(true))
            .try_init(),
    }
}
