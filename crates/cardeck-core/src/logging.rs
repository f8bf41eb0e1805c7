#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the `tracing` macros are re-exported here so
//! dependants log through one path. With `tracing-json`, [`init_subscriber`]
//! installs a global `tracing-subscriber` honouring `RUST_LOG`.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Output format for [`init_subscriber`].
#[cfg(feature = "tracing-json")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Default filter when `RUST_LOG` is unset.
#[cfg(feature = "tracing-json")]
pub const DEFAULT_FILTER: &str = "info";

/// Install a global subscriber with an `EnvFilter` read from `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_subscriber(format: LogFormat) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}
