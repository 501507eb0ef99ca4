//! Structured logging.
//!
//! # Responsibilities
//! - Install a `tracing` subscriber when a client carries a logger directive
//! - JSON (flattened fields) or pretty output, filtered by an `EnvFilter` directive
//!
//! # Design Decisions
//! - Installing is best effort: an already installed global subscriber wins
//! - `RUST_LOG` is not consulted here; the directive comes from configuration

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::{LogFormat, LoggerSettings};

/// Install a global subscriber built from `settings`.
///
/// Returns `false` when the filter is invalid or a subscriber already exists.
pub fn init_logging(settings: &LoggerSettings) -> bool {
    let filter = match EnvFilter::try_new(&settings.filter) {
        Ok(filter) => filter,
        Err(e) => {
            tracing::warn!(filter = %settings.filter, error = %e, "Ignoring invalid log filter");
            return false;
        }
    };

    let installed = match settings.format {
        LogFormat::Json => fmt()
            .with_env_filter(filter)
            .json()
            .flatten_event(true)
            .try_init(),
        LogFormat::Pretty => fmt().with_env_filter(filter).try_init(),
    };

    installed.is_ok()
}
