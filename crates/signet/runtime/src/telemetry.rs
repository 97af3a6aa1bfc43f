//! Tracing bootstrap for hosts

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{Result, RuntimeError};

/// Install a global subscriber: `RUST_LOG` when set, else `default_filter`.
///
/// Libraries never call this; the host does, once.
pub fn init_tracing(default_filter: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .try_init()
        .map_err(|e| RuntimeError::Telemetry(e.to_string()))
}
