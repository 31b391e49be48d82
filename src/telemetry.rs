//! Tracing subscriber setup for binaries and integration environments.

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, falling back to `info` for this
/// crate and `warn` for dependencies. With `json` set, events are emitted as
/// one JSON object per line for log shippers.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(json: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,pawsit=info"));

    if json {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init()?;
    } else {
        fmt().with_env_filter(filter).try_init()?;
    }
    Ok(())
}
