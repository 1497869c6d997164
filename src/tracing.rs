use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

/// Compact subscriber for binaries and tests embedding this crate.
///
/// The filter is read from `EDGEWALK_LOG` (standard `RUST_LOG` directive
/// syntax); without it, this crate's own events are shown at debug level
/// and everything else is silenced.
pub fn default_subscriber() -> impl Subscriber {
    let filter = EnvFilter::try_from_env("EDGEWALK_LOG")
        .unwrap_or_else(|_| EnvFilter::new("edgewalk=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .finish()
}
