use tracing_subscriber::EnvFilter;

use crate::ServerError;

/// Installs the global `tracing` subscriber.
///
/// `filter` uses `EnvFilter` directive syntax, e.g. `info` or
/// `pvtmix_correlations=debug,warp=info`.
///
/// # Errors
///
/// Fails if the directive cannot be parsed or a global subscriber is
/// already set.
pub fn init(filter: &str) -> Result<(), ServerError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|source| ServerError::LogFilter {
        filter: filter.to_string(),
        source,
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(ServerError::Telemetry)
}
