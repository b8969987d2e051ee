//! HTTP service exposing the PVT mixture-property correlations.
//!
//! # Example
//! ```no_run
//! use pvtmix_server::{Settings, serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pvtmix_server::ServerError> {
//!     serve(&Settings::default()).await
//! }
//! ```

mod config;
pub mod dto;
mod error;
mod routes;
pub mod telemetry;

use pvtmix_core::Component;
use pvtmix_correlations::MixtureProperties;
use tracing::{debug, info, warn};

pub use config::{DEFAULT_SETTINGS_FILE, HOST_ENV, LOG_ENV, PORT_ENV, Settings};
pub use error::ServerError;
pub use routes::{MAX_BODY_BYTES, routes};

/// Serves the mixture-property routes until Ctrl-C is received.
///
/// # Errors
///
/// Fails if the configured address cannot be resolved or bound.
pub async fn serve(settings: &Settings) -> Result<(), ServerError> {
    let addr = settings.socket_addr().await?;

    let component = MixtureProperties.inspect(
        |input| debug!(?input, "computing mixture properties"),
        |result| {
            if let Ok(output) = result {
                debug!(?output, "computed mixture properties");
            }
        },
    );

    let (bound, server) = warp::serve(routes(component))
        .try_bind_with_graceful_shutdown(addr, shutdown_signal())
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(%bound, "pvtmix server listening");
    server.await;
    info!("pvtmix server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "unable to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
}
