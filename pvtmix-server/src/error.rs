use std::{error::Error as StdError, io, net::SocketAddr, path::PathBuf};

use thiserror::Error;

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServerError {
    /// The settings file could not be read.
    #[error("failed to read settings file {}", path.display())]
    ReadSettings {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The settings file is not valid TOML or has unknown keys.
    #[error("failed to parse settings file {}", path.display())]
    ParseSettings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An environment variable holds a value of the wrong type.
    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    /// The log filter directive could not be parsed.
    #[error("invalid log filter {filter:?}")]
    LogFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global tracing subscriber was already installed.
    #[error("failed to initialize logging")]
    Telemetry(#[source] Box<dyn StdError + Send + Sync>),

    /// The configured host name could not be resolved.
    #[error("failed to resolve {host}:{port}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// The configured host name resolved to no addresses.
    #[error("{host}:{port} did not resolve to any address")]
    NoAddress { host: String, port: u16 },

    /// The listening socket could not be bound.
    #[error("failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: warp::Error,
    },
}
