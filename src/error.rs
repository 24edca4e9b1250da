//! Infrastructure error type.

use std::net::AddrParseError;
use std::path::PathBuf;

use crate::store::StoreError;

/// The error type returned by startup and serving.
///
/// Request-level failures (404, 400, …) are expressed as HTTP responses, not
/// as `Error`s; see [`ApiError`](crate::ApiError). This type covers what can
/// stop the process: configuration, opening the store, binding the port.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid bind address `{addr}`: {source}")]
    InvalidAddr { addr: String, source: AddrParseError },

    #[error("invalid api root `{0}`")]
    InvalidRoot(String),

    #[error("failed to read config file {path:?}: {source}")]
    ConfigRead { path: PathBuf, source: std::io::Error },

    #[error("failed to parse config file {path:?}: {source}")]
    ConfigParse { path: PathBuf, source: toml::de::Error },

    #[error(transparent)]
    Store(#[from] StoreError),
}
