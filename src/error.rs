//! Error types.
//!
//! Two families, split by *when* they can happen:
//!
//! - [`ConfigError`] — something you wrote at startup is wrong (a bad CIDR
//!   range, an invalid header name, a duplicate route). Returned by the
//!   constructor that received the bad value, before anything is served.
//! - [`ServeError`] — the transport failed: binding the listener or
//!   accepting a connection. Fatal to the serve call; never retried here.
//!
//! Per-request problems are neither. A filter that cannot make sense of a
//! request says `false`, and the server turns everything else into an HTTP
//! status code.

use std::io;

use thiserror::Error;

/// A filter, middleware or route was constructed from invalid arguments.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid address range `{range}`: {source}")]
    InvalidRange {
        range: String,
        #[source]
        source: ipnet::AddrParseError,
    },

    #[error("invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("route `{0}` is already registered")]
    DuplicateRoute(String),
}

/// The listener could not be started or stopped accepting connections.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("accept failed: {0}")]
    Accept(#[source] io::Error),

    #[error("failed to read local address: {0}")]
    LocalAddr(#[source] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
