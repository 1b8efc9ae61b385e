//! Server error types.

use std::io;

/// Errors of the server layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("configuration file error: {0}")]
    ConfigFile(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("protocol error: {0}")]
    Protocol(#[from] dhcp_protocol::Error),
    /// The inbound packet violates a response-factory precondition.
    #[error("bad request: {0}")]
    BadRequest(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
