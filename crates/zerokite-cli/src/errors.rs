use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;
use zerokite_core::{ApiError, ConfigError};

/// Every failure a command can report. None are retried.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to start callback server on {addr}: {source}. Retry with a different port (-p <port>).")]
    Listen {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("Callback server stopped before the login completed.")]
    CaptureAborted,
    #[error("{0}")]
    HandshakeRejected(String),
    #[error("Timed out waiting for Kite redirect. Restart with `zerokite auth` and login again.")]
    HandshakeTimeout,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Response from {url} exceeded {limit} bytes.")]
    BodyTooLarge { url: String, limit: usize },
    #[error("Session file {}: {message}", path.display())]
    Session { path: PathBuf, message: String },
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Kind reported to the user alongside the message.
    pub(crate) fn kind(&self) -> &str {
        match self {
            Self::Config(_) => "ConfigError",
            Self::Listen { .. } => "ListenError",
            Self::HandshakeRejected(_) | Self::CaptureAborted => "HandshakeRejected",
            Self::HandshakeTimeout => "HandshakeTimeout",
            Self::Api(err) => err.kind.as_str(),
            Self::Transport { .. } | Self::BodyTooLarge { .. } => "TransportError",
            Self::Session { .. } => "SessionError",
            Self::Usage(_) => "UsageError",
        }
    }

    pub(crate) fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(err) => err.status_code,
            _ => None,
        }
    }

    pub(crate) fn session(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Session {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
