//! Error types for vypush.
//!
//! The top-level [`Error`] is the taxonomy reported to the caller in the
//! JSON output; its `Display` strings are part of the CLI contract.
//! [`SessionError`] and the layer errors below it carry the detail from
//! the SSH session machinery.

use std::io;
use thiserror::Error;

/// Terminal errors for an apply invocation.
///
/// Every variant ends the invocation — nothing is retried. The `Display`
/// output of each variant is what lands in the report's `error` field.
#[derive(Error, Debug)]
pub enum Error {
    /// Standard input was not a readable, valid JSON document.
    #[error("invalid json: {0}")]
    InvalidInput(String),

    /// `host` or `username` missing or empty in the request.
    #[error("host and username required")]
    MissingField,

    /// Failed to establish the device session.
    #[error("connect failed: {0}")]
    Connect(#[source] SessionError),

    /// The configuration contained no `set `/`delete ` lines.
    #[error("no set/delete lines")]
    NoOperations,

    /// A session operation failed after the connection was up.
    #[error("apply failed: {0}")]
    Apply(#[source] SessionError),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidInput(err.to_string())
    }
}

/// Errors from the device session layer.
#[derive(Error, Debug)]
pub enum SessionError {
    /// SSH transport-level errors
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("{0}")]
    Channel(#[from] ChannelError),
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// SSH handshake or protocol error
    #[error("ssh error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// Operation timed out
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// I/O error
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Channel layer errors (PTY operations, prompt detection).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Failed to open PTY channel
    #[error("failed to open pty channel")]
    PtyOpenFailed,

    /// Failed to request shell
    #[error("failed to request shell")]
    ShellRequestFailed,

    /// Prompt pattern not matched in time
    #[error("prompt not found within {0:?}")]
    PatternTimeout(std::time::Duration),

    /// Channel closed unexpectedly
    #[error("channel closed")]
    Closed,

    /// SSH protocol error on the channel
    #[error("channel ssh error: {0}")]
    Ssh(russh::Error),
}

/// Result type alias using vypush's session error.
pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_display_strings() {
        // These strings are consumed by callers; keep them stable.
        assert_eq!(Error::MissingField.to_string(), "host and username required");
        assert_eq!(Error::NoOperations.to_string(), "no set/delete lines");

        let err = Error::Connect(SessionError::Channel(ChannelError::Closed));
        assert_eq!(err.to_string(), "connect failed: channel closed");

        let err = Error::Apply(SessionError::Channel(ChannelError::PatternTimeout(
            std::time::Duration::from_secs(30),
        )));
        assert!(err.to_string().starts_with("apply failed: prompt not found"));
    }

    #[test]
    fn test_invalid_input_embeds_detail() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::from(parse_err);
        let msg = err.to_string();
        assert!(msg.starts_with("invalid json: "), "got: {}", msg);
        assert!(msg.len() > "invalid json: ".len());
    }

    #[test]
    fn test_transport_error_carries_endpoint() {
        let err = TransportError::ConnectionFailed {
            host: "10.0.0.1".into(),
            port: 2222,
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        };
        let msg = err.to_string();
        assert!(msg.contains("10.0.0.1:2222"));
        assert!(msg.contains("refused"));
    }
}
