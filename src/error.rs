//! Failure taxonomy for a chat exchange.

use std::fmt;

use thiserror::Error;

/// Why a send did not produce an assistant reply.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Connection refused, DNS failure, timeout, body read failure.
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned {status}")]
    Http { status: u16 },

    /// 2xx reply whose body is not `{"response": <non-empty string>}`.
    #[error("invalid response format: {0}")]
    MalformedResponse(String),
}

impl ChatError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ChatError::Network(_) => FailureKind::Network,
            ChatError::Http { .. } => FailureKind::Http,
            ChatError::MalformedResponse(_) => FailureKind::MalformedResponse,
        }
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(e: reqwest::Error) -> Self {
        ChatError::Network(e.to_string())
    }
}

/// Coarse kind kept for diagnostics after the error itself is collapsed
/// into the fallback message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Http,
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Network => "network",
            FailureKind::Http => "http",
            FailureKind::MalformedResponse => "malformed_response",
        };
        f.write_str(s)
    }
}
