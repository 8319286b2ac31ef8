//! Error infrastructure shared by the client crates.
//!
//! Every failure the client can observe falls into one [`ErrorSeverity`]
//! class, which decides how the controllers react:
//! - **Validation**: local input refused before anything is sent
//! - **Recoverable**: remote rejection; the interaction stays where it was
//! - **Fault**: remote failure; the current interaction is aborted
//! - **Transport**: connection loss; waiting states are reset
use thiserror::Error;

/// Classification of an error by how the client recovers from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Local input rejected without contacting the remote authority.
    ///
    /// Examples: malformed replay file, click outside the board
    Validation,

    /// Remote rejection the user may retry from the same state.
    ///
    /// Examples: `placement_invalid`, replay boundary reached
    Recoverable,

    /// Remote failure that aborts the interaction in progress.
    ///
    /// Examples: `placement_error`, generic `error`
    Fault,

    /// Connection to the remote authority lost.
    Transport,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Recoverable => "recoverable",
            Self::Fault => "fault",
            Self::Transport => "transport",
        }
    }

    /// Returns true if the current interaction survives this error.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation | Self::Recoverable)
    }

    /// Returns true if the notification should block until acknowledged.
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Fault | Self::Transport)
    }
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to decode or encode a wire message.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode intent: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("unsupported frame: {0}")]
    UnsupportedFrame(&'static str),
}

impl ProtocolError {
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Decode(_) | Self::UnsupportedFrame(_) => ErrorSeverity::Fault,
            Self::Encode(_) => ErrorSeverity::Validation,
        }
    }
}
