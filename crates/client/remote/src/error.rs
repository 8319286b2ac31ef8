//! Errors surfaced by the remote link.
use game_core::{ErrorSeverity, ProtocolError};
use thiserror::Error;
use tokio::task::JoinError;
use tokio_tungstenite::tungstenite;

pub type Result<T> = std::result::Result<T, RemoteError>;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("not connected to the remote authority")]
    NotConnected,

    #[error("outbound intent queue is full")]
    IntentQueueFull,

    #[error("link worker stopped")]
    IntentChannelClosed,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("websocket failure")]
    WebSocket(#[from] tungstenite::Error),

    #[error("link worker join failed")]
    WorkerJoin(#[source] JoinError),
}

impl RemoteError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Protocol(err) => err.severity(),
            Self::IntentQueueFull => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Transport,
        }
    }
}
