use game_core::ServerMessage;

/// Everything the link reports to its subscribers, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum LinkEvent {
    /// A WebSocket session was established.
    Connected,
    /// The session ended; the worker is retrying.
    Disconnected,
    Message(ServerMessage),
}
