//! Cloneable façade for talking to the remote authority.
use tokio::sync::{broadcast, mpsc, watch};

use game_core::ClientIntent;

use crate::error::{RemoteError, Result};
use crate::event::LinkEvent;

#[derive(Clone)]
pub struct RemoteHandle {
    intent_tx: mpsc::Sender<ClientIntent>,
    event_tx: broadcast::Sender<LinkEvent>,
    connected: watch::Receiver<bool>,
}

impl RemoteHandle {
    pub(crate) fn new(
        intent_tx: mpsc::Sender<ClientIntent>,
        event_tx: broadcast::Sender<LinkEvent>,
        connected: watch::Receiver<bool>,
    ) -> Self {
        Self {
            intent_tx,
            event_tx,
            connected,
        }
    }

    pub fn is_connected(&self) -> bool {
        *self.connected.borrow()
    }

    /// Queues `intent` without waiting. Fails immediately while the link is
    /// down so callers never act on an intent that cannot be delivered.
    pub fn try_send(&self, intent: ClientIntent) -> Result<()> {
        if !self.is_connected() {
            return Err(RemoteError::NotConnected);
        }
        self.intent_tx.try_send(intent).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => RemoteError::IntentQueueFull,
            mpsc::error::TrySendError::Closed(_) => RemoteError::IntentChannelClosed,
        })
    }

    /// Queues `intent`, waiting for queue space.
    pub async fn send(&self, intent: ClientIntent) -> Result<()> {
        if !self.is_connected() {
            return Err(RemoteError::NotConnected);
        }
        self.intent_tx
            .send(intent)
            .await
            .map_err(|_| RemoteError::IntentChannelClosed)
    }

    /// Subscribe to link events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LinkEvent> {
        self.event_tx.subscribe()
    }

    /// Resolves once the link reports `connected`, or errors when the worker
    /// is gone.
    pub async fn wait_for_connection(&self) -> Result<()> {
        let mut connected = self.connected.clone();
        connected
            .wait_for(|up| *up)
            .await
            .map(|_| ())
            .map_err(|_| RemoteError::IntentChannelClosed)
    }
}
