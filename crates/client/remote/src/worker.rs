//! Background task that owns the WebSocket.
//!
//! Receives intents from [`RemoteHandle`](crate::RemoteHandle), writes them
//! as text frames, decodes inbound frames, and publishes [`LinkEvent`]s.
//! When the socket drops it reconnects with exponential back-off; intents
//! queued while disconnected are discarded.
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use game_core::{ClientIntent, ServerMessage};

use crate::config::RemoteConfig;
use crate::error::Result;
use crate::event::LinkEvent;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How a connected session ended.
enum SessionEnd {
    Dropped,
    Shutdown,
}

pub(crate) struct LinkWorker {
    config: RemoteConfig,
    intent_rx: mpsc::Receiver<ClientIntent>,
    event_tx: broadcast::Sender<LinkEvent>,
    connected_tx: watch::Sender<bool>,
    shutdown_rx: oneshot::Receiver<()>,
}

impl LinkWorker {
    pub(crate) fn new(
        config: RemoteConfig,
        intent_rx: mpsc::Receiver<ClientIntent>,
        event_tx: broadcast::Sender<LinkEvent>,
        connected_tx: watch::Sender<bool>,
        shutdown_rx: oneshot::Receiver<()>,
    ) -> Self {
        Self {
            config,
            intent_rx,
            event_tx,
            connected_tx,
            shutdown_rx,
        }
    }

    /// Main worker loop.
    pub(crate) async fn run(mut self) {
        let mut delay = self.config.reconnect_delay;

        loop {
            let opened = tokio::select! {
                opened = open(&self.config.url) => opened,
                _ = &mut self.shutdown_rx => break,
            };

            match opened {
                Ok(stream) => {
                    info!(url = %self.config.url, "connected to remote authority");
                    delay = self.config.reconnect_delay;
                    self.set_connected(true);
                    self.publish(LinkEvent::Connected);

                    let end = self.pump(stream).await;
                    self.set_connected(false);
                    match end {
                        SessionEnd::Shutdown => break,
                        SessionEnd::Dropped => {
                            warn!(url = %self.config.url, "connection dropped");
                            self.publish(LinkEvent::Disconnected);
                        }
                    }
                }
                Err(err) => {
                    debug!(url = %self.config.url, ?delay, "connect failed: {err}");
                }
            }

            if !self.back_off(delay).await {
                break;
            }
            delay = self.config.next_delay(delay);
        }

        self.set_connected(false);
        debug!("link worker stopped");
    }

    /// Shuttles frames until the socket drops or shutdown is requested.
    async fn pump(&mut self, stream: WsStream) -> SessionEnd {
        let (mut write, mut read) = stream.split();

        loop {
            tokio::select! {
                intent = self.intent_rx.recv() => {
                    let Some(intent) = intent else {
                        let _ = write.send(Message::Close(None)).await;
                        return SessionEnd::Shutdown;
                    };
                    let frame = match intent.encode() {
                        Ok(frame) => frame,
                        Err(err) => {
                            warn!("dropping unencodable intent: {err}");
                            continue;
                        }
                    };
                    if let Err(err) = write.send(Message::Text(frame)).await {
                        warn!("send failed: {err}");
                        return SessionEnd::Dropped;
                    }
                }
                frame = read.next() => match frame {
                    Some(Ok(Message::Text(text))) => self.dispatch(&text),
                    Some(Ok(Message::Close(frame))) => {
                        debug!(?frame, "remote closed the socket");
                        return SessionEnd::Dropped;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        warn!("receive failed: {err}");
                        return SessionEnd::Dropped;
                    }
                    None => return SessionEnd::Dropped,
                },
                _ = &mut self.shutdown_rx => {
                    let _ = write.send(Message::Close(None)).await;
                    return SessionEnd::Shutdown;
                }
            }
        }
    }

    fn dispatch(&self, frame: &str) {
        match ServerMessage::decode(frame) {
            Ok(message) => {
                debug!(kind = message.kind(), "received");
                self.publish(LinkEvent::Message(message));
            }
            Err(err) => warn!(severity = %err.severity(), "ignoring frame: {err}"),
        }
    }

    /// Waits `delay`, discarding intents queued meanwhile. Returns false
    /// when the worker should stop.
    async fn back_off(&mut self, delay: std::time::Duration) -> bool {
        let sleep = tokio::time::sleep(delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => return true,
                _ = &mut self.shutdown_rx => return false,
                intent = self.intent_rx.recv() => match intent {
                    Some(intent) => warn!(?intent, "discarding intent while disconnected"),
                    None => return false,
                },
            }
        }
    }

    fn publish(&self, event: LinkEvent) {
        // No subscribers is fine; events are not buffered for latecomers.
        let _ = self.event_tx.send(event);
    }

    fn set_connected(&self, connected: bool) {
        self.connected_tx.send_replace(connected);
    }
}

async fn open(url: &str) -> Result<WsStream> {
    let (stream, _response) = connect_async(url).await?;
    Ok(stream)
}
