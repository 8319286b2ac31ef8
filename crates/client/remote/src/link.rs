//! Owner of the link worker task.
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::config::RemoteConfig;
use crate::error::{RemoteError, Result};
use crate::handle::RemoteHandle;
use crate::worker::LinkWorker;

pub struct RemoteLink {
    handle: RemoteHandle,
    worker: JoinHandle<()>,
    shutdown_tx: oneshot::Sender<()>,
}

impl RemoteLink {
    /// Spawns the link worker. Must be called inside a Tokio runtime.
    pub fn spawn(config: RemoteConfig) -> Self {
        let (intent_tx, intent_rx) = mpsc::channel(config.intent_buffer);
        let (event_tx, _) = broadcast::channel(config.event_buffer);
        let (connected_tx, connected_rx) = watch::channel(false);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = RemoteHandle::new(intent_tx, event_tx.clone(), connected_rx);
        let worker = LinkWorker::new(config, intent_rx, event_tx, connected_tx, shutdown_rx);
        let worker = tokio::spawn(async move {
            worker.run().await;
        });

        Self {
            handle,
            worker,
            shutdown_tx,
        }
    }

    pub fn handle(&self) -> RemoteHandle {
        self.handle.clone()
    }

    /// Closes the socket and waits for the worker to exit.
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.shutdown_tx.send(());
        drop(self.handle);
        self.worker.await.map_err(RemoteError::WorkerJoin)
    }
}
