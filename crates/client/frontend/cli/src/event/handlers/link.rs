//! Link status and server message handling.

use client_frontend_core::{EventConsumer, UpdateScope};
use client_remote::LinkEvent;
use tokio::sync::broadcast::error::RecvError;

use super::super::EventLoop;

impl EventLoop {
    pub(in crate::event) fn handle_link_event(&mut self, result: Result<LinkEvent, RecvError>) {
        match result {
            Ok(LinkEvent::Connected) => {
                self.app_state.connected = true;
                self.session.presenter_mut().mark(UpdateScope::HUD);
                if self.app_state.synced_once {
                    self.session.link_connected();
                } else {
                    self.on_first_connection();
                }
            }
            Ok(LinkEvent::Disconnected) => {
                self.app_state.connected = false;
                self.session.presenter_mut().mark(UpdateScope::HUD);
                self.session.link_lost();
            }
            Ok(LinkEvent::Message(message)) => {
                let impact = self.session.on_message(message);
                if impact.requires_redraw
                    && let Some(snapshot) = self.session.presenter().board.as_ref()
                {
                    let board = snapshot.board();
                    self.app_state.cursor.clamp_to(board.width(), board.height());
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("dropped {skipped} link events");
                self.session.resync();
            }
            Err(RecvError::Closed) => {
                tracing::warn!("link event stream closed");
                self.app_state.should_quit = true;
            }
        }
    }

    /// Fetches whatever game the remote authority already holds.
    pub(in crate::event) fn on_first_connection(&mut self) {
        self.app_state.connected = true;
        self.app_state.synced_once = true;
        tracing::info!("connected, requesting current state");
        self.session.request_state();
    }
}
