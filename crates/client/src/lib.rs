//! Top-level client pairing the remote link with a frontend.
//!
//! ```text
//! Client
//!   ├─→ RemoteLink (WebSocket worker, reconnects in the background)
//!   └─→ Frontend   (UI layer - CLI, ...; talks through a RemoteHandle)
//! ```

mod builder;

pub use builder::ClientBuilder;

use anyhow::Result;
use client_frontend_core::FrontendApp;
use client_remote::RemoteLink;

/// Top-level client container.
///
/// # Lifecycle
///
/// 1. `Client::builder()` takes an already spawned link and a frontend
/// 2. `Client::run()` transfers control to the frontend until the user quits
/// 3. The link worker is shut down afterwards, whatever the frontend returned
pub struct Client<F> {
    link: RemoteLink,
    frontend: F,
}

impl<F: FrontendApp> Client<F> {
    pub fn builder() -> ClientBuilder<F> {
        ClientBuilder::new()
    }

    pub async fn run(self) -> Result<()> {
        let Client { link, frontend } = self;

        let frontend_result = frontend.run().await;

        if let Err(err) = link.shutdown().await {
            tracing::warn!("remote link did not shut down cleanly: {err}");
        }

        frontend_result
    }
}
