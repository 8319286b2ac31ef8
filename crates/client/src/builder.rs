//! Client builder with dependency injection pattern.

use crate::Client;
use anyhow::{Context, Result};
use client_frontend_core::FrontendApp;
use client_remote::RemoteLink;

/// Builder for constructing a Client with proper validation.
///
/// Both the remote link and the frontend are required; a missing one fails
/// `build()` instead of surfacing later at run time.
pub struct ClientBuilder<F> {
    link: Option<RemoteLink>,
    frontend: Option<F>,
}

impl<F> Default for ClientBuilder<F> {
    fn default() -> Self {
        Self {
            link: None,
            frontend: None,
        }
    }
}

impl<F: FrontendApp> ClientBuilder<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the remote link (required).
    ///
    /// The frontend should be built from this link's handle.
    pub fn link(mut self, link: RemoteLink) -> Self {
        self.link = Some(link);
        self
    }

    /// Set the frontend (required).
    pub fn frontend(mut self, frontend: F) -> Self {
        self.frontend = Some(frontend);
        self
    }

    pub fn build(self) -> Result<Client<F>> {
        let link = self
            .link
            .context("Remote link is required. Use .link() to set it.")?;

        let frontend = self
            .frontend
            .context("Frontend is required. Use .frontend() to set it.")?;

        Ok(Client { link, frontend })
    }
}
