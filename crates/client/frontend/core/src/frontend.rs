//! Trait describing a runnable client front-end.
use anyhow::Result;
use async_trait::async_trait;

/// Frontend abstraction for UI layers.
///
/// A frontend owns its [`Session`](crate::Session), drives it from user input
/// and server messages, and returns when the user quits.
///
/// # Implementations
///
/// - `CliFrontend`: Terminal-based UI (ratatui + crossterm)
#[async_trait]
pub trait FrontendApp: Send {
    async fn run(self) -> Result<()>
    where
        Self: Sized;
}
