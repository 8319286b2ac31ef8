//! Link to the remote authority.
//!
//! The remote authority speaks JSON text frames over a WebSocket. This crate
//! owns that socket in a background worker, hands out a cloneable
//! [`RemoteHandle`] for queueing intents, and publishes [`LinkEvent`]s for
//! every decoded message and every change in connection status. Dropped
//! connections are retried with exponential back-off.
mod config;
mod error;
mod event;
mod handle;
mod link;
mod worker;

pub use config::RemoteConfig;
pub use error::{RemoteError, Result};
pub use event::LinkEvent;
pub use handle::RemoteHandle;
pub use link::RemoteLink;
