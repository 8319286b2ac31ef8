//! Terminal UI frontend for Borderline.
//!
//! # Architecture
//!
//! CliFrontend is a pure UI layer that:
//! - Receives a RemoteHandle for communication
//! - Does NOT own the remote link
//! - Drives a `Session` from link events, key presses, and local timers

mod app;
mod config;
mod event;
mod input;
pub mod logging;
mod ports;
pub mod presentation;
mod state;

pub use app::CliFrontend;
pub use config::{CliConfig, GameConfig, UiConfig};

// Re-export for convenience (used in main.rs)
pub use client_frontend_core::FrontendConfig;
