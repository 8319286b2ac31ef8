//! Event handling for the CLI client.
//!
//! This module contains the event loop that coordinates link events, user
//! input, autoplay ticks, animation completions, and redraws.

mod handlers;
mod r#loop;

pub use r#loop::EventLoop;
