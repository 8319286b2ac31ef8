//! Event handler implementations for EventLoop.
//!
//! Handlers are `impl EventLoop` blocks split by responsibility:
//! - `input`: keyboard commands for game and replay mode
//! - `link`: link status and server messages
//! - `timers`: autoplay interval and placement animation completions
//! - `rendering`: terminal drawing

mod input;
mod link;
mod rendering;
mod timers;
