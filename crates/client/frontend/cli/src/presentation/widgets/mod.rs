//! Widgets composing the terminal frame.

pub mod board;
pub mod footer;
pub mod header;
pub mod messages;
pub mod pools;
pub mod status;
pub mod timeline;
