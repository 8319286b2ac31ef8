//! Cross-frontend interaction layer for the Borderline client.
//!
//! Houses the placement and replay controllers, the notification log, the
//! seams a frontend plugs into, and a retained view model that terminal and
//! future graphical clients can render from.
pub mod config;
pub mod event;
pub mod frontend;
pub mod message;
pub mod placement;
pub mod ports;
pub mod replay;
pub mod session;
pub mod view_model;

pub use config::{FrontendConfig, MessageConfig, ReplayConfig};
pub use event::{EventConsumer, EventImpact};
pub use frontend::FrontendApp;
pub use message::{MessageEntry, MessageLevel, MessageLog};
pub use placement::{PendingPlacement, PlacementController, PlacementPhase};
pub use ports::{
    AnimationId, IntentSink, PlaybackScheduler, Ports, Presenter, SendError, TimelineView, TimerId,
};
pub use replay::{Navigation, PlaybackStatus, ReplayController, ReplaySession, ReplaySource};
pub use session::Session;
pub use view_model::{
    CombatRolls, HudView, OverlayView, PlacementAnimation, UpdateScope, ViewModel,
};
