//! Event boundary to the perception provider.
//!
//! The provider (camera tracking, plane detection, light estimation) lives
//! outside this crate. Everything it reports arrives as typed Bevy events,
//! and everything the core asks of it leaves as [`PerceptionCommand`]
//! events. `script` ships a demo provider that replays a JSON-scripted
//! event feed so the whole pipeline runs without real hardware.

pub mod events;
pub mod script;

use bevy::prelude::*;

pub use events::{
    AmbientLightSample, InterruptionEnded, LimitedReason, PerceptionCommand, SessionErrorEvent,
    SessionInterrupted, SurfaceAdded, SurfaceAnchor, SurfaceAnchorId, SurfaceRemoved,
    TrackingState, TrackingStateChanged,
};

/// Whether the provider should keep searching for horizontal surfaces.
/// The core flips this off after the one wanted placement and back on
/// when the session resets.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSearch {
    pub enabled: bool,
}

impl Default for SurfaceSearch {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Registers the perception event vocabulary shared by core and provider.
pub struct PerceptionEventsPlugin;

impl Plugin for PerceptionEventsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceSearch>()
            .add_event::<TrackingStateChanged>()
            .add_event::<SurfaceAdded>()
            .add_event::<SurfaceRemoved>()
            .add_event::<SessionErrorEvent>()
            .add_event::<SessionInterrupted>()
            .add_event::<InterruptionEnded>()
            .add_event::<AmbientLightSample>()
            .add_event::<PerceptionCommand>();
    }
}
