//! Surface-anchored AR augmentation core.
//!
//! A camera feed is augmented with a hangar model anchored to the first
//! confidently detected horizontal surface, lit from the real-world
//! ambient estimate, with a reveal animation gated behind its own
//! duration. Perception (tracking, plane detection, light estimation) and
//! rendering are collaborators: the core is three plugins — session state
//! machine, placement controller, reveal animator — that run on any plain
//! `App`, headless included.

pub mod lighting;
pub mod perception;
pub mod placement;
pub mod reveal;
pub mod session;
pub mod ui;

use bevy::prelude::*;

use perception::PerceptionEventsPlugin;
use placement::PlacementPlugin;
use reveal::RevealPlugin;
use session::SessionPlugin;

/// Per-frame ordering. One logical actor: every perception event, timer
/// expiry, and control activation is serialised through this chain, and
/// reset side effects land in the same frame the machine decides to reset.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArUpdateSet {
    /// Provider events enter the frame.
    Ingest,
    /// Surface detections are consumed, the hangar may spawn.
    Placement,
    /// The session machine applies the frame's events.
    Session,
    /// Reset fan-out (placement teardown, timer cancellation).
    Reset,
    /// Reveal gating: arm, tick, replay.
    Reveal,
    /// Display and provider-facing outputs.
    Output,
}

/// Session state machine + placement controller + reveal animator, with
/// the perception event vocabulary and ambient light pass-through.
pub struct HangarArCorePlugin;

impl Plugin for HangarArCorePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                ArUpdateSet::Ingest,
                ArUpdateSet::Placement,
                ArUpdateSet::Session,
                ArUpdateSet::Reset,
                ArUpdateSet::Reveal,
                ArUpdateSet::Output,
            )
                .chain(),
        )
        .init_resource::<AmbientLight>()
        .add_plugins((
            PerceptionEventsPlugin,
            SessionPlugin,
            PlacementPlugin,
            RevealPlugin,
        ))
        .add_systems(
            Update,
            lighting::apply_ambient_estimate.in_set(ArUpdateSet::Output),
        );
    }
}
