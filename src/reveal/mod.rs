//! Gated reveal animation: the clip plays out in full before the restart
//! control appears, and replaying re-arms the same gate.

pub mod animator;
pub mod playback;

use std::time::Duration;

use bevy::animation::graph::{AnimationGraph, AnimationNodeIndex};
use bevy::prelude::*;

pub use animator::{
    RevealAnimator, cancel_reveal_on_teardown, handle_replay_requests, start_reveal_on_placement,
    tick_reveal,
};
pub use playback::{PendingReveal, drive_reveal_playback, queue_reveal_playback};

use crate::ArUpdateSet;

/// The reveal clip's graph node and canonical duration, cached once when
/// the hangar asset finishes loading. The duration is authoritative and
/// never hand-coded.
#[derive(Resource, Debug, Clone)]
pub struct RevealClip {
    pub graph: Handle<AnimationGraph>,
    pub node: AnimationNodeIndex,
    pub duration: Duration,
}

/// Request to (re)play the reveal clip on the placed hangar.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayReveal;

/// User pressed the restart control.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayRequested;

pub struct RevealPlugin;

impl Plugin for RevealPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RevealAnimator>()
            .init_resource::<PendingReveal>()
            .add_event::<PlayReveal>()
            .add_event::<ReplayRequested>()
            .add_systems(
                Update,
                (
                    cancel_reveal_on_teardown.in_set(ArUpdateSet::Reset),
                    (start_reveal_on_placement, tick_reveal, handle_replay_requests)
                        .chain()
                        .in_set(ArUpdateSet::Reveal),
                ),
            );
    }
}
