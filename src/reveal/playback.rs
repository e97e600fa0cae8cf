//! Renderer-side playback of the reveal clip.
//!
//! Scene instantiation is asynchronous, so a play request is held pending
//! until the spawned hangar exposes an `AnimationPlayer`, then the cached
//! graph node is (re)played from the start.

use bevy::animation::graph::AnimationGraphHandle;
use bevy::prelude::*;

use super::{PlayReveal, RevealClip};
use crate::placement::PlacedHangar;

#[derive(Resource, Debug, Default)]
pub struct PendingReveal(pub bool);

pub fn queue_reveal_playback(
    mut requests: EventReader<PlayReveal>,
    mut pending: ResMut<PendingReveal>,
) {
    if !requests.is_empty() {
        requests.clear();
        pending.0 = true;
    }
}

pub fn drive_reveal_playback(
    mut pending: ResMut<PendingReveal>,
    clip: Option<Res<RevealClip>>,
    hangars: Query<Entity, With<PlacedHangar>>,
    children: Query<&Children>,
    mut players: Query<&mut AnimationPlayer>,
    mut commands: Commands,
) {
    if !pending.0 {
        return;
    }
    let Some(clip) = clip else {
        return;
    };
    let Ok(root) = hangars.single() else {
        // Hangar despawned (session reset) before the scene finished
        // instantiating; drop the stale request.
        pending.0 = false;
        return;
    };
    for entity in std::iter::once(root).chain(children.iter_descendants(root)) {
        if let Ok(mut player) = players.get_mut(entity) {
            commands
                .entity(entity)
                .insert(AnimationGraphHandle(clip.graph.clone()));
            player.play(clip.node).replay();
            pending.0 = false;
            return;
        }
    }
}
