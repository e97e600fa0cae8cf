//! Scripted demo feed standing in for a real perception provider.
//!
//! A [`PerceptionScript`] JSON asset lists timestamped events; the pump
//! system replays them against elapsed time and writes the same typed
//! events a hardware provider would.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::events::*;
use super::SurfaceSearch;
use crate::ArUpdateSet;

pub const SCRIPT_PATH: &str = "demo.perception.json";

#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct PerceptionScript {
    pub events: Vec<ScriptedEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedEvent {
    /// Seconds from session start at which the event fires.
    pub at: f32,
    #[serde(flatten)]
    pub kind: ScriptedKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptedKind {
    Tracking { state: ScriptedTracking },
    Surface { center: [f32; 2], extent: [f32; 2] },
    SurfaceRemoved { id: u64 },
    Error { description: String },
    Interrupted,
    InterruptionEnded,
    AmbientLight { lumens: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedTracking {
    Normal,
    Initializing,
    ExcessiveMotion,
    InsufficientFeatures,
    NotAvailable,
}

impl From<ScriptedTracking> for TrackingState {
    fn from(scripted: ScriptedTracking) -> Self {
        match scripted {
            ScriptedTracking::Normal => TrackingState::Normal,
            ScriptedTracking::Initializing => TrackingState::Limited(LimitedReason::Initializing),
            ScriptedTracking::ExcessiveMotion => {
                TrackingState::Limited(LimitedReason::ExcessiveMotion)
            }
            ScriptedTracking::InsufficientFeatures => {
                TrackingState::Limited(LimitedReason::InsufficientFeatures)
            }
            ScriptedTracking::NotAvailable => TrackingState::NotAvailable,
        }
    }
}

#[derive(Resource, Default)]
pub struct ScriptPlayer {
    pub handle: Option<Handle<PerceptionScript>>,
    cursor: usize,
    elapsed: f32,
    next_anchor_id: u64,
}

pub fn load_perception_script(mut player: ResMut<ScriptPlayer>, asset_server: Res<AssetServer>) {
    player.handle = Some(asset_server.load(SCRIPT_PATH));
}

/// Replay scripted events whose timestamp has passed.
pub fn pump_perception_script(
    time: Res<Time>,
    mut player: ResMut<ScriptPlayer>,
    scripts: Res<Assets<PerceptionScript>>,
    search: Res<SurfaceSearch>,
    mut tracking: EventWriter<TrackingStateChanged>,
    mut surfaces: EventWriter<SurfaceAdded>,
    mut removed: EventWriter<SurfaceRemoved>,
    mut errors: EventWriter<SessionErrorEvent>,
    mut interrupted: EventWriter<SessionInterrupted>,
    mut interruption_ended: EventWriter<InterruptionEnded>,
    mut ambient: EventWriter<AmbientLightSample>,
) {
    let Some(script) = player.handle.as_ref().and_then(|h| scripts.get(h)) else {
        return;
    };
    player.elapsed += time.delta_secs();

    while let Some(entry) = script.events.get(player.cursor) {
        if entry.at > player.elapsed {
            break;
        }
        player.cursor += 1;
        match &entry.kind {
            ScriptedKind::Tracking { state } => {
                tracking.write(TrackingStateChanged((*state).into()));
            }
            ScriptedKind::Surface { center, extent } => {
                if !search.enabled {
                    debug!("surface search disabled, dropping scripted surface");
                    continue;
                }
                let id = SurfaceAnchorId(player.next_anchor_id);
                player.next_anchor_id += 1;
                surfaces.write(SurfaceAdded(SurfaceAnchor {
                    id,
                    center: Vec2::from_array(*center),
                    extent: Vec2::from_array(*extent),
                }));
            }
            ScriptedKind::SurfaceRemoved { id } => {
                removed.write(SurfaceRemoved(SurfaceAnchorId(*id)));
            }
            ScriptedKind::Error { description } => {
                errors.write(SessionErrorEvent(description.clone()));
            }
            ScriptedKind::Interrupted => {
                interrupted.write(SessionInterrupted);
            }
            ScriptedKind::InterruptionEnded => {
                interruption_ended.write(InterruptionEnded);
            }
            ScriptedKind::AmbientLight { lumens } => {
                ambient.write(AmbientLightSample { lumens: *lumens });
            }
        }
    }
}

/// Provider side of [`PerceptionCommand`]. The demo feed rewinds on a
/// session reset so a scripted failure loops the whole flow.
pub fn apply_perception_commands(
    mut commands_in: EventReader<PerceptionCommand>,
    mut player: ResMut<ScriptPlayer>,
) {
    for command in commands_in.read() {
        match command {
            PerceptionCommand::SetSurfaceSearchEnabled(enabled) => {
                debug!("provider: surface search enabled = {enabled}");
            }
            PerceptionCommand::ResetSession { clear_anchors } => {
                info!("provider: session reset (clear_anchors = {clear_anchors}), replaying feed");
                player.cursor = 0;
                player.elapsed = 0.0;
            }
        }
    }
}

pub struct PerceptionScriptPlugin;

impl Plugin for PerceptionScriptPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScriptPlayer>()
            .add_systems(Startup, load_perception_script)
            .add_systems(
                Update,
                (
                    pump_perception_script.in_set(ArUpdateSet::Ingest),
                    apply_perception_commands.in_set(ArUpdateSet::Output),
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_json_round_trips_tagged_events() {
        let json = r#"{
            "events": [
                { "at": 0.5, "event": "tracking", "state": "initializing" },
                { "at": 2.0, "event": "surface", "center": [0.0, 0.0], "extent": [1.0, 1.0] },
                { "at": 4.0, "event": "ambient_light", "lumens": 850.0 },
                { "at": 6.0, "event": "interrupted" }
            ]
        }"#;
        let script: PerceptionScript = serde_json::from_str(json).unwrap();
        assert_eq!(script.events.len(), 4);
        assert!(matches!(
            script.events[0].kind,
            ScriptedKind::Tracking {
                state: ScriptedTracking::Initializing
            }
        ));
        assert!(matches!(
            script.events[1].kind,
            ScriptedKind::Surface { .. }
        ));
        assert!(matches!(script.events[3].kind, ScriptedKind::Interrupted));
    }

    #[test]
    fn scripted_tracking_maps_to_provider_states() {
        assert_eq!(
            TrackingState::from(ScriptedTracking::ExcessiveMotion),
            TrackingState::Limited(LimitedReason::ExcessiveMotion)
        );
        assert_eq!(
            TrackingState::from(ScriptedTracking::NotAvailable),
            TrackingState::NotAvailable
        );
    }
}
