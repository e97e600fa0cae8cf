use bevy::prelude::*;
use bevy::render::alpha::AlphaMode;

use super::assets::HangarAsset;
use super::ledger::{PlacementLedger, PlacementOutcome};
use super::{HangarPlaced, PlacedHangar, PlacementFloor};
use crate::perception::{PerceptionCommand, SurfaceAdded, SurfaceAnchor, SurfaceSearch};
use crate::session::SessionReset;

/// Consume surface detections: first confident anchor places the hangar,
/// everything after that is a no-op until the session resets.
pub fn handle_surface_detections(
    mut surfaces: EventReader<SurfaceAdded>,
    hangar: Res<HangarAsset>,
    mut ledger: ResMut<PlacementLedger>,
    mut search: ResMut<SurfaceSearch>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
    mut placements: EventWriter<HangarPlaced>,
    mut provider: EventWriter<PerceptionCommand>,
) {
    let ready_scene = match &*hangar {
        HangarAsset::Ready { scene } => Some(scene.clone()),
        _ => None,
    };
    let ready = ready_scene.is_some();

    let mut incoming: Vec<SurfaceAnchor> = Vec::new();
    if ready {
        // Retry an anchor that arrived while the scene was still loading.
        if let Some(deferred) = ledger.take_deferred() {
            incoming.push(deferred);
        }
    }
    incoming.extend(surfaces.read().map(|event| event.0));

    for anchor in incoming {
        match ledger.accept(anchor, ready) {
            PlacementOutcome::Placed => {
                // `accept` only returns `Placed` with a ready scene in hand.
                let Some(scene) = ready_scene.clone() else {
                    continue;
                };
                spawn_hangar(&mut commands, scene, &anchor, &mut meshes, &mut materials);
                search.enabled = false;
                provider.write(PerceptionCommand::SetSurfaceSearchEnabled(false));
                placements.write(HangarPlaced { anchor });
                info!(
                    "hangar placed at ({:.2}, {:.2})",
                    anchor.center.x, anchor.center.y
                );
            }
            PlacementOutcome::AlreadyPlaced => {
                debug!("surface {:?} ignored, hangar already placed", anchor.id);
            }
            PlacementOutcome::AssetNotReady => {
                debug!("hangar scene still loading, deferring surface {:?}", anchor.id);
            }
        }
    }
}

fn spawn_hangar(
    commands: &mut Commands,
    scene: Handle<Scene>,
    anchor: &SurfaceAnchor,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        SceneRoot(scene),
        Transform::from_xyz(anchor.center.x, 0.0, anchor.center.y),
        PlacedHangar,
        Name::new("hangar"),
    ));

    // Invisible floor matched to the anchor extent. Writes no colour, only
    // grounds lighting so the model does not float visually.
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.0, 0.0, 0.0, 0.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(anchor.extent.x, anchor.extent.y))),
        MeshMaterial3d(floor_material),
        Transform::from_xyz(anchor.center.x, 0.0, anchor.center.y),
        PlacementFloor,
        Name::new("hangar_floor"),
    ));
}

/// Tear down placement on a session reset and put the provider back into
/// surface search.
pub fn apply_session_reset(
    mut resets: EventReader<SessionReset>,
    mut ledger: ResMut<PlacementLedger>,
    mut search: ResMut<SurfaceSearch>,
    mut provider: EventWriter<PerceptionCommand>,
    mut commands: Commands,
    placed: Query<Entity, Or<(With<PlacedHangar>, With<PlacementFloor>)>>,
) {
    if resets.is_empty() {
        return;
    }
    resets.clear();

    for entity in &placed {
        commands.entity(entity).despawn();
    }
    ledger.reset();
    if !search.enabled {
        search.enabled = true;
        provider.write(PerceptionCommand::SetSurfaceSearchEnabled(true));
    }
    info!("placement cleared, surface search re-enabled");
}
