//! One-shot placement of the hangar on the first detected surface.
//!
//! The decision logic lives in [`PlacementLedger`]; the systems own the
//! scene-graph effects (scene spawn, invisible floor, surface-search
//! disable). Placement happens at most once per session and survives the
//! asset-load race: an anchor that arrives before the GLTF resolves is
//! deferred and placed automatically once [`HangarAsset`] flips to ready.

pub mod assets;
pub mod ledger;
pub mod systems;

use bevy::prelude::*;

pub use assets::{HANGAR_MODEL_PATH, HangarAsset, begin_hangar_load, poll_hangar_load};
pub use ledger::{PlacementLedger, PlacementOutcome};
pub use systems::{apply_session_reset, handle_surface_detections};

use crate::ArUpdateSet;
use crate::perception::SurfaceAnchor;

/// Marker for the placed hangar scene root.
#[derive(Component)]
pub struct PlacedHangar;

/// Marker for the invisible floor under the hangar.
#[derive(Component)]
pub struct PlacementFloor;

/// Fired exactly once per successful placement.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HangarPlaced {
    pub anchor: SurfaceAnchor,
}

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlacementLedger>()
            .init_resource::<HangarAsset>()
            .add_event::<HangarPlaced>()
            .add_systems(
                Update,
                (
                    handle_surface_detections.in_set(ArUpdateSet::Placement),
                    apply_session_reset.in_set(ArUpdateSet::Reset),
                ),
            );
    }
}
