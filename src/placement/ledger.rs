use bevy::prelude::*;

use crate::perception::SurfaceAnchor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed,
    /// Idempotence guard: the hangar is already in the scene.
    AlreadyPlaced,
    /// The scene file is still loading; the anchor is deferred and retried
    /// automatically once the asset becomes ready.
    AssetNotReady,
}

/// At-most-once placement bookkeeping. Pure decision logic; the system
/// layer owns the scene-graph side effects.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PlacementLedger {
    placed: bool,
    deferred: Option<SurfaceAnchor>,
}

impl PlacementLedger {
    pub fn accept(&mut self, anchor: SurfaceAnchor, asset_ready: bool) -> PlacementOutcome {
        if self.placed {
            return PlacementOutcome::AlreadyPlaced;
        }
        if !asset_ready {
            // Latest detection wins; a later anchor supersedes an earlier
            // deferred one of the same search.
            self.deferred = Some(anchor);
            return PlacementOutcome::AssetNotReady;
        }
        self.placed = true;
        self.deferred = None;
        PlacementOutcome::Placed
    }

    pub fn take_deferred(&mut self) -> Option<SurfaceAnchor> {
        self.deferred.take()
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Callable at any time, including before first placement.
    pub fn reset(&mut self) {
        self.placed = false;
        self.deferred = None;
    }
}
