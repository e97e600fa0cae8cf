//! Asynchronous load of the hangar scene and its reveal clip.
//!
//! The tagged readiness variant replaces the force-unwrapped globals of
//! earlier drafts: nothing downstream can touch the scene before it exists,
//! and a surface detected mid-load is deferred instead of dropped.

use std::time::Duration;

use bevy::animation::graph::AnimationGraph;
use bevy::asset::LoadState;
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;

use crate::reveal::RevealClip;

pub const HANGAR_MODEL_PATH: &str = "hangar.glb";

#[derive(Resource, Debug, Default)]
pub enum HangarAsset {
    #[default]
    NotLoaded,
    Loading {
        scene: Handle<Scene>,
        clip: Handle<AnimationClip>,
    },
    Ready {
        scene: Handle<Scene>,
    },
}

impl HangarAsset {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    pub fn scene(&self) -> Option<&Handle<Scene>> {
        match self {
            Self::Ready { scene } => Some(scene),
            _ => None,
        }
    }
}

pub fn begin_hangar_load(mut hangar: ResMut<HangarAsset>, asset_server: Res<AssetServer>) {
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(HANGAR_MODEL_PATH));
    let clip = asset_server.load(GltfAssetLabel::Animation(0).from_asset(HANGAR_MODEL_PATH));
    info!("loading hangar scene from {HANGAR_MODEL_PATH}");
    *hangar = HangarAsset::Loading { scene, clip };
}

/// Poll the load until both scene and clip resolve, then cache the clip's
/// canonical duration once into [`RevealClip`].
pub fn poll_hangar_load(
    mut hangar: ResMut<HangarAsset>,
    asset_server: Res<AssetServer>,
    clips: Res<Assets<AnimationClip>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut commands: Commands,
) {
    let (scene, clip) = match &*hangar {
        HangarAsset::Loading { scene, clip } => (scene.clone(), clip.clone()),
        _ => return,
    };

    for handle_id in [scene.id().untyped(), clip.id().untyped()] {
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle_id) {
            warn!("hangar asset load failed: {err}");
            *hangar = HangarAsset::NotLoaded;
            return;
        }
    }

    if !asset_server.is_loaded_with_dependencies(&scene) {
        return;
    }
    let Some(clip_asset) = clips.get(&clip) else {
        return;
    };

    let duration = Duration::from_secs_f32(clip_asset.duration());
    let (graph, node) = AnimationGraph::from_clip(clip.clone());
    commands.insert_resource(RevealClip {
        graph: graphs.add(graph),
        node,
        duration,
    });
    info!(
        "hangar scene ready, reveal clip runs {:.2}s",
        duration.as_secs_f32()
    );
    *hangar = HangarAsset::Ready { scene };
}
