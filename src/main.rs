use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy_common_assets::json::JsonAssetPlugin;

use hangar_ar::perception::script::{PerceptionScript, PerceptionScriptPlugin};
use hangar_ar::placement::{begin_hangar_load, poll_hangar_load};
use hangar_ar::reveal::{drive_reveal_playback, queue_reveal_playback};
use hangar_ar::ui::HangarHudPlugin;
use hangar_ar::{ArUpdateSet, HangarArCorePlugin};

fn main() {
    create_app().run();
}

fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(JsonAssetPlugin::<PerceptionScript>::new(&["perception.json"]))
        .add_plugins(HangarArCorePlugin)
        .add_plugins(PerceptionScriptPlugin)
        .add_plugins(HangarHudPlugin)
        .add_systems(Startup, (setup_scene, begin_hangar_load))
        .add_systems(
            Update,
            (
                poll_hangar_load.in_set(ArUpdateSet::Ingest),
                (queue_reveal_playback, drive_reveal_playback)
                    .chain()
                    .in_set(ArUpdateSet::Output),
            ),
        );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(Window {
            title: "Hangar AR".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

/// Camera plus the directional key light the ambient estimate scales.
fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 1.6, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            0.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}
