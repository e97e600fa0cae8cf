//! End-to-end flow through the headless core: scripted perception events
//! in, session status / placement / reveal gating out.

use std::time::Duration;

use bevy::prelude::*;

use hangar_ar::HangarArCorePlugin;
use hangar_ar::perception::{
    InterruptionEnded, LimitedReason, SessionErrorEvent, SessionInterrupted, SurfaceAdded,
    SurfaceAnchor, SurfaceAnchorId, SurfaceSearch, TrackingState, TrackingStateChanged,
};
use hangar_ar::placement::{HangarAsset, PlacedHangar, PlacementLedger};
use hangar_ar::reveal::{ReplayRequested, RevealAnimator, RevealClip};
use hangar_ar::session::{CurrentStatus, StatusSeverity, status::SEARCHING_HINT};

const CLIP_SECONDS: f32 = 2.5;

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(HangarArCorePlugin);
    app.init_resource::<Time>();
    // Stand-ins for the render-side asset stores the placement systems use.
    app.insert_resource(Assets::<Mesh>::default());
    app.insert_resource(Assets::<StandardMaterial>::default());
    app
}

fn ready_hangar(app: &mut App) {
    app.insert_resource(HangarAsset::Ready {
        scene: Handle::default(),
    });
    app.insert_resource(RevealClip {
        graph: Handle::default(),
        node: bevy::animation::graph::AnimationNodeIndex::new(0),
        duration: Duration::from_secs_f32(CLIP_SECONDS),
    });
}

fn step(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

fn send<E: Event>(app: &mut App, event: E) {
    app.world_mut().send_event(event);
}

fn anchor(id: u64, x: f32, z: f32) -> SurfaceAnchor {
    SurfaceAnchor {
        id: SurfaceAnchorId(id),
        center: Vec2::new(x, z),
        extent: Vec2::new(1.0, 1.0),
    }
}

fn status(app: &App) -> CurrentStatus {
    app.world().resource::<CurrentStatus>().clone()
}

fn placed_count(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<Entity, With<PlacedHangar>>()
        .iter(app.world())
        .count()
}

fn animator(app: &App) -> &RevealAnimator {
    app.world().resource::<RevealAnimator>()
}

#[test]
fn scenario_searching_then_clear_with_one_placement() {
    let mut app = test_app();
    ready_hangar(&mut app);

    send(&mut app, TrackingStateChanged(TrackingState::Normal));
    step(&mut app, 0.0);
    assert_eq!(status(&app).0.message, SEARCHING_HINT);
    assert_eq!(status(&app).0.severity, StatusSeverity::Info);

    send(&mut app, SurfaceAdded(anchor(0, 0.0, 0.0)));
    send(&mut app, TrackingStateChanged(TrackingState::Normal));
    step(&mut app, 0.0);

    assert!(status(&app).0.is_clear());
    assert_eq!(placed_count(&mut app), 1);
    let transform = *app
        .world_mut()
        .query_filtered::<&Transform, With<PlacedHangar>>()
        .single(app.world())
        .unwrap();
    assert_eq!(transform.translation, Vec3::ZERO);
}

#[test]
fn repeated_detections_place_exactly_one_hangar() {
    let mut app = test_app();
    ready_hangar(&mut app);

    for i in 0..3 {
        send(&mut app, SurfaceAdded(anchor(i, i as f32, 0.0)));
    }
    step(&mut app, 0.0);
    send(&mut app, SurfaceAdded(anchor(7, 5.0, 5.0)));
    step(&mut app, 0.0);

    assert_eq!(placed_count(&mut app), 1);
    assert!(app.world().resource::<PlacementLedger>().is_placed());
    assert!(!app.world().resource::<SurfaceSearch>().enabled);
}

#[test]
fn surface_seen_during_load_places_once_asset_is_ready() {
    let mut app = test_app();
    // HangarAsset defaults to NotLoaded.

    send(&mut app, SurfaceAdded(anchor(0, 1.0, 2.0)));
    step(&mut app, 0.0);
    assert_eq!(placed_count(&mut app), 0);

    ready_hangar(&mut app);
    step(&mut app, 0.0);
    assert_eq!(placed_count(&mut app), 1);
    let transform = *app
        .world_mut()
        .query_filtered::<&Transform, With<PlacedHangar>>()
        .single(app.world())
        .unwrap();
    assert_eq!(transform.translation, Vec3::new(1.0, 0.0, 2.0));
}

#[test]
fn restart_control_stays_hidden_for_the_clip_duration() {
    let mut app = test_app();
    ready_hangar(&mut app);

    send(&mut app, SurfaceAdded(anchor(0, 0.0, 0.0)));
    step(&mut app, 0.0);
    assert!(animator(&app).is_armed());
    assert!(!animator(&app).restart_visible());

    step(&mut app, CLIP_SECONDS - 0.5);
    assert!(!animator(&app).restart_visible());

    step(&mut app, 0.6);
    assert!(animator(&app).restart_visible());
    assert!(!animator(&app).is_armed());
}

#[test]
fn replay_before_expiry_is_absorbed_and_after_expiry_re_arms() {
    let mut app = test_app();
    ready_hangar(&mut app);

    send(&mut app, SurfaceAdded(anchor(0, 0.0, 0.0)));
    step(&mut app, 0.0);

    // Mid-animation tap: nothing happens, the original timer keeps going.
    send(&mut app, ReplayRequested);
    step(&mut app, 1.0);
    assert!(animator(&app).is_armed());
    assert!(!animator(&app).restart_visible());

    step(&mut app, CLIP_SECONDS);
    assert!(animator(&app).restart_visible());

    send(&mut app, ReplayRequested);
    step(&mut app, 0.0);
    assert!(animator(&app).is_armed());
    assert!(!animator(&app).restart_visible());

    step(&mut app, CLIP_SECONDS + 0.1);
    assert!(animator(&app).restart_visible());
}

#[test]
fn provider_error_resets_everything_and_surfaces_the_message() {
    let mut app = test_app();
    ready_hangar(&mut app);

    send(&mut app, TrackingStateChanged(TrackingState::Normal));
    send(&mut app, SurfaceAdded(anchor(0, 0.0, 0.0)));
    step(&mut app, 0.0);
    assert_eq!(placed_count(&mut app), 1);
    assert!(animator(&app).is_armed());

    send(&mut app, SessionErrorEvent("camera unavailable".into()));
    step(&mut app, 0.0);

    let current = status(&app);
    assert_eq!(current.0.severity, StatusSeverity::Error);
    assert!(current.0.message.contains("camera unavailable"));

    // Reset invariants: nothing placed, search re-enabled, no armed timer,
    // restart hidden.
    assert_eq!(placed_count(&mut app), 0);
    assert!(app.world().resource::<SurfaceSearch>().enabled);
    assert!(!app.world().resource::<PlacementLedger>().is_placed());
    assert!(!animator(&app).is_armed());
    assert!(!animator(&app).restart_visible());

    // Recovery: tracking resumes and a new surface places again.
    send(&mut app, TrackingStateChanged(TrackingState::Normal));
    send(&mut app, SurfaceAdded(anchor(9, 0.5, 0.5)));
    step(&mut app, 0.0);
    assert_eq!(placed_count(&mut app), 1);
    assert!(status(&app).0.is_clear());
}

#[test]
fn same_frame_placement_and_error_leaves_reveal_disarmed() {
    let mut app = test_app();
    ready_hangar(&mut app);

    // Surface detection and provider error land in the same frame: the
    // placement is torn down again before the reveal gate ever runs.
    send(&mut app, SurfaceAdded(anchor(0, 0.0, 0.0)));
    send(&mut app, SessionErrorEvent("tracking crashed".into()));
    step(&mut app, 0.0);

    assert_eq!(status(&app).0.severity, StatusSeverity::Error);
    assert_eq!(placed_count(&mut app), 0);
    assert!(app.world().resource::<SurfaceSearch>().enabled);
    assert!(!app.world().resource::<PlacementLedger>().is_placed());
    assert!(!animator(&app).is_armed());
    assert!(!animator(&app).restart_visible());

    // The stale placement event must not unlock the restart control later.
    step(&mut app, CLIP_SECONDS + 1.0);
    assert!(!animator(&app).restart_visible());
}

#[test]
fn interruption_cancels_a_pending_reveal_timer() {
    let mut app = test_app();
    ready_hangar(&mut app);

    send(&mut app, SurfaceAdded(anchor(0, 0.0, 0.0)));
    step(&mut app, 0.0);
    assert!(animator(&app).is_armed());

    send(&mut app, SessionInterrupted);
    step(&mut app, 0.0);
    assert!(!animator(&app).is_armed());
    assert!(!animator(&app).restart_visible());

    // Nothing may unlock while the pipeline is paused.
    step(&mut app, CLIP_SECONDS + 1.0);
    assert!(!animator(&app).restart_visible());
}

#[test]
fn interruption_resets_on_end_and_returns_to_searching() {
    let mut app = test_app();
    ready_hangar(&mut app);

    send(&mut app, SurfaceAdded(anchor(0, 0.0, 0.0)));
    send(&mut app, TrackingStateChanged(TrackingState::Normal));
    step(&mut app, 0.0);

    send(&mut app, SessionInterrupted);
    step(&mut app, 0.0);
    assert_eq!(status(&app).0.severity, StatusSeverity::Warning);
    // Interruption alone does not tear anything down yet.
    assert_eq!(placed_count(&mut app), 1);

    send(&mut app, InterruptionEnded);
    step(&mut app, 0.0);
    assert_eq!(status(&app).0.message, SEARCHING_HINT);
    assert_eq!(placed_count(&mut app), 0);
    assert!(app.world().resource::<SurfaceSearch>().enabled);
    assert!(!animator(&app).is_armed());
    assert!(!animator(&app).restart_visible());
}

#[test]
fn ambient_estimate_scales_scene_lighting() {
    let mut app = test_app();
    let light = app.world_mut().spawn(DirectionalLight::default()).id();

    send(
        &mut app,
        hangar_ar::perception::AmbientLightSample { lumens: 1000.0 },
    );
    step(&mut app, 0.0);
    let at_baseline = app
        .world()
        .get::<DirectionalLight>(light)
        .unwrap()
        .illuminance;

    send(
        &mut app,
        hangar_ar::perception::AmbientLightSample { lumens: 500.0 },
    );
    step(&mut app, 0.0);
    let at_half = app
        .world()
        .get::<DirectionalLight>(light)
        .unwrap()
        .illuminance;

    assert!((at_half - at_baseline * 0.5).abs() < f32::EPSILON * at_baseline);
}

#[test]
fn degraded_tracking_warns_and_resumes_with_asset() {
    let mut app = test_app();
    ready_hangar(&mut app);

    send(&mut app, TrackingStateChanged(TrackingState::Normal));
    send(&mut app, SurfaceAdded(anchor(0, 0.0, 0.0)));
    step(&mut app, 0.0);
    assert!(status(&app).0.is_clear());

    send(
        &mut app,
        TrackingStateChanged(TrackingState::Limited(LimitedReason::ExcessiveMotion)),
    );
    step(&mut app, 0.0);
    let current = status(&app);
    assert_eq!(current.0.severity, StatusSeverity::Warning);
    assert!(current.0.message.contains("more slowly"));

    send(&mut app, TrackingStateChanged(TrackingState::Normal));
    step(&mut app, 0.0);
    assert!(status(&app).0.is_clear());
    assert_eq!(placed_count(&mut app), 1);
}
