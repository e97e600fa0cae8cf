//! Session lifecycle state machine.
//!
//! All provider callbacks funnel into one [`SessionMachine`] resource; no
//! other part of the crate makes lifecycle decisions. Every update
//! re-projects a [`SessionStatus`] so the user always sees exactly one
//! coherent message, and the failure/interruption paths fan a
//! [`SessionReset`] out to placement and the reveal animator:
//!
//! ```text
//! perception events ──> SessionMachine ──> CurrentStatus ──> status banner
//!                              │
//!                              └──> SessionReset ──> placement + reveal teardown
//! ```

pub mod error;
pub mod state;
pub mod status;

use bevy::prelude::*;

pub use error::{SessionFailure, TrackingDegraded};
pub use state::{ResumePhase, SessionMachine, SessionPhase};
pub use status::{SessionStatus, StatusSeverity};

use crate::ArUpdateSet;
use crate::perception::{
    InterruptionEnded, PerceptionCommand, SessionErrorEvent, SessionInterrupted, SurfaceAdded,
    SurfaceRemoved, TrackingStateChanged,
};
use crate::placement::HangarPlaced;

/// Full-reset broadcast: clear the placed asset, cancel timers, re-enable
/// surface search.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReset {
    pub cause: ResetCause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetCause {
    Failure,
    InterruptionEnded,
}

/// Latest projected status, mirrored for the display layer.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct CurrentStatus(pub SessionStatus);

impl Default for CurrentStatus {
    fn default() -> Self {
        Self(SessionMachine::default().status())
    }
}

/// Feed the frame's perception events into the machine and republish the
/// status if it changed.
pub fn drive_session(
    mut machine: ResMut<SessionMachine>,
    mut current: ResMut<CurrentStatus>,
    mut tracking_events: EventReader<TrackingStateChanged>,
    mut surfaces_added: EventReader<SurfaceAdded>,
    mut surfaces_removed: EventReader<SurfaceRemoved>,
    mut placements: EventReader<HangarPlaced>,
    mut errors: EventReader<SessionErrorEvent>,
    mut interruptions: EventReader<SessionInterrupted>,
    mut interruption_ends: EventReader<InterruptionEnded>,
    mut resets: EventWriter<SessionReset>,
    mut provider: EventWriter<PerceptionCommand>,
) {
    for event in tracking_events.read() {
        machine.on_tracking(event.0);
    }
    for event in surfaces_added.read() {
        debug!("surface {:?} detected", event.0.id);
        machine.on_surface_added();
    }
    for event in surfaces_removed.read() {
        debug!("surface {:?} removed", event.0);
        machine.on_surface_removed();
    }
    for _ in placements.read() {
        machine.on_placed();
    }

    let mut reset_cause = None;
    for event in errors.read() {
        warn!("session error from provider: {}", event.0);
        machine.on_error(event.0.clone());
        reset_cause = Some(ResetCause::Failure);
    }
    for _ in interruptions.read() {
        machine.on_interrupted();
    }
    for _ in interruption_ends.read() {
        machine.on_interruption_ended();
        reset_cause = Some(ResetCause::InterruptionEnded);
    }
    if let Some(cause) = reset_cause {
        resets.write(SessionReset { cause });
        provider.write(PerceptionCommand::ResetSession {
            clear_anchors: true,
        });
    }

    let projected = machine.status();
    if current.0 != projected {
        info!(
            "session status: {:?} {:?}",
            projected.severity, projected.message
        );
        current.0 = projected;
    }
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionMachine>()
            .init_resource::<CurrentStatus>()
            .add_event::<SessionReset>()
            .add_systems(Update, drive_session.in_set(ArUpdateSet::Session));
    }
}
