use std::time::Duration;

use bevy::prelude::*;

use super::{PlayReveal, ReplayRequested, RevealClip};
use crate::perception::SessionInterrupted;
use crate::placement::{HangarPlaced, PlacementLedger};
use crate::session::SessionReset;

/// Gate between the reveal clip and the restart control: the control stays
/// hidden until the clip has played out once in full.
///
/// Invariant: at most one armed timer. Arming replaces any pending timer,
/// so expiry fires exactly once per arm.
#[derive(Resource, Debug, Default)]
pub struct RevealAnimator {
    timer: Option<Timer>,
    restart_visible: bool,
}

impl RevealAnimator {
    pub fn arm(&mut self, duration: Duration) {
        self.timer = Some(Timer::new(duration, TimerMode::Once));
        self.restart_visible = false;
    }

    /// Returns true on the tick the timer expires.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        timer.tick(delta);
        if timer.just_finished() {
            self.timer = None;
            self.restart_visible = true;
            true
        } else {
            false
        }
    }

    /// Consume a replay request. Requests before first expiry are absorbed
    /// (double-tap guard).
    pub fn try_replay(&mut self) -> bool {
        if self.restart_visible {
            self.restart_visible = false;
            true
        } else {
            false
        }
    }

    /// Teardown. Never errors, even with no timer armed.
    pub fn cancel(&mut self) {
        self.timer = None;
        self.restart_visible = false;
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn restart_visible(&self) -> bool {
        self.restart_visible
    }
}

/// Kick off the reveal as soon as the hangar lands: play the clip and arm
/// the gate for its cached duration.
pub fn start_reveal_on_placement(
    mut placements: EventReader<HangarPlaced>,
    ledger: Res<PlacementLedger>,
    clip: Option<Res<RevealClip>>,
    mut animator: ResMut<RevealAnimator>,
    mut play: EventWriter<PlayReveal>,
) {
    if placements.is_empty() {
        return;
    }
    placements.clear();
    // A provider error in the same frame as the placement has already torn
    // it down again; the stale event must not arm the gate.
    if !ledger.is_placed() {
        debug!("placement reset this frame, not arming the reveal gate");
        return;
    }
    let Some(clip) = clip else {
        warn!("hangar placed but no reveal clip is cached");
        return;
    };
    animator.arm(clip.duration);
    play.write(PlayReveal);
}

pub fn tick_reveal(time: Res<Time>, mut animator: ResMut<RevealAnimator>) {
    if !animator.is_armed() {
        return;
    }
    if animator.advance(time.delta()) {
        info!("reveal finished, restart control unlocked");
    }
}

pub fn handle_replay_requests(
    mut requests: EventReader<ReplayRequested>,
    clip: Option<Res<RevealClip>>,
    mut animator: ResMut<RevealAnimator>,
    mut play: EventWriter<PlayReveal>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();
    let Some(clip) = clip else {
        return;
    };
    if animator.try_replay() {
        animator.arm(clip.duration);
        play.write(PlayReveal);
    } else {
        debug!("replay request ignored, reveal still running");
    }
}

/// Teardown: a session reset or an interruption cancels any pending timer
/// and hides the restart control. Nothing may fire while the pipeline is
/// paused or after it was torn down.
pub fn cancel_reveal_on_teardown(
    mut resets: EventReader<SessionReset>,
    mut interruptions: EventReader<SessionInterrupted>,
    mut animator: ResMut<RevealAnimator>,
) {
    if resets.is_empty() && interruptions.is_empty() {
        return;
    }
    resets.clear();
    interruptions.clear();
    animator.cancel();
}
