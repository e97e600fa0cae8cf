use bevy::prelude::*;

use super::error::{SessionFailure, TrackingDegraded};
use super::status::{self, SessionStatus};
use crate::perception::TrackingState;

/// Lifecycle phase of the AR session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// No provider event received yet.
    AwaitingFirstFrame,
    /// Tracking lost and waiting to reacquire (post-reset).
    Searching,
    Tracking {
        with_asset: bool,
    },
    /// Tracking degraded; `resume` is the phase to return to once the
    /// provider reports `Normal` again.
    Limited {
        degraded: TrackingDegraded,
        resume: ResumePhase,
    },
    Failed(SessionFailure),
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumePhase {
    Searching,
    Tracking { with_asset: bool },
}

/// Owns every session lifecycle transition. Systems feed provider events
/// in; the only externally observable output is the projected status.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SessionMachine {
    phase: SessionPhase,
    surface_detected: bool,
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self {
            phase: SessionPhase::AwaitingFirstFrame,
            surface_detected: false,
        }
    }
}

impl SessionMachine {
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn surface_detected(&self) -> bool {
        self.surface_detected
    }

    pub fn status(&self) -> SessionStatus {
        status::project(&self.phase, self.surface_detected)
    }

    pub fn on_tracking(&mut self, state: TrackingState) {
        // No frames arrive during an interruption; a stray late event must
        // not cancel the interrupted phase.
        if self.phase == SessionPhase::Interrupted {
            return;
        }
        match state {
            TrackingState::Normal => {
                self.phase = match &self.phase {
                    SessionPhase::Tracking { with_asset } => SessionPhase::Tracking {
                        with_asset: *with_asset,
                    },
                    SessionPhase::Limited {
                        resume: ResumePhase::Tracking { with_asset },
                        ..
                    } => SessionPhase::Tracking {
                        with_asset: *with_asset,
                    },
                    _ => SessionPhase::Tracking { with_asset: false },
                };
            }
            TrackingState::Limited(reason) => {
                self.phase = SessionPhase::Limited {
                    degraded: reason.into(),
                    resume: self.resume_target(),
                };
            }
            TrackingState::NotAvailable => {
                self.phase = SessionPhase::Limited {
                    degraded: TrackingDegraded::NotAvailable,
                    resume: self.resume_target(),
                };
            }
        }
    }

    fn resume_target(&self) -> ResumePhase {
        match &self.phase {
            SessionPhase::Tracking { with_asset } => ResumePhase::Tracking {
                with_asset: *with_asset,
            },
            SessionPhase::Limited { resume, .. } => *resume,
            _ => ResumePhase::Searching,
        }
    }

    pub fn on_surface_added(&mut self) {
        self.surface_detected = true;
    }

    /// Detection stays sticky for the session; anchor update/merge handling
    /// is the provider's business.
    pub fn on_surface_removed(&mut self) {}

    pub fn on_placed(&mut self) {
        self.surface_detected = true;
        match &mut self.phase {
            SessionPhase::Tracking { with_asset } => *with_asset = true,
            SessionPhase::Limited {
                resume: ResumePhase::Tracking { with_asset },
                ..
            } => *with_asset = true,
            _ => {}
        }
    }

    /// Provider error. The phase stays `Failed` (keeping the error on
    /// screen) until the next tracking event; the caller fires the reset.
    pub fn on_error(&mut self, description: String) {
        self.phase = SessionPhase::Failed(SessionFailure(description));
        self.surface_detected = false;
    }

    pub fn on_interrupted(&mut self) {
        self.phase = SessionPhase::Interrupted;
    }

    pub fn on_interruption_ended(&mut self) {
        self.phase = SessionPhase::Searching;
        self.surface_detected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::LimitedReason;
    use crate::session::status::{SEARCHING_HINT, StatusSeverity};

    fn machine() -> SessionMachine {
        SessionMachine::default()
    }

    #[test]
    fn first_normal_frame_starts_tracking_without_asset() {
        let mut m = machine();
        m.on_tracking(TrackingState::Normal);
        assert_eq!(m.phase(), &SessionPhase::Tracking { with_asset: false });
        // No surface yet, so the searching hint is still up.
        assert_eq!(m.status().message, SEARCHING_HINT);
    }

    #[test]
    fn status_clears_once_tracking_with_a_detected_surface() {
        let mut m = machine();
        m.on_tracking(TrackingState::Normal);
        m.on_surface_added();
        m.on_placed();
        assert_eq!(m.phase(), &SessionPhase::Tracking { with_asset: true });
        assert!(m.status().is_clear());
    }

    #[test]
    fn limited_remembers_and_restores_tracking_with_asset() {
        let mut m = machine();
        m.on_tracking(TrackingState::Normal);
        m.on_surface_added();
        m.on_placed();
        m.on_tracking(TrackingState::Limited(LimitedReason::ExcessiveMotion));
        let status = m.status();
        assert_eq!(status.severity, StatusSeverity::Warning);
        assert!(status.message.contains("more slowly"));

        m.on_tracking(TrackingState::Normal);
        assert_eq!(m.phase(), &SessionPhase::Tracking { with_asset: true });
        assert!(m.status().is_clear());
    }

    #[test]
    fn repeated_limited_keeps_the_original_resume_target() {
        let mut m = machine();
        m.on_tracking(TrackingState::Normal);
        m.on_placed();
        m.on_tracking(TrackingState::Limited(LimitedReason::ExcessiveMotion));
        m.on_tracking(TrackingState::Limited(LimitedReason::InsufficientFeatures));
        m.on_tracking(TrackingState::NotAvailable);
        m.on_tracking(TrackingState::Normal);
        assert_eq!(m.phase(), &SessionPhase::Tracking { with_asset: true });
    }

    #[test]
    fn error_fails_the_session_and_clears_detection() {
        let mut m = machine();
        m.on_tracking(TrackingState::Normal);
        m.on_surface_added();
        m.on_error("camera unavailable".into());
        let status = m.status();
        assert_eq!(status.severity, StatusSeverity::Error);
        assert!(status.message.contains("camera unavailable"));
        assert!(!m.surface_detected());

        // Tracking recovery leaves the failed phase.
        m.on_tracking(TrackingState::Normal);
        assert_eq!(m.phase(), &SessionPhase::Tracking { with_asset: false });
        assert_eq!(m.status().message, SEARCHING_HINT);
    }

    #[test]
    fn interruption_swallows_tracking_until_it_ends() {
        let mut m = machine();
        m.on_tracking(TrackingState::Normal);
        m.on_placed();
        m.on_interrupted();
        assert_eq!(m.phase(), &SessionPhase::Interrupted);
        assert_eq!(m.status().severity, StatusSeverity::Warning);

        m.on_tracking(TrackingState::Normal);
        assert_eq!(m.phase(), &SessionPhase::Interrupted);

        m.on_interruption_ended();
        assert_eq!(m.phase(), &SessionPhase::Searching);
        assert!(!m.surface_detected());
        assert_eq!(m.status().message, SEARCHING_HINT);
    }

    #[test]
    fn severity_is_error_only_while_failed() {
        // Sweep a representative event soup and check the two status
        // invariants after every step.
        let mut m = machine();
        let steps: Vec<Box<dyn Fn(&mut SessionMachine)>> = vec![
            Box::new(|m| m.on_tracking(TrackingState::Limited(LimitedReason::Initializing))),
            Box::new(|m| m.on_tracking(TrackingState::Normal)),
            Box::new(|m| m.on_surface_added()),
            Box::new(|m| m.on_placed()),
            Box::new(|m| m.on_tracking(TrackingState::NotAvailable)),
            Box::new(|m| m.on_tracking(TrackingState::Normal)),
            Box::new(|m| m.on_error("boom".into())),
            Box::new(|m| m.on_tracking(TrackingState::Normal)),
            Box::new(|m| m.on_interrupted()),
            Box::new(|m| m.on_interruption_ended()),
        ];
        for step in steps {
            step(&mut m);
            let status = m.status();
            let failed = matches!(m.phase(), SessionPhase::Failed(_));
            assert_eq!(status.severity == StatusSeverity::Error, failed);
            if status.is_clear() {
                assert!(matches!(m.phase(), SessionPhase::Tracking { .. }));
                assert!(m.surface_detected());
            }
        }
    }
}
