use super::state::SessionPhase;

/// Hint shown while the provider is still looking for a usable surface.
pub const SEARCHING_HINT: &str = "Move the device around to find a horizontal surface.";

pub const STARTING_MESSAGE: &str = "Starting AR session...";
pub const INTERRUPTED_MESSAGE: &str = "Session interrupted. Tracking will resume shortly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSeverity {
    Info,
    Warning,
    Error,
}

/// User-facing session status. Derived, never stored: always recomputed
/// from the current phase and whether any surface has been detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub message: String,
    pub severity: StatusSeverity,
}

impl SessionStatus {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: StatusSeverity::Info,
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: StatusSeverity::Warning,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: StatusSeverity::Error,
        }
    }

    /// Empty message, nothing to show.
    pub fn is_clear(&self) -> bool {
        self.message.is_empty()
    }
}

/// Pure projection from machine state to status. The message is empty
/// exactly when tracking is nominal and a surface has already been found.
pub fn project(phase: &SessionPhase, surface_detected: bool) -> SessionStatus {
    match phase {
        SessionPhase::AwaitingFirstFrame => SessionStatus::info(STARTING_MESSAGE),
        SessionPhase::Searching => SessionStatus::info(SEARCHING_HINT),
        SessionPhase::Tracking { .. } if surface_detected => SessionStatus::info(""),
        SessionPhase::Tracking { .. } => SessionStatus::info(SEARCHING_HINT),
        SessionPhase::Limited { degraded, .. } => SessionStatus::warning(degraded.to_string()),
        SessionPhase::Failed(failure) => SessionStatus::error(failure.to_string()),
        SessionPhase::Interrupted => SessionStatus::warning(INTERRUPTED_MESSAGE),
    }
}
