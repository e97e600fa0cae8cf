use thiserror::Error;

use crate::perception::LimitedReason;

/// Recoverable tracking degradation. The `Display` text is what the status
/// banner shows while the condition lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackingDegraded {
    #[error("Initialising AR session. Please wait...")]
    Initializing,
    #[error("Tracking limited. Move the device more slowly.")]
    ExcessiveMotion,
    #[error("Tracking limited. Point the device at an area with more visible surface detail or better lighting.")]
    InsufficientFeatures,
    #[error("Camera tracking is not available.")]
    NotAvailable,
}

impl From<LimitedReason> for TrackingDegraded {
    fn from(reason: LimitedReason) -> Self {
        match reason {
            LimitedReason::Initializing => Self::Initializing,
            LimitedReason::ExcessiveMotion => Self::ExcessiveMotion,
            LimitedReason::InsufficientFeatures => Self::InsufficientFeatures,
        }
    }
}

/// Unrecoverable provider error. Surfaced to the user and followed by a
/// full session reset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Session failed: {0}")]
pub struct SessionFailure(pub String);
