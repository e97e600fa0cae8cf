use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tracking-quality classification reported by the perception provider
/// once per frame update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingState {
    Normal,
    Limited(LimitedReason),
    NotAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitedReason {
    Initializing,
    ExcessiveMotion,
    InsufficientFeatures,
}

/// Identity the provider assigns to a detected surface. Stable for the
/// lifetime of the session, reused on removal notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceAnchorId(pub u64);

/// Immutable snapshot of a detected horizontal surface: centre offset and
/// width/depth extent in metres, both in the provider's horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceAnchor {
    pub id: SurfaceAnchorId,
    pub center: Vec2,
    pub extent: Vec2,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TrackingStateChanged(pub TrackingState);

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceAdded(pub SurfaceAnchor);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceRemoved(pub SurfaceAnchorId);

/// Unrecoverable provider error. The description is surfaced to the user
/// verbatim through the session status.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SessionErrorEvent(pub String);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInterrupted;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptionEnded;

/// Ambient light estimate for the current camera frame, in lumens.
/// 1000 is the provider's neutral indoor baseline.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AmbientLightSample {
    pub lumens: f32,
}

/// Commands the core sends back to the perception provider.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerceptionCommand {
    SetSurfaceSearchEnabled(bool),
    ResetSession { clear_anchors: bool },
}
