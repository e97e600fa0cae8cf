//! Environment-adaptive lighting: scale virtual lights to the provider's
//! ambient estimate so the model sits in the camera feed.

use bevy::prelude::*;

use crate::perception::AmbientLightSample;

/// Provider-neutral ambient baseline, in lumens.
pub const NEUTRAL_AMBIENT_LUMENS: f32 = 1000.0;

const DIRECTIONAL_BASELINE_LUX: f32 = 10_000.0;
const AMBIENT_BASELINE_BRIGHTNESS: f32 = 80.0;

pub fn apply_ambient_estimate(
    mut samples: EventReader<AmbientLightSample>,
    mut ambient: ResMut<AmbientLight>,
    mut lights: Query<&mut DirectionalLight>,
) {
    // Latest estimate this frame wins.
    let Some(sample) = samples.read().last() else {
        return;
    };
    let scale = (sample.lumens / NEUTRAL_AMBIENT_LUMENS).max(0.0);
    ambient.brightness = AMBIENT_BASELINE_BRIGHTNESS * scale;
    for mut light in &mut lights {
        light.illuminance = DIRECTIONAL_BASELINE_LUX * scale;
    }
}
