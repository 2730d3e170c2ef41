//! Time interpolators applied to transition progress

use serde::{Deserialize, Serialize};

/// Maps linear progress in `[0, 1]` to eased progress.
pub trait Interpolator: Send + Sync {
    fn interpolate(&self, input: f32) -> f32;
}

impl<F> Interpolator for F
where
    F: Fn(f32) -> f32 + Send + Sync,
{
    fn interpolate(&self, input: f32) -> f32 {
        self(input)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    Decelerate,
    AccelerateDecelerate,
}

impl Interpolator for Easing {
    fn interpolate(&self, input: f32) -> f32 {
        let t = input.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::AccelerateDecelerate => {
                ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5
            }
        }
    }
}
