//! Easing curves

use std::f32::consts::PI;

/// Shapes applied to a ramp's normalized progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInOutSine,
    /// Unsteady rise used when a light or tint sputters on
    Flicker,
}

impl Easing {
    /// Apply easing to progress `t`, clamped to `[0, 1]`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseInOutSine => -0.5 * ((PI * t).cos() - 1.0),
            Easing::Flicker => {
                // Decaying oscillation around the linear ramp, pinned at both ends
                let wobble = (t * 9.0 * PI).sin() * 0.35 * (1.0 - t);
                (t + wobble).clamp(0.0, 1.0)
            }
        }
    }
}
