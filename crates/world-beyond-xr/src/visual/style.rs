//! Passthrough color grading presets

use super::Color;

/// Color grading applied to the passthrough feed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassthroughStyle {
    pub edge_color: Color,
    pub contrast: f32,
    pub brightness: f32,
    pub posterize: f32,
    pub saturation: f32,
    /// Use the gradient ramp below instead of the device default mapping
    pub use_color_ramp: bool,
    pub ramp_low: Color,
    pub ramp_mid: Color,
    pub ramp_high: Color,
}

impl PassthroughStyle {
    /// Fully black passthrough, shown before the room is known
    pub fn dark() -> Self {
        Self {
            edge_color: Color::CLEAR,
            contrast: 1.0,
            brightness: 0.0,
            posterize: 0.0,
            saturation: 0.0,
            use_color_ramp: true,
            ramp_low: Color::BLACK,
            ramp_mid: Color::BLACK,
            ramp_high: Color::BLACK,
        }
    }

    /// Ungraded passthrough
    pub fn normal() -> Self {
        Self {
            use_color_ramp: false,
            ramp_low: Color::WHITE,
            ramp_mid: Color::BLACK,
            ramp_high: Color::WHITE,
            ..Self::dark()
        }
    }
}
