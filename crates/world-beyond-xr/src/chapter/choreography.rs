//! Timed visual and haptic protocols run between phases

use crate::config::{secs, TimingConfig};
use crate::sequence::{Easing, TimedSequence};
use crate::visual::Color;

use super::ToolKind;

/// Collaborator effects produced by running sequences and applied by the
/// chapter controller on the tick they are produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    BackgroundTint(Color),
    /// Walls shown, dark room hidden, environment revealed
    RevealRoom,
    /// Pulse the controlling side's controller
    Vibrate { amplitude: f32 },
    StopVibration,
    EnableToolCone,
    /// Hint at the flashlight gesture, only shown while using hands
    FlashlightHint,
    FlickerTime(f32),
    ShowTool,
    ToolMesh(ToolKind),
    UnlockSecondaryTool,
    EnvironmentSaturation(f32),
}

/// Passthrough is always graded to greyscale
pub fn is_grey_passthrough() -> bool {
    true
}

/// Convert normalized saturation into the environment shader's
/// saturation distance
pub fn saturation_distance(saturation: f32) -> f32 {
    let t = saturation.clamp(0.0, 1.0);
    1.0 + (0.08 - 1.0) * t
}

/// Show the tool and give it the flashlight mesh after the spawn delay
pub fn place_bait(timing: &TimingConfig) -> TimedSequence<Cue> {
    TimedSequence::new("place-bait")
        .wait(secs(timing.bait_spawn))
        .cue(Cue::ShowTool)
        .cue(Cue::ToolMesh(ToolKind::Flashlight))
}

/// Flicker the camera background from black toward the dark tint, then
/// reveal the room
pub fn camera_flicker(timing: &TimingConfig) -> TimedSequence<Cue> {
    TimedSequence::new("camera-flicker")
        .ramp(secs(timing.camera_flicker), Easing::Linear, |t| {
            let flicker = Easing::Flicker.apply(0.5 * t);
            Cue::BackgroundTint(Color::BLACK.lerp(&Color::CAMERA_DARK, flicker))
        })
        .on_complete(Cue::RevealRoom)
}

/// Buzz, light the tool cone and ramp its flicker up to steady
pub fn countdown_to_tool(timing: &TimingConfig) -> TimedSequence<Cue> {
    TimedSequence::new("countdown-to-tool")
        .wait(secs(timing.tool_countdown))
        .cue(Cue::Vibrate { amplitude: 1.0 })
        .cue(Cue::EnableToolCone)
        .cue(Cue::FlashlightHint)
        .ramp(secs(timing.tool_flicker_ramp), Easing::Linear, |t| {
            Cue::FlickerTime(0.5 * t + 0.5)
        })
        .on_complete(Cue::StopVibration)
}

/// Unlock the wall toggler after a while, with a short buzz
pub fn secondary_tool_unlock(timing: &TimingConfig) -> TimedSequence<Cue> {
    TimedSequence::new("secondary-tool-unlock")
        .wait(secs(timing.secondary_tool_unlock))
        .cue(Cue::UnlockSecondaryTool)
        .cue(Cue::Vibrate { amplitude: 1.0 })
        .wait(secs(timing.unlock_haptic))
        .on_complete(Cue::StopVibration)
}

/// Bring color back into the environment, or jump to full color when the
/// passthrough is not grey
pub fn environment_desaturation(timing: &TimingConfig, grey: bool) -> TimedSequence<Cue> {
    TimedSequence::new("environment-desaturation")
        .wait(secs(timing.desaturation_delay))
        .ramp(secs(timing.desaturation_ramp), Easing::Linear, move |t| {
            Cue::EnvironmentSaturation(if grey { t } else { 1.0 })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn drain(mut sequence: TimedSequence<Cue>, step: Duration, ticks: usize) -> Vec<Cue> {
        let mut out = Vec::new();
        for _ in 0..ticks {
            sequence.advance(step, &mut out);
        }
        out
    }

    #[test]
    fn test_saturation_distance_mapping() {
        assert_eq!(saturation_distance(0.0), 1.0);
        assert!((saturation_distance(1.0) - 0.08).abs() < 1e-6);
        assert!((saturation_distance(0.5) - 0.54).abs() < 1e-6);
        assert_eq!(saturation_distance(-3.0), 1.0);
    }

    #[test]
    fn test_camera_flicker_ends_with_reveal() {
        let cues = drain(
            camera_flicker(&TimingConfig::default()),
            Duration::from_millis(50),
            20,
        );
        assert_eq!(cues.last(), Some(&Cue::RevealRoom));
        assert_eq!(cues.iter().filter(|c| **c == Cue::RevealRoom).count(), 1);
        for cue in &cues[..cues.len() - 1] {
            let Cue::BackgroundTint(tint) = cue else {
                panic!("unexpected cue {cue:?}");
            };
            assert_eq!((tint.r, tint.g, tint.b), (0.0, 0.0, 0.0));
            assert!(tint.a >= 0.75 - 1e-6 && tint.a <= 1.0);
        }
    }

    #[test]
    fn test_countdown_ramps_flicker_to_steady() {
        let cues = drain(
            countdown_to_tool(&TimingConfig::default()),
            Duration::from_millis(125),
            8,
        );
        assert_eq!(
            &cues[..3],
            &[
                Cue::Vibrate { amplitude: 1.0 },
                Cue::EnableToolCone,
                Cue::FlashlightHint
            ]
        );
        assert_eq!(cues[3], Cue::FlickerTime(0.625));
        assert_eq!(cues[cues.len() - 2], Cue::FlickerTime(1.0));
        assert_eq!(cues.last(), Some(&Cue::StopVibration));
    }

    #[test]
    fn test_unlock_waits_then_buzzes() {
        let timing = TimingConfig::default();
        assert!(drain(secondary_tool_unlock(&timing), Duration::from_secs(1), 9).is_empty());
        let cues = drain(secondary_tool_unlock(&timing), Duration::from_secs(1), 12);
        assert_eq!(
            cues,
            vec![
                Cue::UnlockSecondaryTool,
                Cue::Vibrate { amplitude: 1.0 },
                Cue::StopVibration
            ]
        );
    }

    #[test]
    fn test_desaturation_respects_color_mode() {
        let timing = TimingConfig::default();
        let grey = drain(
            environment_desaturation(&timing, true),
            Duration::from_secs(1),
            8,
        );
        assert_eq!(
            grey,
            [0.25, 0.5, 0.75, 1.0].map(Cue::EnvironmentSaturation).to_vec()
        );

        let color = drain(
            environment_desaturation(&timing, false),
            Duration::from_secs(1),
            8,
        );
        assert!(color
            .iter()
            .all(|cue| *cue == Cue::EnvironmentSaturation(1.0)));
    }
}
