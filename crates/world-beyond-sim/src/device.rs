//! Simulated device layer
//!
//! Builds the per-tick [`DeviceFrame`] the core expects from a handful of
//! high-level values: where the head is, which modality is active, where
//! each input sits and how far the hands are curled.

use world_beyond_xr::input::{
    DeviceController, HandFrame, HandJoint, HandSkeleton, Handedness,
};
use world_beyond_xr::{DeviceFrame, Point3D, Pose};

/// Knuckle spacing across the palm
const FINGER_SPACING: f32 = 0.02;
const KNUCKLE_REACH: f32 = 0.09;
const SEGMENT: f32 = 0.03;

/// A palm-down hand at `wrist` with fingers along +Z.
///
/// `curl` runs from 0 (flat) to 1 (fingertips folded back toward the wrist).
pub fn hand_skeleton(side: Handedness, wrist: Point3D, curl: f32) -> HandSkeleton {
    let curl = curl.clamp(0.0, 1.0);
    let tip_reach = KNUCKLE_REACH + SEGMENT * (2.0 - 4.0 * curl);
    HandSkeleton::from_fn(|joint| {
        let (finger, reach) = match joint {
            HandJoint::WristRoot => return wrist,
            HandJoint::Index1 => (0, KNUCKLE_REACH),
            HandJoint::Middle1 => (1, KNUCKLE_REACH),
            HandJoint::Ring1 => (2, KNUCKLE_REACH),
            HandJoint::Index3 => (0, KNUCKLE_REACH + SEGMENT),
            HandJoint::Middle3 => (1, KNUCKLE_REACH + SEGMENT),
            HandJoint::Ring3 => (2, KNUCKLE_REACH + SEGMENT),
            HandJoint::Pinky3 => (3, KNUCKLE_REACH + SEGMENT),
            HandJoint::IndexTip => (0, tip_reach),
            HandJoint::MiddleTip => (1, tip_reach),
            HandJoint::RingTip => (2, tip_reach),
            HandJoint::PinkyTip => (3, tip_reach),
        };
        let lateral = (finger as f32 - 1.0) * FINGER_SPACING * side.lateral_sign();
        Point3D::new(wrist.x + lateral, wrist.y, wrist.z + reach)
    })
}

/// High-level device state, turned into a frame every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimDevice {
    pub head: Point3D,
    pub using_hands: bool,
    /// Positions of the left and right inputs (controller or wrist)
    pub left: Point3D,
    pub right: Point3D,
    pub left_curl: f32,
    pub right_curl: f32,
    pub left_tracked: bool,
    pub right_tracked: bool,
}

impl Default for SimDevice {
    fn default() -> Self {
        Self {
            head: Point3D::new(0.0, 1.6, 0.0),
            using_hands: false,
            left: Point3D::new(-0.25, 1.1, 0.3),
            right: Point3D::new(0.25, 1.1, 0.3),
            left_curl: 0.0,
            right_curl: 0.0,
            left_tracked: true,
            right_tracked: true,
        }
    }
}

impl SimDevice {
    pub fn input_mut(&mut self, side: Handedness) -> &mut Point3D {
        match side {
            Handedness::Left => &mut self.left,
            Handedness::Right => &mut self.right,
        }
    }

    fn hand(&self, side: Handedness) -> HandFrame {
        let (wrist, curl, tracked) = match side {
            Handedness::Left => (self.left, self.left_curl, self.left_tracked),
            Handedness::Right => (self.right, self.right_curl, self.right_tracked),
        };
        if !tracked {
            return HandFrame::default();
        }
        HandFrame::tracked(hand_skeleton(side, wrist, curl), Pose::from_position(wrist))
    }

    pub fn frame(&self) -> DeviceFrame {
        DeviceFrame {
            active_controller: if self.using_hands {
                DeviceController::Hands
            } else {
                DeviceController::Touch
            },
            head: self.head,
            left_hand: self.hand(Handedness::Left),
            right_hand: self.hand(Handedness::Right),
            left_controller: Pose::from_position(self.left),
            right_controller: Pose::from_position(self.right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_beyond_xr::input::fist_strength;

    #[test]
    fn test_curl_maps_to_fist_strength() {
        let wrist = Point3D::new(0.1, 1.0, 0.2);
        let open = hand_skeleton(Handedness::Right, wrist, 0.0);
        let fist = hand_skeleton(Handedness::Left, wrist, 1.0);
        assert!(fist_strength(&open) < 0.01);
        assert!(fist_strength(&fist) > 0.99);
    }

    #[test]
    fn test_frame_reflects_modality_and_tracking() {
        let mut device = SimDevice {
            using_hands: true,
            ..Default::default()
        };
        device.right_tracked = false;
        let frame = device.frame();

        assert_eq!(frame.active_controller, DeviceController::Hands);
        assert!(frame.left_hand.tracked);
        assert!(!frame.right_hand.tracked);
        assert!(frame.right_hand.skeleton.is_none());
        assert_eq!(frame.right_controller.position, device.right);
    }
}
