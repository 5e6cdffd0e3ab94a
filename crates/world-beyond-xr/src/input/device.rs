//! Device layer snapshot
//!
//! The headset runtime is sampled once per tick into a [`DeviceFrame`]. The
//! core never talks to the runtime directly.

use crate::spatial::{Point3D, Pose};

/// Left or right side of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Sign applied to lateral vectors so that both hands share one basis
    pub fn lateral_sign(&self) -> f32 {
        match self {
            Handedness::Left => -1.0,
            Handedness::Right => 1.0,
        }
    }
}

/// Active controller as reported by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceController {
    /// Nothing active; the runtime reports this while hands are idle
    None,
    Hands,
    LeftHand,
    RightHand,
    #[default]
    Touch,
    LeftTouch,
    RightTouch,
}

impl DeviceController {
    /// Whether this report means the player is using their hands
    pub fn is_hand_tracking(&self) -> bool {
        matches!(
            self,
            DeviceController::None
                | DeviceController::Hands
                | DeviceController::LeftHand
                | DeviceController::RightHand
        )
    }
}

/// Skeletal landmarks the core reads from a tracked hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandJoint {
    WristRoot,
    /// Index proximal knuckle
    Index1,
    /// Index distal joint
    Index3,
    IndexTip,
    /// Middle proximal knuckle
    Middle1,
    Middle3,
    MiddleTip,
    /// Ring proximal knuckle
    Ring1,
    Ring3,
    RingTip,
    Pinky3,
    PinkyTip,
}

pub const JOINT_COUNT: usize = 12;

impl HandJoint {
    pub const ALL: [HandJoint; JOINT_COUNT] = [
        HandJoint::WristRoot,
        HandJoint::Index1,
        HandJoint::Index3,
        HandJoint::IndexTip,
        HandJoint::Middle1,
        HandJoint::Middle3,
        HandJoint::MiddleTip,
        HandJoint::Ring1,
        HandJoint::Ring3,
        HandJoint::RingTip,
        HandJoint::Pinky3,
        HandJoint::PinkyTip,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Joint positions of one hand, in tracking space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandSkeleton {
    joints: [Point3D; JOINT_COUNT],
}

impl HandSkeleton {
    pub fn new(joints: [Point3D; JOINT_COUNT]) -> Self {
        Self { joints }
    }

    /// Build a skeleton by evaluating `position` for every joint
    pub fn from_fn(mut position: impl FnMut(HandJoint) -> Point3D) -> Self {
        let mut joints = [Point3D::ORIGIN; JOINT_COUNT];
        for joint in HandJoint::ALL {
            joints[joint.index()] = position(joint);
        }
        Self { joints }
    }

    pub fn joint(&self, joint: HandJoint) -> Point3D {
        self.joints[joint.index()]
    }

    pub fn set_joint(&mut self, joint: HandJoint, position: Point3D) {
        self.joints[joint.index()] = position;
    }
}

/// What the runtime reports for one hand this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandFrame {
    /// The runtime is tracking this hand; untracked hands are force-hidden
    pub tracked: bool,
    /// `None` when the skeleton data is not valid this tick
    pub skeleton: Option<HandSkeleton>,
    /// Wrist-offset anchor the held tool attaches to
    pub pointer: Pose,
}

impl HandFrame {
    pub fn tracked(skeleton: HandSkeleton, pointer: Pose) -> Self {
        Self {
            tracked: true,
            skeleton: Some(skeleton),
            pointer,
        }
    }
}

/// Everything the core samples from the device layer in one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceFrame {
    pub active_controller: DeviceController,
    /// Head position, used for room containment
    pub head: Point3D,
    pub left_hand: HandFrame,
    pub right_hand: HandFrame,
    pub left_controller: Pose,
    pub right_controller: Pose,
}

impl DeviceFrame {
    pub fn hand(&self, side: Handedness) -> &HandFrame {
        match side {
            Handedness::Left => &self.left_hand,
            Handedness::Right => &self.right_hand,
        }
    }

    pub fn controller(&self, side: Handedness) -> Pose {
        match side {
            Handedness::Left => self.left_controller,
            Handedness::Right => self.right_controller,
        }
    }

    /// Position of one side's input in the given modality.
    ///
    /// Untracked hands have no meaningful position and yield `None`.
    pub fn input_position(&self, side: Handedness, using_hands: bool) -> Option<Point3D> {
        if using_hands {
            let hand = self.hand(side);
            hand.tracked.then_some(hand.pointer.position)
        } else {
            Some(self.controller(side).position)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_tracking_reports() {
        assert!(DeviceController::Hands.is_hand_tracking());
        assert!(DeviceController::LeftHand.is_hand_tracking());
        assert!(DeviceController::None.is_hand_tracking());
        assert!(!DeviceController::Touch.is_hand_tracking());
        assert!(!DeviceController::RightTouch.is_hand_tracking());
    }

    #[test]
    fn test_skeleton_joint_lookup() {
        let mut skeleton = HandSkeleton::from_fn(|joint| {
            if joint == HandJoint::Middle1 {
                Point3D::new(0.0, 0.0, 0.1)
            } else {
                Point3D::ORIGIN
            }
        });
        assert_eq!(skeleton.joint(HandJoint::Middle1), Point3D::new(0.0, 0.0, 0.1));
        skeleton.set_joint(HandJoint::PinkyTip, Point3D::new(1.0, 0.0, 0.0));
        assert_eq!(skeleton.joint(HandJoint::PinkyTip).x, 1.0);
        assert_eq!(skeleton.joint(HandJoint::WristRoot), Point3D::ORIGIN);
    }

    #[test]
    fn test_untracked_hand_has_no_input_position() {
        let mut frame = DeviceFrame::default();
        frame.right_controller = Pose::from_position(Point3D::new(0.3, 1.0, 0.2));
        assert_eq!(
            frame.input_position(Handedness::Right, false),
            Some(Point3D::new(0.3, 1.0, 0.2))
        );
        assert_eq!(frame.input_position(Handedness::Right, true), None);

        frame.right_hand.tracked = true;
        frame.right_hand.pointer = Pose::from_position(Point3D::new(0.1, 1.1, 0.3));
        assert_eq!(
            frame.input_position(Handedness::Right, true),
            Some(Point3D::new(0.1, 1.1, 0.3))
        );
    }
}
