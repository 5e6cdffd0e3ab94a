//! Active input source selection

use crate::observer::Observers;
use crate::spatial::{Pose, Quaternion};

use super::{DeviceFrame, HandJoint, Handedness};

/// The logical input the player is holding the tool with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    LeftController,
    RightController,
    LeftHand,
    RightHand,
}

impl InputSource {
    pub fn side(&self) -> Handedness {
        match self {
            InputSource::LeftController | InputSource::LeftHand => Handedness::Left,
            InputSource::RightController | InputSource::RightHand => Handedness::Right,
        }
    }

    pub fn is_hand(&self) -> bool {
        matches!(self, InputSource::LeftHand | InputSource::RightHand)
    }

    /// Same side, switched to the given modality
    pub fn with_modality(&self, using_hands: bool) -> Self {
        match (self.side(), using_hands) {
            (Handedness::Left, true) => InputSource::LeftHand,
            (Handedness::Right, true) => InputSource::RightHand,
            (Handedness::Left, false) => InputSource::LeftController,
            (Handedness::Right, false) => InputSource::RightController,
        }
    }
}

/// Raised once when the player switches between hands and controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalityChange {
    pub source: InputSource,
    pub using_hands: bool,
}

/// Normalizes hand tracking and controller input into one active source.
#[derive(Debug)]
pub struct InputArbiter {
    source: InputSource,
    using_hands: bool,
    left_visible: bool,
    right_visible: bool,
    dominant_pose: Pose,
    observers: Observers<ModalityChange>,
}

impl Default for InputArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputArbiter {
    /// Starts on the right controller until the runtime reports otherwise
    pub fn new() -> Self {
        Self {
            source: InputSource::RightController,
            using_hands: false,
            left_visible: false,
            right_visible: false,
            dominant_pose: Pose::default(),
            observers: Observers::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ModalityChange) + 'static) {
        self.observers.subscribe(listener);
    }

    /// Sample the device layer for this tick.
    ///
    /// Returns the modality change, if the player switched since the last
    /// tick. Also refreshes hand visibility and the cached dominant pose.
    pub fn update(&mut self, frame: &DeviceFrame) -> Option<ModalityChange> {
        self.left_visible = frame.left_hand.tracked;
        self.right_visible = frame.right_hand.tracked;

        let using_hands = frame.active_controller.is_hand_tracking();
        let change = if using_hands != self.using_hands {
            self.using_hands = using_hands;
            self.source = self.source.with_modality(using_hands);
            tracing::info!(
                "Input modality changed to {:?} ({})",
                self.source,
                if using_hands { "hands" } else { "controllers" }
            );
            let change = ModalityChange {
                source: self.source,
                using_hands,
            };
            self.observers.emit(&change);
            Some(change)
        } else {
            None
        };

        if let Some(pose) = self.sample_dominant_hand_pose(frame) {
            self.dominant_pose = pose;
        }
        change
    }

    pub fn active_input(&self) -> InputSource {
        self.source
    }

    pub fn using_hands(&self) -> bool {
        self.using_hands
    }

    pub fn is_hand_visible(&self, side: Handedness) -> bool {
        match side {
            Handedness::Left => self.left_visible,
            Handedness::Right => self.right_visible,
        }
    }

    /// Whether the hand holding the tool is currently shown
    pub fn is_active_hand_visible(&self) -> bool {
        self.is_hand_visible(self.source.side())
    }

    /// Last valid pose of the tool-holding input; may be stale while the
    /// active hand is not tracked.
    pub fn dominant_hand_pose(&self) -> Pose {
        self.dominant_pose
    }

    /// Pose of the tool-holding input in this frame, if one can be derived.
    ///
    /// Controllers report their raw pose. Hands are built from the wrist
    /// pointer anchor, pointing along the anchor's up axis with the
    /// knuckle line as the lateral axis. A hidden hand or an unusable
    /// skeleton yields `None`.
    pub fn sample_dominant_hand_pose(&self, frame: &DeviceFrame) -> Option<Pose> {
        let side = self.source.side();
        if !self.using_hands {
            return Some(frame.controller(side));
        }
        if !self.is_hand_visible(side) {
            return None;
        }

        let hand = frame.hand(side);
        let skeleton = hand.skeleton?;
        let forward = hand.pointer.up();
        let lateral = (skeleton.joint(HandJoint::Ring1) - skeleton.joint(HandJoint::Index1))
            * side.lateral_sign();
        let (forward, lateral) = crate::spatial::Vector3D::orthonormalize(forward, lateral)?;
        let up = forward.cross(&lateral);

        Some(Pose::new(
            hand.pointer.position,
            Quaternion::look_rotation(-forward, -up),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DeviceController;
    use crate::spatial::{Point3D, Vector3D};
    use crate::testing::{hand_frame, open_hand};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn frame(controller: DeviceController) -> DeviceFrame {
        DeviceFrame {
            active_controller: controller,
            left_hand: hand_frame(open_hand(Handedness::Left)),
            right_hand: hand_frame(open_hand(Handedness::Right)),
            left_controller: Pose::from_position(Point3D::new(-0.2, 1.0, 0.3)),
            right_controller: Pose::from_position(Point3D::new(0.2, 1.0, 0.3)),
            ..Default::default()
        }
    }

    #[test]
    fn test_remaps_preserving_side() {
        assert_eq!(
            InputSource::LeftController.with_modality(true),
            InputSource::LeftHand
        );
        assert_eq!(
            InputSource::RightHand.with_modality(false),
            InputSource::RightController
        );
        assert_eq!(InputSource::LeftHand.side(), Handedness::Left);
    }

    #[test]
    fn test_modality_change_reported_once() {
        let mut arbiter = InputArbiter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        arbiter.subscribe(move |change| sink.borrow_mut().push(*change));

        assert_eq!(arbiter.update(&frame(DeviceController::Touch)), None);
        let change = arbiter.update(&frame(DeviceController::Hands)).unwrap();
        assert_eq!(change.source, InputSource::RightHand);
        assert!(change.using_hands);
        for _ in 0..5 {
            assert_eq!(arbiter.update(&frame(DeviceController::RightHand)), None);
        }
        assert_eq!(seen.borrow().len(), 1);

        let back = arbiter.update(&frame(DeviceController::RightTouch)).unwrap();
        assert_eq!(back.source, InputSource::RightController);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_controller_pose_is_raw_device_pose() {
        let mut arbiter = InputArbiter::new();
        let f = frame(DeviceController::Touch);
        arbiter.update(&f);
        assert_eq!(arbiter.dominant_hand_pose(), f.right_controller);
    }

    #[test]
    fn test_hand_pose_points_along_anchor() {
        let mut arbiter = InputArbiter::new();
        let f = frame(DeviceController::Hands);
        arbiter.update(&f);

        let pose = arbiter.dominant_hand_pose();
        assert_eq!(pose.position, f.right_hand.pointer.position);
        // Anchor up is +Y, so the tool looks down -Y with +Z as its up axis
        let forward = pose.forward();
        assert!((forward - -Vector3D::UP).magnitude() < 0.001, "{forward:?}");
        assert!((pose.up() - Vector3D::FORWARD).magnitude() < 0.001);
    }

    #[test]
    fn test_lost_hand_keeps_stale_pose() {
        let mut arbiter = InputArbiter::new();
        let tracked = frame(DeviceController::Hands);
        arbiter.update(&tracked);
        let before = arbiter.dominant_hand_pose();

        let mut lost = tracked;
        lost.right_hand.tracked = false;
        lost.right_hand.pointer = Pose::from_position(Point3D::ORIGIN);
        arbiter.update(&lost);

        assert!(!arbiter.is_active_hand_visible());
        assert!(arbiter.sample_dominant_hand_pose(&lost).is_none());
        assert_eq!(arbiter.dominant_hand_pose(), before);
    }

    #[test]
    fn test_invalid_skeleton_is_no_op() {
        let mut arbiter = InputArbiter::new();
        let mut f = frame(DeviceController::Hands);
        f.right_hand.skeleton = None;
        arbiter.update(&f);
        assert_eq!(arbiter.dominant_hand_pose(), Pose::default());
    }
}
