//! Shared fixtures for unit tests

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::chapter::{
    Collaborators, EnvironmentController, Haptics, MessageDisplay, MessageKind,
    PassthroughStylist, ToolController, ToolKind,
};
use crate::error::RoomInitError;
use crate::input::{HandFrame, HandJoint, HandSkeleton, Handedness};
use crate::room::{FloorplanRoom, RoomModel};
use crate::spatial::{Point3D, Pose};
use crate::visual::{Color, PassthroughStyle};

/// Lateral knuckle offsets for index, middle, ring and pinky
const FINGER_X: [f32; 4] = [-0.03125, 0.0, 0.03125, 0.0625];

fn hand(side: Handedness, curled: bool) -> HandSkeleton {
    // Right hand, palm down, fingers toward +Z; the left hand is mirrored.
    let mirror = side.lateral_sign();
    let tip_z = if curled { 0.125 } else { 0.25 };
    HandSkeleton::from_fn(|joint| {
        let (finger, z) = match joint {
            HandJoint::WristRoot => return Point3D::new(0.0, 1.0, 0.0),
            HandJoint::Index1 => (0, 0.125),
            HandJoint::Middle1 => (1, 0.125),
            HandJoint::Ring1 => (2, 0.125),
            HandJoint::Index3 => (0, 0.1875),
            HandJoint::Middle3 => (1, 0.1875),
            HandJoint::Ring3 => (2, 0.1875),
            HandJoint::Pinky3 => (3, 0.1875),
            HandJoint::IndexTip => (0, tip_z),
            HandJoint::MiddleTip => (1, tip_z),
            HandJoint::RingTip => (2, tip_z),
            HandJoint::PinkyTip => (3, tip_z),
        };
        Point3D::new(FINGER_X[finger] * mirror, 1.0, z)
    })
}

/// Flat hand, fist strength 0
pub fn open_hand(side: Handedness) -> HandSkeleton {
    hand(side, false)
}

/// Fully curled hand, fist strength 1
pub fn fist_hand(side: Handedness) -> HandSkeleton {
    hand(side, true)
}

/// Fingertips bent straight down from the last knuckle, fist strength 0.5
pub fn half_curled_hand(side: Handedness) -> HandSkeleton {
    let open = open_hand(side);
    HandSkeleton::from_fn(|joint| {
        let position = open.joint(joint);
        match joint {
            HandJoint::IndexTip
            | HandJoint::MiddleTip
            | HandJoint::RingTip
            | HandJoint::PinkyTip => Point3D::new(position.x, 0.9375, 0.1875),
            _ => position,
        }
    })
}

/// Tracked hand with an unrotated pointer anchor at the wrist
pub fn hand_frame(skeleton: HandSkeleton) -> HandFrame {
    HandFrame::tracked(
        skeleton,
        Pose::from_position(skeleton.joint(HandJoint::WristRoot)),
    )
}

/// Everything the recording collaborators observed, in call order
#[derive(Debug, Default)]
pub struct Recorded {
    /// Argument-less calls by name
    pub calls: Vec<&'static str>,
    /// Messages that actually changed the panel
    pub messages: Vec<MessageKind>,
    pub current_message: MessageKind,
    pub tutorial_visible: Vec<bool>,
    pub styles: Vec<PassthroughStyle>,
    pub tints: Vec<Color>,
    pub vibrations: Vec<(Handedness, f32)>,
    pub tools: Vec<usize>,
    pub tool_meshes: Vec<ToolKind>,
    pub use_hands: Vec<(bool, bool)>,
    pub collision: Vec<bool>,
    pub flicker: Vec<f32>,
    pub gloves: Vec<(bool, bool)>,
    pub phase_visuals: Vec<usize>,
    pub environment_shown: Vec<bool>,
    pub saturation: Vec<f32>,
    pub ground_floor: Vec<f32>,
}

impl Recorded {
    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

pub type Log = Rc<RefCell<Recorded>>;

struct RecordingStylist(Log);

impl PassthroughStylist for RecordingStylist {
    fn force_style(&mut self, style: &PassthroughStyle) {
        self.0.borrow_mut().styles.push(*style);
    }

    fn show_stylized(&mut self, style: &PassthroughStyle, _fade: Duration) {
        let mut log = self.0.borrow_mut();
        log.calls.push("show_stylized");
        log.styles.push(*style);
    }

    fn reset(&mut self, _fade: Duration) {
        self.0.borrow_mut().calls.push("reset_passthrough");
    }

    fn set_background_tint(&mut self, tint: Color) {
        self.0.borrow_mut().tints.push(tint);
    }
}

struct RecordingEnvironment(Log);

impl EnvironmentController for RecordingEnvironment {
    fn initialize(&mut self) {
        self.0.borrow_mut().calls.push("initialize_environment");
    }

    fn show_environment(&mut self, visible: bool) {
        self.0.borrow_mut().environment_shown.push(visible);
    }

    fn set_phase_visuals(&mut self, phase_index: usize) {
        self.0.borrow_mut().phase_visuals.push(phase_index);
    }

    fn set_saturation(&mut self, saturation: f32) {
        self.0.borrow_mut().saturation.push(saturation);
    }

    fn move_ground_floor(&mut self, height: f32) {
        self.0.borrow_mut().ground_floor.push(height);
    }

    fn enable_sun(&mut self, enabled: bool) {
        if enabled {
            self.0.borrow_mut().calls.push("enable_sun");
        }
    }
}

struct RecordingTools {
    log: Log,
    bait: Point3D,
}

impl ToolController for RecordingTools {
    fn set_tool(&mut self, index: usize) {
        self.log.borrow_mut().tools.push(index);
    }

    fn set_tool_mesh(&mut self, kind: ToolKind) {
        self.log.borrow_mut().tool_meshes.push(kind);
    }

    fn show_tool(&mut self, visible: bool) {
        if visible {
            self.log.borrow_mut().calls.push("show_tool");
        }
    }

    fn enable_tool_collision(&mut self, enabled: bool) {
        self.log.borrow_mut().collision.push(enabled);
    }

    fn use_hands(&mut self, using_hands: bool, right_handed: bool) {
        self.log.borrow_mut().use_hands.push((using_hands, right_handed));
    }

    fn enable_tool_cone(&mut self, enabled: bool) {
        if enabled {
            self.log.borrow_mut().calls.push("enable_tool_cone");
        }
    }

    fn set_flicker_time(&mut self, time: f32) {
        self.log.borrow_mut().flicker.push(time);
    }

    fn unlock_secondary_tool(&mut self) {
        self.log.borrow_mut().calls.push("unlock_secondary_tool");
    }

    fn bait_position(&self) -> Point3D {
        self.bait
    }

    fn show_passthrough_glove(&mut self, visible: bool, right_handed: bool) {
        self.log.borrow_mut().gloves.push((visible, right_handed));
    }
}

struct RecordingMessages(Log);

impl MessageDisplay for RecordingMessages {
    fn display_message(&mut self, kind: MessageKind) {
        let mut log = self.0.borrow_mut();
        if log.current_message != kind {
            log.current_message = kind;
            log.messages.push(kind);
        }
    }

    fn current_message(&self) -> MessageKind {
        self.0.borrow().current_message
    }

    fn refresh_for_input(&mut self) {
        self.0.borrow_mut().calls.push("refresh_for_input");
    }

    fn set_visible(&mut self, visible: bool) {
        self.0.borrow_mut().tutorial_visible.push(visible);
    }
}

struct RecordingHaptics(Log);

impl Haptics for RecordingHaptics {
    fn set_vibration(&mut self, side: Handedness, _frequency: f32, amplitude: f32) {
        self.0.borrow_mut().vibrations.push((side, amplitude));
    }
}

/// A floorplan room the test keeps a handle to
pub struct SharedRoom(pub Rc<RefCell<FloorplanRoom>>);

impl RoomModel for SharedRoom {
    fn initialize(&mut self) -> Result<(), RoomInitError> {
        self.0.borrow_mut().initialize()
    }

    fn is_player_inside(&self, head: Point3D) -> bool {
        self.0.borrow().is_player_inside(head)
    }

    fn floor_height(&self) -> f32 {
        self.0.borrow().floor_height()
    }

    fn show_all_walls(&mut self, visible: bool) {
        self.0.borrow_mut().show_all_walls(visible);
    }

    fn show_dark_room(&mut self, visible: bool) {
        self.0.borrow_mut().show_dark_room(visible);
    }

    fn set_room_saturation(&mut self, saturation: f32) {
        self.0.borrow_mut().set_room_saturation(saturation);
    }

    fn hide_effect_mesh(&mut self) {
        self.0.borrow_mut().hide_effect_mesh();
    }
}

/// Recording collaborators around `room`, with the bait waiting at `bait`
pub fn recording_collaborators(
    room: FloorplanRoom,
    bait: Point3D,
) -> (Collaborators, Log, Rc<RefCell<FloorplanRoom>>) {
    let log = Log::default();
    let room = Rc::new(RefCell::new(room));
    let collaborators = Collaborators {
        room: Box::new(SharedRoom(Rc::clone(&room))),
        stylist: Box::new(RecordingStylist(Rc::clone(&log))),
        environment: Box::new(RecordingEnvironment(Rc::clone(&log))),
        tools: Box::new(RecordingTools {
            log: Rc::clone(&log),
            bait,
        }),
        messages: Box::new(RecordingMessages(Rc::clone(&log))),
        haptics: Box::new(RecordingHaptics(Rc::clone(&log))),
    };
    (collaborators, log, room)
}
