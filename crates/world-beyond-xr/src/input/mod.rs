//! Input arbitration for hand tracking and motion controllers
//!
//! - `device`: the per-tick snapshot read from the headset runtime
//! - `arbiter`: picks the active input source and the dominant hand pose
//! - `gesture`: fist strength with a hysteresis open/closed state

mod arbiter;
mod device;
mod gesture;

pub use arbiter::{InputArbiter, InputSource, ModalityChange};
pub use device::{
    DeviceController, DeviceFrame, HandFrame, HandJoint, HandSkeleton, Handedness, JOINT_COUNT,
};
pub use gesture::{fist_strength, GestureClassifier, GestureEvent, HandState};
