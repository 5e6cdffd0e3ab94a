//! Spatial primitives for tracking-space positions
//!
//! Uses the tracking convention of the headset runtime:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Forward (+) / Backward (-)

mod floorplan;
mod point3d;
mod pose;
mod quaternion;
mod vector3d;

pub use floorplan::Floorplan;
pub use point3d::Point3D;
pub use pose::Pose;
pub use quaternion::Quaternion;
pub use vector3d::Vector3D;
