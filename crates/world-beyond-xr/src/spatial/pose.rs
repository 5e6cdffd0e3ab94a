//! Position plus orientation of a tracked device or anchor

use super::{Point3D, Quaternion, Vector3D};

/// A rigid pose in tracking space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Point3D,
    pub rotation: Quaternion,
}

impl Pose {
    pub fn new(position: Point3D, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` with no rotation
    pub fn from_position(position: Point3D) -> Self {
        Self {
            position,
            rotation: Quaternion::IDENTITY,
        }
    }

    pub fn forward(&self) -> Vector3D {
        self.rotation.forward()
    }

    pub fn up(&self) -> Vector3D {
        self.rotation.up()
    }
}
