//! 3D vector representation for directions and offsets

use std::ops::{Add, Mul, Neg, Sub};

/// A direction or offset in tracking space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Lengths below this are treated as degenerate when normalizing
const EPSILON: f32 = 1e-6;

impl Vector3D {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// +X
    pub const RIGHT: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// +Y
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// +Z
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy, or `ZERO` when the vector has no direction
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > EPSILON {
            *self * (1.0 / mag)
        } else {
            Self::ZERO
        }
    }

    /// True when the vector is too short to carry a direction
    pub fn is_degenerate(&self) -> bool {
        self.magnitude() <= EPSILON
    }

    pub fn dot(&self, other: &Vector3D) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3D) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Gram-Schmidt on a pair of vectors.
    ///
    /// Returns `(a', b')` where `a'` is `a` normalized and `b'` is the unit
    /// component of `b` orthogonal to `a'`. `None` when either input is
    /// degenerate or the two are parallel.
    pub fn orthonormalize(a: Vector3D, b: Vector3D) -> Option<(Vector3D, Vector3D)> {
        let a = a.normalize();
        if a.is_degenerate() {
            return None;
        }
        let b = (b - a * a.dot(&b)).normalize();
        if b.is_degenerate() {
            return None;
        }
        Some((a, b))
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    fn add(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3D {
    type Output = Vector3D;

    fn mul(self, rhs: f32) -> Self::Output {
        Vector3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Self::Output {
        Vector3D::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let n = Vector3D::new(0.0, 0.0, 4.0).normalize();
        assert!((n.magnitude() - 1.0).abs() < 0.0001);
        assert_eq!(Vector3D::ZERO.normalize(), Vector3D::ZERO);
    }

    #[test]
    fn test_cross_follows_axes() {
        // UP x FORWARD = RIGHT, the basis used for look rotations
        let right = Vector3D::UP.cross(&Vector3D::FORWARD);
        assert!((right.x - 1.0).abs() < 0.0001);
        assert!(right.y.abs() < 0.0001 && right.z.abs() < 0.0001);
    }

    #[test]
    fn test_orthonormalize_removes_shared_component() {
        let (a, b) =
            Vector3D::orthonormalize(Vector3D::new(0.0, 2.0, 0.0), Vector3D::new(1.0, 1.0, 0.0))
                .unwrap();
        assert!((a.y - 1.0).abs() < 0.0001);
        assert!(a.dot(&b).abs() < 0.0001);
        assert!((b.x - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_orthonormalize_rejects_parallel() {
        assert!(Vector3D::orthonormalize(Vector3D::UP, Vector3D::UP * 3.0).is_none());
        assert!(Vector3D::orthonormalize(Vector3D::ZERO, Vector3D::UP).is_none());
    }
}
