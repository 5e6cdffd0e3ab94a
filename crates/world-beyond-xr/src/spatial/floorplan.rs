//! Polygonal room floorplan used for containment checks

use super::Point3D;

/// A closed polygon on the floor plane (`x`, `z`), wound in either direction
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Floorplan {
    vertices: Vec<(f32, f32)>,
}

impl Floorplan {
    pub fn new(vertices: Vec<(f32, f32)>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned rectangle centered on the origin
    pub fn rectangle(width: f32, depth: f32) -> Self {
        let (hw, hd) = (width / 2.0, depth / 2.0);
        Self::new(vec![(-hw, -hd), (hw, -hd), (hw, hd), (-hw, hd)])
    }

    pub fn vertices(&self) -> &[(f32, f32)] {
        &self.vertices
    }

    /// A polygon needs at least three corners to enclose anything
    pub fn is_closed(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Even-odd crossing test of the point's floor projection.
    ///
    /// Height is ignored; an open polygon contains nothing.
    pub fn contains(&self, point: Point3D) -> bool {
        if !self.is_closed() {
            return false;
        }
        let (px, pz) = point.floor_coords();
        let mut inside = false;
        let mut j = self.vertices.len() - 1;
        for i in 0..self.vertices.len() {
            let (xi, zi) = self.vertices[i];
            let (xj, zj) = self.vertices[j];
            if (zi > pz) != (zj > pz) {
                let cross_x = xi + (pz - zi) * (xj - xi) / (zj - zi);
                if px < cross_x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_contains() {
        let room = Floorplan::rectangle(4.0, 3.0);
        assert!(room.contains(Point3D::new(0.0, 1.6, 0.0)));
        assert!(room.contains(Point3D::new(1.9, 0.0, -1.4)));
        assert!(!room.contains(Point3D::new(2.1, 1.6, 0.0)));
        assert!(!room.contains(Point3D::new(0.0, 1.6, -1.6)));
    }

    #[test]
    fn test_concave_room() {
        // L-shaped room: the notch at the top right is outside
        let room = Floorplan::new(vec![
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ]);
        assert!(room.contains(Point3D::new(1.0, 0.0, 3.0)));
        assert!(room.contains(Point3D::new(3.0, 0.0, 1.0)));
        assert!(!room.contains(Point3D::new(3.0, 0.0, 3.0)));
    }

    #[test]
    fn test_open_polygon_contains_nothing() {
        let line = Floorplan::new(vec![(0.0, 0.0), (1.0, 1.0)]);
        assert!(!line.is_closed());
        assert!(!line.contains(Point3D::new(0.5, 0.0, 0.5)));
    }
}
