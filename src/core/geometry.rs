use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Represents a single vertex in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>) -> Self {
        Self { position }
    }

    pub fn from_coords(x: f32, y: f32, z: f32) -> Self {
        Self::new(Point3::new(x, y, z))
    }
}

/// A polygon corner: one reference from a face to a vertex.
///
/// A vertex shared by several faces is referenced by several loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loop {
    pub vertex_index: u32,
}

/// A face, stored as a contiguous range of loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    /// Index of the first loop of this face.
    pub loop_start: u32,
    /// Number of corners (3 for a triangle, 4 for a quad...).
    pub loop_total: u32,
}

impl Polygon {
    pub fn new(loop_start: u32, loop_total: u32) -> Self {
        Self {
            loop_start,
            loop_total,
        }
    }

    /// Range of loop indices covered by this face.
    pub fn loop_range(&self) -> std::ops::Range<usize> {
        let start = self.loop_start as usize;
        start..start + self.loop_total as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_loop_range() {
        let quad = Polygon::new(6, 4);
        assert_eq!(quad.loop_range(), 6..10);
        assert_eq!(quad.loop_range().len(), 4);
    }
}
