use crate::core::bounds::Aabb;
use crate::core::geometry::{Loop, Polygon, Vertex};
use crate::error::{NocsError, NocsResult};
use crate::scene::attributes::ColorAttributes;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Polygonal mesh in local object space.
///
/// Topology follows the corner model: each polygon owns a contiguous run of
/// loops, each loop points at one vertex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub loops: Vec<Loop>,
    pub polygons: Vec<Polygon>,
    #[serde(default)]
    pub color_attributes: ColorAttributes,
    /// Names of library materials assigned to this mesh, in slot order.
    #[serde(default)]
    pub material_slots: Vec<String>,
}

impl Mesh {
    /// Builds a mesh from vertices and faces given as vertex index lists.
    pub fn from_faces(vertices: Vec<Vertex>, faces: &[Vec<u32>]) -> NocsResult<Self> {
        let mut loops = Vec::with_capacity(faces.iter().map(Vec::len).sum());
        let mut polygons = Vec::with_capacity(faces.len());

        for face in faces {
            if face.len() < 3 {
                return Err(NocsError::invalid_mesh(format!(
                    "face with {} corners",
                    face.len()
                )));
            }
            polygons.push(Polygon::new(loops.len() as u32, face.len() as u32));
            loops.extend(face.iter().map(|&vertex_index| Loop { vertex_index }));
        }

        let mesh = Self {
            vertices,
            loops,
            polygons,
            ..Default::default()
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Builds a triangle mesh from a flat index buffer (3 indices per triangle).
    pub fn from_triangles(vertices: Vec<Vertex>, indices: &[u32]) -> NocsResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(NocsError::invalid_mesh(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        let faces: Vec<Vec<u32>> = indices.chunks_exact(3).map(<[u32]>::to_vec).collect();
        Self::from_faces(vertices, &faces)
    }

    /// Checks that every polygon and loop points at existing data.
    pub fn validate(&self) -> NocsResult<()> {
        for (i, poly) in self.polygons.iter().enumerate() {
            if poly.loop_range().end > self.loops.len() {
                return Err(NocsError::invalid_mesh(format!(
                    "polygon {} spans loops {:?} but only {} loops exist",
                    i,
                    poly.loop_range(),
                    self.loops.len()
                )));
            }
        }
        for (i, l) in self.loops.iter().enumerate() {
            if l.vertex_index as usize >= self.vertices.len() {
                return Err(NocsError::invalid_mesh(format!(
                    "loop {} references vertex {} but only {} vertices exist",
                    i,
                    l.vertex_index,
                    self.vertices.len()
                )));
            }
        }
        Ok(())
    }

    /// True when there is nothing to color: no vertices or no faces.
    pub fn has_geometry(&self) -> bool {
        !self.vertices.is_empty() && !self.polygons.is_empty()
    }

    /// Local-space bounding box over all vertices, loose ones included.
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// Position referenced by a loop.
    pub fn loop_position(&self, loop_index: usize) -> Option<Point3<f32>> {
        let l = self.loops.get(loop_index)?;
        self.vertices
            .get(l.vertex_index as usize)
            .map(|v| v.position)
    }

    /// Appends a material slot unless the material is already assigned.
    ///
    /// Returns true if a slot was added.
    pub fn assign_material(&mut self, material_name: &str) -> bool {
        if self.material_slots.iter().any(|m| m == material_name) {
            return false;
        }
        self.material_slots.push(material_name.to_string());
        true
    }

    /// Axis-aligned cube spanning `min..max`, 8 vertices and 6 quads.
    pub fn create_box(min: Point3<f32>, max: Point3<f32>) -> Self {
        let bb = Aabb::new(min, max);
        let vertices = bb.corners().iter().map(|&c| Vertex::new(c)).collect();
        // Corner order from Aabb::corners: bit 2 = x, bit 1 = y, bit 0 = z.
        let faces = [
            vec![0, 1, 3, 2], // -X
            vec![4, 6, 7, 5], // +X
            vec![0, 4, 5, 1], // -Y
            vec![2, 3, 7, 6], // +Y
            vec![0, 2, 6, 4], // -Z
            vec![1, 5, 7, 3], // +Z
        ];
        let mut loops = Vec::with_capacity(24);
        let mut polygons = Vec::with_capacity(6);
        for face in &faces {
            polygons.push(Polygon::new(loops.len() as u32, 4));
            loops.extend(face.iter().map(|&vertex_index| Loop { vertex_index }));
        }
        Self {
            vertices,
            loops,
            polygons,
            ..Default::default()
        }
    }

    /// The unit cube `[0, 1]^3`.
    pub fn create_unit_cube() -> Self {
        Self::create_box(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
    }

    /// A flat square of side `size` in the XY plane at z = 0, as one quad.
    pub fn create_plane(size: f32) -> Self {
        let h = size * 0.5;
        let vertices = vec![
            Vertex::from_coords(-h, -h, 0.0),
            Vertex::from_coords(h, -h, 0.0),
            Vertex::from_coords(h, h, 0.0),
            Vertex::from_coords(-h, h, 0.0),
        ];
        Self {
            vertices,
            loops: (0..4).map(|vertex_index| Loop { vertex_index }).collect(),
            polygons: vec![Polygon::new(0, 4)],
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_cube_topology() {
        let cube = Mesh::create_unit_cube();
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.polygons.len(), 6);
        assert_eq!(cube.loops.len(), 24);
        assert!(cube.validate().is_ok());

        // Every vertex is shared by exactly three faces.
        let mut uses = [0usize; 8];
        for l in &cube.loops {
            uses[l.vertex_index as usize] += 1;
        }
        assert!(uses.iter().all(|&n| n == 3));
    }

    #[test]
    fn test_from_triangles() {
        let verts = vec![
            Vertex::from_coords(0.0, 0.0, 0.0),
            Vertex::from_coords(1.0, 0.0, 0.0),
            Vertex::from_coords(0.0, 1.0, 0.0),
            Vertex::from_coords(1.0, 1.0, 0.0),
        ];
        let mesh = Mesh::from_triangles(verts, &[0, 1, 2, 2, 1, 3]).unwrap();
        assert_eq!(mesh.polygons.len(), 2);
        assert_eq!(mesh.polygons[1], Polygon::new(3, 3));
        assert_eq!(mesh.loop_position(5), Some(Point3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_from_triangles_bad_count() {
        let verts = vec![Vertex::from_coords(0.0, 0.0, 0.0)];
        assert!(Mesh::from_triangles(verts, &[0, 0]).is_err());
    }

    #[test]
    fn test_validate_out_of_range_vertex() {
        let verts = vec![
            Vertex::from_coords(0.0, 0.0, 0.0),
            Vertex::from_coords(1.0, 0.0, 0.0),
            Vertex::from_coords(0.0, 1.0, 0.0),
        ];
        let err = Mesh::from_faces(verts, &[vec![0, 1, 7]]).unwrap_err();
        assert!(matches!(err, NocsError::InvalidMesh(_)));
    }

    #[test]
    fn test_has_geometry() {
        assert!(!Mesh::default().has_geometry());

        let loose_points = Mesh {
            vertices: vec![Vertex::from_coords(0.0, 0.0, 0.0)],
            ..Default::default()
        };
        assert!(!loose_points.has_geometry());
        assert!(Mesh::create_plane(2.0).has_geometry());
    }

    #[test]
    fn test_assign_material_dedupes() {
        let mut mesh = Mesh::create_unit_cube();
        assert!(mesh.assign_material("Cube_NOCS_Material"));
        assert!(!mesh.assign_material("Cube_NOCS_Material"));
        assert!(mesh.assign_material("Other"));
        assert_eq!(mesh.material_slots, vec!["Cube_NOCS_Material", "Other"]);
    }

    #[test]
    fn test_plane_is_flat() {
        let bb = Mesh::create_plane(2.0).bounding_box().unwrap();
        assert_eq!(bb.size().z, 0.0);
        assert_eq!(bb.min, Point3::new(-1.0, -1.0, 0.0));
    }
}
