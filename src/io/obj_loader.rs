use crate::core::geometry::Vertex;
use crate::error::{NocsError, NocsResult};
use crate::scene::document::Scene;
use crate::scene::mesh::Mesh;
use crate::scene::object::SceneObject;
use log::{debug, info, warn};
use std::path::Path;

/// Loads an OBJ file into a scene, one mesh object per OBJ object/group.
///
/// Faces keep their original arity (quads stay quads) so every face corner
/// becomes one loop. Materials referenced by the file are ignored. The first
/// mesh object becomes active.
///
/// # Arguments
/// * `path` - The file path to the .obj file.
///
/// # Returns
/// * `NocsResult<Scene>` - The loaded scene, or `FileNotFound` / `ObjLoad` /
///   `InvalidMesh` when the file is missing or malformed.
pub fn load_obj<P: AsRef<Path>>(path: P) -> NocsResult<Scene> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(NocsError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    info!("Loading OBJ file: {}", path.display());

    let load_options = tobj::LoadOptions {
        triangulate: false,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj(path, &load_options)
        .map_err(|e| NocsError::ObjLoad(format!("{}: {}", path.display(), e)))?;

    let mut scene = Scene::new();
    for model in models {
        let mesh = convert_mesh(&model.mesh)
            .map_err(|e| NocsError::ObjLoad(format!("object '{}': {}", model.name, e)))?;

        if !mesh.has_geometry() {
            warn!("Object '{}' has no faces", model.name);
        }
        debug!(
            "Object '{}': {} vertices, {} faces, {} loops",
            model.name,
            mesh.vertices.len(),
            mesh.polygons.len(),
            mesh.loops.len()
        );

        let name = unique_name(&scene, &model.name);
        scene.add_object(SceneObject::new_mesh(name, mesh));
    }

    scene.active_object = scene.first_mesh_object();

    info!("OBJ loaded successfully. Objects: {}", scene.objects.len());

    Ok(scene)
}

/// Rebuilds polygon runs from tobj's flat index list and per-face arities.
fn convert_mesh(mesh: &tobj::Mesh) -> NocsResult<Mesh> {
    let vertices: Vec<Vertex> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| Vertex::from_coords(p[0], p[1], p[2]))
        .collect();

    // An empty arity list means the object is all triangles.
    let faces: Vec<Vec<u32>> = if mesh.face_arities.is_empty() {
        mesh.indices.chunks_exact(3).map(<[u32]>::to_vec).collect()
    } else {
        let mut faces = Vec::with_capacity(mesh.face_arities.len());
        let mut start = 0usize;
        for &arity in &mesh.face_arities {
            let end = start + arity as usize;
            let face = mesh.indices.get(start..end).ok_or_else(|| {
                NocsError::invalid_mesh(format!(
                    "face arities exceed index count {}",
                    mesh.indices.len()
                ))
            })?;
            faces.push(face.to_vec());
            start = end;
        }
        faces
    };

    Mesh::from_faces(vertices, &faces)
}

/// Appends `.001`, `.002`... until the name is free.
fn unique_name(scene: &Scene, base: &str) -> String {
    if scene.find_object(base).is_none() {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}.{n:03}"))
        .find(|candidate| scene.find_object(candidate).is_none())
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const QUAD_AND_TRI: &str = "\
o Wedge
v 0.0 0.0 0.0
v 2.0 0.0 0.0
v 2.0 1.0 0.0
v 0.0 1.0 0.0
v 1.0 0.5 4.0
f 1 2 3 4
f 1 2 5
";

    #[test]
    fn test_load_keeps_polygon_arity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wedge.obj");
        fs::write(&path, QUAD_AND_TRI).unwrap();

        let scene = load_obj(&path).unwrap();
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.active().unwrap().name, "Wedge");

        let mesh = scene.objects[0].mesh().unwrap();
        assert_eq!(mesh.vertices.len(), 5);
        assert_eq!(mesh.polygons.len(), 2);
        assert_eq!(mesh.polygons[0].loop_total, 4);
        assert_eq!(mesh.polygons[1].loop_total, 3);
        assert_eq!(mesh.loops.len(), 7);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_obj("/definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, NocsError::FileNotFound { .. }));
    }

    #[test]
    fn test_duplicate_object_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twins.obj");
        fs::write(
            &path,
            "o Part\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\no Part\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n",
        )
        .unwrap();

        let scene = load_obj(&path).unwrap();
        let names: Vec<&str> = scene.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Part", "Part.001"]);
    }

    #[test]
    fn test_unique_name() {
        let mut scene = Scene::new();
        assert_eq!(unique_name(&scene, "Cube"), "Cube");
        scene.add_object(SceneObject::new_mesh("Cube", Mesh::default()));
        scene.add_object(SceneObject::new_mesh("Cube.001", Mesh::default()));
        assert_eq!(unique_name(&scene, "Cube"), "Cube.002");
    }
}
