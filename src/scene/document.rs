use crate::error::{NocsError, NocsResult};
use crate::scene::material::Material;
use crate::scene::object::SceneObject;
use serde::{Deserialize, Serialize};

/// In-memory scene: objects, the shared material library and the active object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub materials: Vec<Material>,
    /// Index into `objects`.
    #[serde(default)]
    pub active_object: Option<usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object and returns its index.
    pub fn add_object(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn find_object(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.name == name)
    }

    pub fn active(&self) -> Option<&SceneObject> {
        self.active_object.and_then(|i| self.objects.get(i))
    }

    pub fn active_mut(&mut self) -> Option<&mut SceneObject> {
        self.active_object.and_then(|i| self.objects.get_mut(i))
    }

    pub fn set_active(&mut self, name: &str) -> NocsResult<()> {
        let idx = self
            .find_object(name)
            .ok_or_else(|| NocsError::ObjectNotFound(name.to_string()))?;
        self.active_object = Some(idx);
        Ok(())
    }

    /// First object holding a mesh, if any.
    pub fn first_mesh_object(&self) -> Option<usize> {
        self.objects.iter().position(|o| o.mesh().is_some())
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Adds `material` to the library unless one with the same name exists.
    ///
    /// An existing material is kept untouched. Returns whether it was added.
    pub fn add_material(&mut self, material: Material) -> bool {
        if self.material(&material.name).is_some() {
            return false;
        }
        self.materials.push(material);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::mesh::Mesh;
    use crate::scene::object::ObjectData;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new("Camera", ObjectData::Camera));
        scene.add_object(SceneObject::new_mesh("Cube", Mesh::create_unit_cube()));
        scene
    }

    #[test]
    fn test_active_object() {
        let mut scene = sample_scene();
        assert!(scene.active().is_none());

        scene.set_active("Cube").unwrap();
        assert_eq!(scene.active().map(|o| o.name.as_str()), Some("Cube"));

        let err = scene.set_active("Suzanne").unwrap_err();
        assert!(matches!(err, NocsError::ObjectNotFound(_)));
        // A failed lookup keeps the previous selection.
        assert_eq!(scene.active_object, Some(1));
    }

    #[test]
    fn test_first_mesh_object() {
        assert_eq!(sample_scene().first_mesh_object(), Some(1));
        assert_eq!(Scene::new().first_mesh_object(), None);
    }

    #[test]
    fn test_add_material_keeps_existing() {
        let mut scene = Scene::new();
        assert!(scene.add_material(Material::new("Mat")));

        let mut other = Material::new("Mat");
        other.use_nodes = !scene.materials[0].use_nodes;
        assert!(!scene.add_material(other));
        assert_eq!(scene.materials, vec![Material::new("Mat")]);
    }
}
