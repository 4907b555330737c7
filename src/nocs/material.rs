use crate::error::NocsResult;
use crate::scene::material::{Material, ShaderNode};
use serde::Deserialize;
use std::fmt;

/// Suffix appended to the object name to form the material name.
pub const DEFAULT_MATERIAL_SUFFIX: &str = "_NOCS_Material";

/// Surface shader used to display the NOCS layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NocsShader {
    /// Lit diffuse surface.
    #[default]
    Diffuse,
    /// Unlit: colors show exactly as stored.
    Emission,
}

impl fmt::Display for NocsShader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NocsShader::Diffuse => f.write_str("diffuse"),
            NocsShader::Emission => f.write_str("emission"),
        }
    }
}

/// `"<object>_NOCS_Material"` with the default suffix.
pub fn material_name(object_name: &str, suffix: &str) -> String {
    format!("{object_name}{suffix}")
}

/// Builds the visualization material:
/// `Attribute(attribute) -> shader -> Material Output.Surface`.
pub fn build_nocs_material(
    name: &str,
    attribute_name: &str,
    shader: NocsShader,
) -> NocsResult<Material> {
    let mut material = Material::new(name);
    material.use_nodes = true;

    let tree = &mut material.node_tree;
    tree.clear();

    let attribute = tree.add_node(ShaderNode::Attribute {
        attribute_name: attribute_name.to_string(),
    });
    let (surface, surface_out) = match shader {
        NocsShader::Diffuse => (tree.add_node(ShaderNode::DiffuseBsdf), "BSDF"),
        NocsShader::Emission => (
            tree.add_node(ShaderNode::Emission { strength: 1.0 }),
            "Emission",
        ),
    };
    let output = tree.add_node(ShaderNode::OutputMaterial);

    tree.link(attribute, "Color", surface, "Color")?;
    tree.link(surface, surface_out, output, "Surface")?;

    Ok(material)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_name() {
        assert_eq!(
            material_name("Suzanne", DEFAULT_MATERIAL_SUFFIX),
            "Suzanne_NOCS_Material"
        );
    }

    #[test]
    fn test_diffuse_graph() {
        let mat = build_nocs_material("Cube_NOCS_Material", "NOCS", NocsShader::Diffuse).unwrap();
        assert!(mat.use_nodes);
        assert_eq!(mat.node_tree.nodes.len(), 3);
        assert_eq!(mat.node_tree.links.len(), 2);
        assert!(mat.node_tree.nodes.contains(&ShaderNode::DiffuseBsdf));
        assert_eq!(mat.surface_attribute(), Some("NOCS"));
    }

    #[test]
    fn test_emission_graph() {
        let mat = build_nocs_material("M", "ObjectCoords", NocsShader::Emission).unwrap();
        let output = mat.node_tree.output_node().unwrap();
        assert!(matches!(
            mat.node_tree.input_source(output, "Surface"),
            Some(ShaderNode::Emission { .. })
        ));
        assert_eq!(mat.surface_attribute(), Some("ObjectCoords"));
    }
}
