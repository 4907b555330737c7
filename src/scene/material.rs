use crate::error::{NocsError, NocsResult};
use serde::{Deserialize, Serialize};

/// The shader nodes a material graph can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShaderNode {
    /// Reads a named mesh attribute (e.g. a color layer).
    Attribute { attribute_name: String },
    /// Lambertian surface driven by an input color.
    DiffuseBsdf,
    /// Unlit surface: emits its input color as is.
    Emission { strength: f32 },
    /// Final surface sink of the graph.
    OutputMaterial,
}

impl ShaderNode {
    pub fn label(&self) -> &'static str {
        match self {
            ShaderNode::Attribute { .. } => "Attribute",
            ShaderNode::DiffuseBsdf => "Diffuse BSDF",
            ShaderNode::Emission { .. } => "Emission",
            ShaderNode::OutputMaterial => "Material Output",
        }
    }

    pub fn inputs(&self) -> &'static [&'static str] {
        match self {
            ShaderNode::Attribute { .. } => &[],
            ShaderNode::DiffuseBsdf => &["Color", "Roughness", "Normal"],
            ShaderNode::Emission { .. } => &["Color", "Strength"],
            ShaderNode::OutputMaterial => &["Surface", "Volume", "Displacement"],
        }
    }

    pub fn outputs(&self) -> &'static [&'static str] {
        match self {
            ShaderNode::Attribute { .. } => &["Color", "Vector", "Fac", "Alpha"],
            ShaderNode::DiffuseBsdf => &["BSDF"],
            ShaderNode::Emission { .. } => &["Emission"],
            ShaderNode::OutputMaterial => &[],
        }
    }
}

/// A directed connection from one node's output socket to another's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLink {
    pub from_node: usize,
    pub from_socket: String,
    pub to_node: usize,
    pub to_socket: String,
}

/// Shader graph: nodes addressed by index, plus links between their sockets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeTree {
    pub nodes: Vec<ShaderNode>,
    pub links: Vec<NodeLink>,
}

impl NodeTree {
    /// Adds a node and returns its index.
    pub fn add_node(&mut self, node: ShaderNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Connects `from.from_socket` to `to.to_socket`.
    ///
    /// An input socket accepts a single link; linking it again replaces the
    /// previous link.
    pub fn link(
        &mut self,
        from_node: usize,
        from_socket: &str,
        to_node: usize,
        to_socket: &str,
    ) -> NocsResult<()> {
        let from = self
            .nodes
            .get(from_node)
            .ok_or_else(|| NocsError::invalid_link(format!("no node at index {from_node}")))?;
        let to = self
            .nodes
            .get(to_node)
            .ok_or_else(|| NocsError::invalid_link(format!("no node at index {to_node}")))?;

        if !from.outputs().contains(&from_socket) {
            return Err(NocsError::invalid_link(format!(
                "'{}' has no output '{}'",
                from.label(),
                from_socket
            )));
        }
        if !to.inputs().contains(&to_socket) {
            return Err(NocsError::invalid_link(format!(
                "'{}' has no input '{}'",
                to.label(),
                to_socket
            )));
        }

        self.links
            .retain(|l| !(l.to_node == to_node && l.to_socket == to_socket));
        self.links.push(NodeLink {
            from_node,
            from_socket: from_socket.to_string(),
            to_node,
            to_socket: to_socket.to_string(),
        });
        Ok(())
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
    }

    /// The node feeding the given input socket, if linked.
    pub fn input_source(&self, to_node: usize, to_socket: &str) -> Option<&ShaderNode> {
        self.links
            .iter()
            .find(|l| l.to_node == to_node && l.to_socket == to_socket)
            .and_then(|l| self.nodes.get(l.from_node))
    }

    pub fn output_node(&self) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| matches!(n, ShaderNode::OutputMaterial))
    }
}

/// A named library material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub use_nodes: bool,
    #[serde(default)]
    pub node_tree: NodeTree,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            use_nodes: false,
            node_tree: NodeTree::default(),
        }
    }

    /// Name of the color attribute the surface reads, following the graph
    /// backwards from the output's `Surface` socket through the shader's
    /// `Color` input.
    pub fn surface_attribute(&self) -> Option<&str> {
        let tree = &self.node_tree;
        let output = tree.output_node()?;
        let shader_idx = tree
            .links
            .iter()
            .find(|l| l.to_node == output && l.to_socket == "Surface")?
            .from_node;
        match tree.input_source(shader_idx, "Color")? {
            ShaderNode::Attribute { attribute_name } => Some(attribute_name.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute_node() -> ShaderNode {
        ShaderNode::Attribute {
            attribute_name: "NOCS".to_string(),
        }
    }

    #[test]
    fn test_link_validates_sockets() {
        let mut tree = NodeTree::default();
        let attr = tree.add_node(attribute_node());
        let diffuse = tree.add_node(ShaderNode::DiffuseBsdf);

        assert!(tree.link(attr, "Color", diffuse, "Color").is_ok());
        assert!(tree.link(attr, "BSDF", diffuse, "Color").is_err());
        assert!(tree.link(attr, "Color", diffuse, "Surface").is_err());
        assert!(tree.link(attr, "Color", 42, "Color").is_err());
        assert_eq!(tree.links.len(), 1);
    }

    #[test]
    fn test_relink_replaces_input() {
        let mut tree = NodeTree::default();
        let a = tree.add_node(attribute_node());
        let b = tree.add_node(ShaderNode::Attribute {
            attribute_name: "Col".to_string(),
        });
        let diffuse = tree.add_node(ShaderNode::DiffuseBsdf);

        tree.link(a, "Color", diffuse, "Color").unwrap();
        tree.link(b, "Color", diffuse, "Color").unwrap();
        assert_eq!(tree.links.len(), 1);
        assert_eq!(tree.links[0].from_node, b);
    }

    #[test]
    fn test_surface_attribute() {
        let mut mat = Material::new("Test");
        let tree = &mut mat.node_tree;
        let attr = tree.add_node(attribute_node());
        let emit = tree.add_node(ShaderNode::Emission { strength: 1.0 });
        let out = tree.add_node(ShaderNode::OutputMaterial);
        tree.link(attr, "Color", emit, "Color").unwrap();
        tree.link(emit, "Emission", out, "Surface").unwrap();

        assert_eq!(mat.surface_attribute(), Some("NOCS"));

        mat.node_tree.clear();
        assert_eq!(mat.surface_attribute(), None);
    }
}
