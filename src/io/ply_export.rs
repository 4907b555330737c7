//! Colored PLY export.
//!
//! PLY stores colors per vertex, so a corner-domain layer is collapsed by
//! averaging the colors of each vertex's loops. For NOCS layers every loop of
//! a vertex already carries the same value, so nothing is lost.

use crate::core::color::{Rgba, rgb_to_u8};
use crate::error::{NocsError, NocsResult};
use crate::scene::attributes::{AttributeDomain, ColorAttribute};
use crate::scene::mesh::Mesh;
use log::info;
use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};
use ply_rs::writer::Writer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Saves `mesh` as ASCII PLY with RGB taken from the named color layer.
pub fn save_ply<P: AsRef<Path>>(mesh: &Mesh, attribute_name: &str, path: P) -> NocsResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ply(mesh, attribute_name, &mut writer)?;
    writer.flush()?;
    info!("PLY saved to {}", path.display());
    Ok(())
}

/// Writes `mesh` as ASCII PLY into any writer.
///
/// Fails with [`NocsError::InvalidMesh`] when the topology references loops or
/// vertices that do not exist.
pub fn write_ply<W: Write>(mesh: &Mesh, attribute_name: &str, writer: &mut W) -> NocsResult<()> {
    mesh.validate()?;
    let layer = mesh.color_attributes.get(attribute_name).ok_or_else(|| {
        NocsError::Ply(format!("mesh has no color attribute '{attribute_name}'"))
    })?;
    let colors = vertex_colors(mesh, layer)?;

    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::Ascii;
    ply.header
        .comments
        .push(format!("NOCS colors from attribute '{attribute_name}'"));

    let mut vertex_def = ElementDef::new("vertex".to_string());
    for axis in ["x", "y", "z"] {
        vertex_def.properties.add(PropertyDef::new(
            axis.to_string(),
            PropertyType::Scalar(ScalarType::Float),
        ));
    }
    for channel in ["red", "green", "blue"] {
        vertex_def.properties.add(PropertyDef::new(
            channel.to_string(),
            PropertyType::Scalar(ScalarType::UChar),
        ));
    }
    vertex_def.count = mesh.vertices.len();
    ply.header.elements.add(vertex_def);

    let mut face_def = ElementDef::new("face".to_string());
    face_def.properties.add(PropertyDef::new(
        "vertex_indices".to_string(),
        PropertyType::List(ScalarType::UChar, ScalarType::Int),
    ));
    face_def.count = mesh.polygons.len();
    ply.header.elements.add(face_def);

    let mut vertex_elements = Vec::with_capacity(mesh.vertices.len());
    for (v, color) in mesh.vertices.iter().zip(&colors) {
        let mut element = DefaultElement::new();
        element.insert("x".to_string(), Property::Float(v.position.x));
        element.insert("y".to_string(), Property::Float(v.position.y));
        element.insert("z".to_string(), Property::Float(v.position.z));
        let [r, g, b] = rgb_to_u8(color);
        element.insert("red".to_string(), Property::UChar(r));
        element.insert("green".to_string(), Property::UChar(g));
        element.insert("blue".to_string(), Property::UChar(b));
        vertex_elements.push(element);
    }
    ply.payload.insert("vertex".to_string(), vertex_elements);

    let mut face_elements = Vec::with_capacity(mesh.polygons.len());
    for poly in &mesh.polygons {
        let indices: Vec<i32> = mesh.loops[poly.loop_range()]
            .iter()
            .map(|l| l.vertex_index as i32)
            .collect();
        let mut element = DefaultElement::new();
        element.insert("vertex_indices".to_string(), Property::ListInt(indices));
        face_elements.push(element);
    }
    ply.payload.insert("face".to_string(), face_elements);

    Writer::new()
        .write_ply(writer, &mut ply)
        .map_err(|e| NocsError::Ply(e.to_string()))?;

    Ok(())
}

/// One color per vertex from a point or corner layer.
///
/// Vertices not referenced by any loop come out black.
pub fn vertex_colors(mesh: &Mesh, layer: &ColorAttribute) -> NocsResult<Vec<Rgba>> {
    match layer.domain {
        AttributeDomain::Point => {
            if layer.data.len() != mesh.vertices.len() {
                return Err(NocsError::invalid_mesh(format!(
                    "point layer '{}' has {} values for {} vertices",
                    layer.name,
                    layer.data.len(),
                    mesh.vertices.len()
                )));
            }
            Ok(layer.data.clone())
        }
        AttributeDomain::Corner => {
            if layer.data.len() != mesh.loops.len() {
                return Err(NocsError::invalid_mesh(format!(
                    "corner layer '{}' has {} values for {} loops",
                    layer.name,
                    layer.data.len(),
                    mesh.loops.len()
                )));
            }
            let mut sums = vec![Rgba::zeros(); mesh.vertices.len()];
            let mut counts = vec![0u32; mesh.vertices.len()];
            for (l, color) in mesh.loops.iter().zip(&layer.data) {
                let vi = l.vertex_index as usize;
                let (Some(sum), Some(count)) = (sums.get_mut(vi), counts.get_mut(vi)) else {
                    return Err(NocsError::invalid_mesh(format!(
                        "loop references vertex {vi} but only {} vertices exist",
                        mesh.vertices.len()
                    )));
                };
                *sum += color;
                *count += 1;
            }
            Ok(sums
                .into_iter()
                .zip(counts)
                .map(|(sum, n)| {
                    if n == 0 {
                        Rgba::new(0.0, 0.0, 0.0, 1.0)
                    } else {
                        sum / n as f32
                    }
                })
                .collect())
        }
    }
}
