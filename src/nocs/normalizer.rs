//! Bounding-box normalization of mesh positions into NOCS colors.
//!
//! Each face corner gets the position of its vertex rescaled, per axis, into
//! `[0, 1]` relative to the mesh's own local bounding box. The result is
//! written into a corner-domain color layer which then becomes active.

use crate::core::bounds::Aabb;
use crate::core::color::{Rgba, opaque};
use crate::scene::attributes::AttributeDomain;
use crate::scene::mesh::Mesh;
use log::{debug, info};
use nalgebra::{Point3, Vector3};

/// Name of the color layer NOCS values are written to.
pub const DEFAULT_ATTRIBUTE_NAME: &str = "NOCS";

/// Smallest per-axis extent used as a divisor.
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// Parameters for one normalization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeParams {
    pub attribute_name: String,
    pub epsilon: f32,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self {
            attribute_name: DEFAULT_ATTRIBUTE_NAME.to_string(),
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// What a normalization pass did.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeOutcome {
    /// The layer was written.
    Applied {
        bounds: Aabb,
        loops_written: usize,
    },
    /// Nothing to do; the mesh was not touched.
    Skipped { reason: String },
}

impl NormalizeOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, NormalizeOutcome::Applied { .. })
    }
}

/// Maps a position into the unit cube of `bounds`.
///
/// `extent` must already be clamped to a positive minimum, see
/// [`Aabb::extent`]. A flat axis yields 0.0 since its numerator is zero too.
pub fn normalize_position(
    position: &Point3<f32>,
    bounds: &Aabb,
    extent: &Vector3<f32>,
) -> Vector3<f32> {
    (*position - bounds.min)
        .component_div(extent)
        .map(|c| c.clamp(0.0, 1.0))
}

/// Computes one NOCS color per loop without modifying the mesh.
///
/// Returns `None` when the mesh has no vertices or no faces, or when a loop
/// points past the vertex list.
pub fn compute_loop_colors(mesh: &Mesh, epsilon: f32) -> Option<(Aabb, Vec<Rgba>)> {
    if !mesh.has_geometry() {
        return None;
    }

    // Box over the eight corners, as a host's bound_box would report it.
    let bounds = Aabb::from_corners(&mesh.bounding_box()?.corners());
    let extent = bounds.extent(epsilon);

    let colors = (0..mesh.loops.len())
        .map(|i| {
            let position = mesh.loop_position(i)?;
            Some(opaque(normalize_position(&position, &bounds, &extent)))
        })
        .collect::<Option<Vec<_>>>()?;

    Some((bounds, colors))
}

/// Writes NOCS colors into the mesh's color layer and makes it active.
///
/// Any existing layer with the same name is overwritten in full, so running
/// twice on the same geometry yields identical data.
pub fn apply_nocs(mesh: &mut Mesh, params: &NormalizeParams) -> NormalizeOutcome {
    if !mesh.has_geometry() {
        return NormalizeOutcome::Skipped {
            reason: format!(
                "mesh has {} vertices and {} polygons",
                mesh.vertices.len(),
                mesh.polygons.len()
            ),
        };
    }
    if let Err(e) = mesh.validate() {
        return NormalizeOutcome::Skipped {
            reason: e.to_string(),
        };
    }
    let Some((bounds, colors)) = compute_loop_colors(mesh, params.epsilon) else {
        return NormalizeOutcome::Skipped {
            reason: "no bounding box".to_string(),
        };
    };

    debug!(
        "NOCS bounds: min {:?}, max {:?}, extent {:?}",
        bounds.min,
        bounds.max,
        bounds.extent(params.epsilon)
    );

    let loops_written = colors.len();
    let layer = mesh.color_attributes.get_or_insert(
        &params.attribute_name,
        AttributeDomain::Corner,
        loops_written,
    );
    layer.data = colors;
    mesh.color_attributes.set_active(&params.attribute_name);

    info!(
        "Wrote {} loop colors to attribute '{}'",
        loops_written, params.attribute_name
    );

    NormalizeOutcome::Applied {
        bounds,
        loops_written,
    }
}
