//! The "Create NOCS Material" command.
//!
//! Operators run against a whole [`Scene`] and never fail with an error;
//! every outcome is a status plus a user-facing message.

use crate::nocs::material::{DEFAULT_MATERIAL_SUFFIX, NocsShader, build_nocs_material, material_name};
use crate::nocs::normalizer::{NormalizeOutcome, NormalizeParams, apply_nocs};
use crate::scene::document::Scene;
use log::{error, info, warn};
use std::fmt;

/// How an operator run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorStatus {
    Finished,
    Cancelled,
}

/// Severity of the message attached to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for ReportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLevel::Info => f.write_str("INFO"),
            ReportLevel::Warning => f.write_str("WARNING"),
            ReportLevel::Error => f.write_str("ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorReport {
    pub status: OperatorStatus,
    pub level: ReportLevel,
    pub message: String,
}

impl OperatorReport {
    fn new(status: OperatorStatus, level: ReportLevel, message: impl Into<String>) -> Self {
        Self {
            status,
            level,
            message: message.into(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == OperatorStatus::Finished
    }

    /// Sends the message to the log at the matching level.
    pub fn log(&self) {
        match self.level {
            ReportLevel::Info => info!("{}", self.message),
            ReportLevel::Warning => warn!("{}", self.message),
            ReportLevel::Error => error!("{}", self.message),
        }
    }
}

/// A user-invocable command acting on the scene.
pub trait Operator {
    /// Stable identifier, `category.name`.
    fn id(&self) -> &'static str;
    /// Human-readable label.
    fn label(&self) -> &'static str;
    fn execute(&self, scene: &mut Scene) -> OperatorReport;
}

/// Settings for [`CreateNocsMaterial`].
#[derive(Debug, Clone, PartialEq)]
pub struct NocsSettings {
    pub normalize: NormalizeParams,
    pub material_suffix: String,
    pub shader: NocsShader,
}

impl Default for NocsSettings {
    fn default() -> Self {
        Self {
            normalize: NormalizeParams::default(),
            material_suffix: DEFAULT_MATERIAL_SUFFIX.to_string(),
            shader: NocsShader::default(),
        }
    }
}

/// Colors the active mesh with NOCS values and assigns a material showing them.
#[derive(Debug, Clone, Default)]
pub struct CreateNocsMaterial {
    pub settings: NocsSettings,
}

impl CreateNocsMaterial {
    pub fn new(settings: NocsSettings) -> Self {
        Self { settings }
    }
}

impl Operator for CreateNocsMaterial {
    fn id(&self) -> &'static str {
        "object.create_nocs_material"
    }

    fn label(&self) -> &'static str {
        "Create NOCS Material"
    }

    fn execute(&self, scene: &mut Scene) -> OperatorReport {
        let Some(object_name) = scene
            .active()
            .filter(|o| o.mesh().is_some())
            .map(|o| o.name.clone())
        else {
            return no_mesh_selected();
        };

        // Everything that can fail runs before the mesh is touched.
        let mat_name = material_name(&object_name, &self.settings.material_suffix);
        let shader = self.settings.shader;
        let pending = if scene.material(&mat_name).is_some() {
            None
        } else {
            let attribute = self.settings.normalize.attribute_name.as_str();
            match build_nocs_material(&mat_name, attribute, shader) {
                Ok(material) => Some(material),
                Err(e) => {
                    return OperatorReport::new(
                        OperatorStatus::Cancelled,
                        ReportLevel::Error,
                        format!("Failed to build material '{mat_name}': {e}"),
                    );
                }
            }
        };

        let Some(mesh) = scene.active_mut().and_then(|o| o.mesh_mut()) else {
            return no_mesh_selected();
        };
        if let NormalizeOutcome::Skipped { reason } = apply_nocs(mesh, &self.settings.normalize) {
            warn!("{object_name}: {reason}");
            let message = if mesh.has_geometry() {
                format!("Skipping {object_name}: {reason}.")
            } else {
                format!("Skipping {object_name} because it has no geometry.")
            };
            return OperatorReport::new(OperatorStatus::Cancelled, ReportLevel::Warning, message);
        }
        if !mesh.assign_material(&mat_name) {
            info!("'{mat_name}' already assigned to {object_name}, slot not duplicated");
        }

        if pending.is_some_and(|material| scene.add_material(material)) {
            info!("Created material '{mat_name}' ({shader} shader)");
        } else {
            info!("Reusing existing material '{mat_name}'");
        }

        OperatorReport::new(
            OperatorStatus::Finished,
            ReportLevel::Info,
            format!("Created NOCS material for {object_name}."),
        )
    }
}

fn no_mesh_selected() -> OperatorReport {
    OperatorReport::new(
        OperatorStatus::Cancelled,
        ReportLevel::Error,
        "No mesh object selected.",
    )
}
