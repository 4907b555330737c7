use crate::error::{NocsError, NocsResult};
use crate::io::obj_loader::load_obj;
use crate::scene::document::Scene;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const FORMAT_VERSION: &str = "1.0";

/// On-disk envelope around a scene.
#[derive(Debug, Serialize, Deserialize)]
pub struct SceneDocument {
    pub version: String,
    pub generator: String,
    pub saved_at: DateTime<Utc>,
    pub scene: Scene,
}

impl SceneDocument {
    pub fn new(scene: Scene) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            generator: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            saved_at: Utc::now(),
            scene,
        }
    }
}

/// Writes the scene as a pretty-printed JSON document.
///
/// # Arguments
/// * `scene` - The scene to save.
/// * `path` - Destination .json file; overwritten if present.
///
/// # Returns
/// * `NocsResult<()>` - `Document` if serialization fails, `Io` if the write does.
pub fn save_document<P: AsRef<Path>>(scene: &Scene, path: P) -> NocsResult<()> {
    let path = path.as_ref();
    let json = to_json(scene)?;
    fs::write(path, json)?;
    info!("Scene document saved to {}", path.display());
    Ok(())
}

/// Reads a scene document written by [`save_document`].
///
/// # Arguments
/// * `path` - The file path to the .json file.
///
/// # Returns
/// * `NocsResult<Scene>` - The stored scene, or `FileNotFound` / `Document` when
///   the file is missing, malformed, of another version or inconsistent.
pub fn load_document<P: AsRef<Path>>(path: P) -> NocsResult<Scene> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(NocsError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let scene = from_json(&content)?;
    info!(
        "Scene document loaded from {} ({} objects, {} materials)",
        path.display(),
        scene.objects.len(),
        scene.materials.len()
    );
    Ok(scene)
}

pub fn to_json(scene: &Scene) -> NocsResult<String> {
    serde_json::to_string_pretty(&SceneDocument::new(scene.clone()))
        .map_err(|e| NocsError::Document(format!("failed to serialize scene: {e}")))
}

/// Parses a document and checks every mesh's topology.
pub fn from_json(content: &str) -> NocsResult<Scene> {
    let doc: SceneDocument = serde_json::from_str(content)
        .map_err(|e| NocsError::Document(format!("failed to parse scene: {e}")))?;
    if doc.version != FORMAT_VERSION {
        return Err(NocsError::Document(format!(
            "unsupported document version {}",
            doc.version
        )));
    }
    for object in &doc.scene.objects {
        if let Some(mesh) = object.mesh() {
            mesh.validate()
                .map_err(|e| NocsError::Document(format!("object '{}': {}", object.name, e)))?;
        }
    }
    if let Some(idx) = doc.scene.active_object
        && idx >= doc.scene.objects.len()
    {
        return Err(NocsError::Document(format!(
            "active object index {idx} out of range"
        )));
    }
    Ok(doc.scene)
}

/// Loads an `.obj` model or a `.json` scene document, by extension.
pub fn load_input<P: AsRef<Path>>(path: P) -> NocsResult<Scene> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "obj" => load_obj(path),
        "json" => load_document(path),
        _ => Err(NocsError::UnsupportedInput(format!(
            "{} (expected .obj or .json)",
            path.display()
        ))),
    }
}
