use crate::error::{NocsError, NocsResult};
use crate::nocs::material::{DEFAULT_MATERIAL_SUFFIX, NocsShader};
use crate::nocs::normalizer::{DEFAULT_ATTRIBUTE_NAME, DEFAULT_EPSILON, NormalizeParams};
use crate::nocs::operator::NocsSettings;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub nocs: NocsConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct NocsConfig {
    #[serde(default = "default_attribute_name")]
    pub attribute_name: String,
    #[serde(default = "default_epsilon")]
    pub epsilon: f32,
    #[serde(default = "default_material_suffix")]
    pub material_suffix: String,
    #[serde(default)]
    pub shader: NocsShader,
}

impl Default for NocsConfig {
    fn default() -> Self {
        Self {
            attribute_name: default_attribute_name(),
            epsilon: default_epsilon(),
            material_suffix: default_material_suffix(),
            shader: NocsShader::default(),
        }
    }
}

fn default_attribute_name() -> String {
    DEFAULT_ATTRIBUTE_NAME.to_string()
}
fn default_epsilon() -> f32 {
    DEFAULT_EPSILON
}
fn default_material_suffix() -> String {
    DEFAULT_MATERIAL_SUFFIX.to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct InputConfig {
    /// Object to make active; the first mesh object when unset.
    pub object: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Colored PLY export of the processed mesh.
    pub ply: Option<String>,
    /// JSON scene document.
    pub document: Option<String>,
}

impl NocsConfig {
    pub fn to_settings(&self) -> NocsSettings {
        NocsSettings {
            normalize: NormalizeParams {
                attribute_name: self.attribute_name.clone(),
                epsilon: self.epsilon,
            },
            material_suffix: self.material_suffix.clone(),
            shader: self.shader,
        }
    }
}

impl Config {
    /// Loads and validates a TOML configuration file.
    ///
    /// # Arguments
    /// * `path` - The file path to the .toml file.
    ///
    /// # Returns
    /// * `NocsResult<Config>` - The parsed configuration with defaults filled
    ///   in, or `Io` / `Config` on a read, parse or validation failure.
    pub fn load<P: AsRef<Path>>(path: P) -> NocsResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> NocsResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| NocsError::config(format!("failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> NocsResult<()> {
        if self.nocs.attribute_name.is_empty() {
            return Err(NocsError::config("nocs.attribute_name must not be empty"));
        }
        if !(self.nocs.epsilon > 0.0 && self.nocs.epsilon.is_finite()) {
            return Err(NocsError::config(format!(
                "nocs.epsilon must be a positive number, got {}",
                self.nocs.epsilon
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.nocs.attribute_name, "NOCS");
        assert_eq!(config.nocs.epsilon, 1e-6);
        assert_eq!(config.nocs.material_suffix, "_NOCS_Material");
        assert_eq!(config.nocs.shader, NocsShader::Diffuse);
        assert!(config.input.object.is_none());
        assert!(config.output.ply.is_none());
        assert_eq!(config.nocs.to_settings(), NocsSettings::default());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            [nocs]
            attribute_name = "ObjectCoords"
            epsilon = 1e-4
            shader = "emission"

            [input]
            object = "Mug"

            [output]
            ply = "out/mug_nocs.ply"
            document = "out/scene.json"
            "#,
        )
        .unwrap();

        let settings = config.nocs.to_settings();
        assert_eq!(settings.normalize.attribute_name, "ObjectCoords");
        assert_eq!(settings.normalize.epsilon, 1e-4);
        assert_eq!(settings.shader, NocsShader::Emission);
        assert_eq!(settings.material_suffix, "_NOCS_Material");
        assert_eq!(config.input.object.as_deref(), Some("Mug"));
        assert_eq!(config.output.document.as_deref(), Some("out/scene.json"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_toml("[nocs]\nepsilon = 0.0").is_err());
        assert!(Config::from_toml("[nocs]\nepsilon = -1.0").is_err());
        assert!(Config::from_toml("[nocs]\nattribute_name = \"\"").is_err());
        assert!(Config::from_toml("[nocs]\nshader = \"toon\"").is_err());
    }
}
