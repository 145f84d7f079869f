use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use orrery_common::{BodyId, Color, Transform};

use crate::context::Light;

const ID_PLACEHOLDER: &str = "{id}";

/// Errors from loading a scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid scene config: {0}")]
    Invalid(String),
}

/// Scene layout shared by every context: model paths, group transform,
/// background and lights.
///
/// Paths are relative to the asset loader's root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub system_model: PathBuf,
    /// Surface model path; `{id}` is replaced with the body id.
    pub surface_model_template: String,
    pub system_scale: f32,
    pub system_offset: Vec3,
    pub surface_scale: f32,
    /// Packed `0xRRGGBB`.
    pub background: u32,
    pub lights: Vec<Light>,
    /// Radius of the invisible pick sphere around each body.
    pub proxy_radius: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            system_model: PathBuf::from("solar_system_animation.glb"),
            surface_model_template: format!("{ID_PLACEHOLDER}_surface.glb"),
            system_scale: 0.5,
            system_offset: Vec3::new(0.0, 1.0, 0.0),
            surface_scale: 1.0,
            background: 0x000000,
            lights: vec![
                Light::Ambient {
                    color: 0xffffff,
                    intensity: 0.5,
                },
                Light::Directional {
                    color: 0xffffff,
                    intensity: 1.0,
                    position: Vec3::new(10.0, 10.0, 10.0),
                },
            ],
            proxy_radius: 1.0,
        }
    }
}

impl SceneConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.as_ref().display(), "scene config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("system_scale", self.system_scale),
            ("surface_scale", self.surface_scale),
            ("proxy_radius", self.proxy_radius),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be finite and > 0, got {value}"
                )));
            }
        }
        if !self.surface_model_template.contains(ID_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "surface_model_template {:?} lacks {ID_PLACEHOLDER}",
                self.surface_model_template
            )));
        }
        if self.background > 0xff_ffff {
            return Err(ConfigError::Invalid(format!(
                "background {:#x} is not a 0xRRGGBB color",
                self.background
            )));
        }
        Ok(())
    }

    pub fn surface_model_path(&self, id: &BodyId) -> PathBuf {
        PathBuf::from(self.surface_model_template.replace(ID_PLACEHOLDER, id.as_str()))
    }

    pub fn system_transform(&self) -> Transform {
        Transform::scaled_at(self.system_scale, self.system_offset)
    }

    pub fn surface_transform(&self) -> Transform {
        Transform::scaled_at(self.surface_scale, Vec3::ZERO)
    }

    pub fn background_color(&self) -> Color {
        Color::from_hex(self.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SceneConfig::default();
        config.validate().unwrap();
        assert_eq!(config.lights.len(), 2);
        assert_eq!(config.background_color(), Color::BLACK);
        assert_eq!(
            config.surface_model_path(&BodyId::from("mars_BezierCircle_14")),
            PathBuf::from("mars_BezierCircle_14_surface.glb")
        );
        let p = config.system_transform().transform_point(Vec3::new(2.0, 0.0, 0.0));
        assert!((p - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = SceneConfig::from_yaml_str(
            "system_model: system.gltf\nproxy_radius: 2.5\n",
        )
        .unwrap();
        assert_eq!(config.system_model, PathBuf::from("system.gltf"));
        assert_eq!(config.proxy_radius, 2.5);
        assert_eq!(config.system_scale, 0.5);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            SceneConfig::from_yaml_str("proxy_radius: 0.0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SceneConfig::from_yaml_str("surface_model_template: surface.glb\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SceneConfig::from_yaml_str("background: 33554432\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SceneConfig::from_yaml_str("bogus: 1\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "surface_scale: 2.0\n").unwrap();
        let config = SceneConfig::load(tmp.path()).unwrap();
        assert_eq!(config.surface_scale, 2.0);
    }
}
