//! Collision volume configuration

use crate::corners::{CornerConvention, DEFAULT_HALF_EXTENTS};
use crate::error::{CollisionError, Result};
use crate::proxy::Color;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults for newly created collision volumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Half extents of the starting box
    pub default_half_extents: Vec3,

    /// Wireframe line thickness
    pub line_thickness: f32,

    /// Wireframe colour (RGBA)
    pub shape_color: Color,

    /// How corner lists are validated
    pub convention: CornerConvention,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            default_half_extents: DEFAULT_HALF_EXTENTS,
            line_thickness: 1.0,
            shape_color: Color::GREEN,
            convention: CornerConvention::ParallelFaces,
        }
    }
}

impl CollisionConfig {
    /// Configuration accepting any convex point cloud
    pub fn generalized() -> Self {
        Self {
            convention: CornerConvention::Generalized,
            ..Default::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CollisionError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded collision config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let half = self.default_half_extents;
        if !(half.is_finite() && half.cmpgt(Vec3::ZERO).all()) {
            return Err(CollisionError::InvalidDimensions(format!(
                "default_half_extents must be positive, got {:?}",
                half
            )));
        }
        Ok(())
    }
}
