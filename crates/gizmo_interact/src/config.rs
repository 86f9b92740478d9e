//! Gizmo configuration

use crate::axis::TransformSpace;
use crate::error::{GizmoError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Gizmo interaction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoConfig {
    /// Starting multiplier for rotation (degrees per unit of mouse delta / 5)
    pub rotate_multiplier: f32,

    /// Starting multiplier for movement (world units per unit of mouse delta)
    pub move_multiplier: f32,

    /// Space rotations are applied in. `World` adds the delta on the world
    /// side of the target's rotation; `Local` turns about the target's own axes.
    pub rotate_space: TransformSpace,

    /// Space translations are applied in
    pub move_space: TransformSpace,

    /// Minimum `forward · direction` for the target to count as in view
    pub view_cone_threshold: f32,

    /// Distance from the pawn divided by this gives the gizmo scale
    pub size_divisor: f32,

    /// Keys that block any interaction while held
    pub forbidden_keys: Vec<String>,

    /// Report every rejected interaction at warn level
    pub debug_mode: bool,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            rotate_multiplier: 5.0,
            move_multiplier: 5.0,
            rotate_space: TransformSpace::World,
            move_space: TransformSpace::Local,
            view_cone_threshold: 0.5,
            size_divisor: 500.0,
            forbidden_keys: vec!["RightMouseButton".to_string()],
            debug_mode: false,
        }
    }
}

impl GizmoConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GizmoError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded gizmo config from {:?}", path);
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.size_divisor <= 0.0 {
            return Err(GizmoError::InvalidConfig(format!(
                "size_divisor must be positive, got {}",
                self.size_divisor
            )));
        }
        if !(-1.0..=1.0).contains(&self.view_cone_threshold) {
            return Err(GizmoError::InvalidConfig(format!(
                "view_cone_threshold must be within [-1, 1], got {}",
                self.view_cone_threshold
            )));
        }
        Ok(())
    }

    /// Set debug mode
    pub fn with_debug(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Set the space both modules operate in
    pub fn with_space(mut self, space: TransformSpace) -> Self {
        self.rotate_space = space;
        self.move_space = space;
        self
    }
}
