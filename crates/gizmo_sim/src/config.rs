//! Simulation configuration
//!
//! ```toml
//! [gizmo]
//! rotate_space = "world"
//! debug_mode = true
//!
//! [collision]
//! convention = "generalized"
//!
//! [camera]
//! location = [-500.0, 0.0, 200.0]
//! look_at = [0.0, 0.0, 0.0]
//!
//! [[frames]]
//! mode = "Rotate"
//! axis = "Z"
//! mouse = [10.0, 0.0]
//! ```

use gizmo_collision::CollisionConfig;
use gizmo_interact::{GizmoConfig, GizmoMode, SelectedAxis};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while setting up or running a simulation
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Failed to read {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid simulation config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Gizmo(#[from] gizmo_interact::GizmoError),

    #[error(transparent)]
    Collision(#[from] gizmo_collision::CollisionError),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Fixed camera the script is viewed through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub location: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            location: Vec3::new(-500.0, 0.0, 200.0),
            look_at: Vec3::ZERO,
        }
    }
}

/// Input for one frame of the script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptedFrame {
    /// Switch mode before the frame (the axis is released first)
    pub mode: Option<GizmoMode>,
    pub axis: SelectedAxis,
    pub mouse: Vec2,
    pub wheel: f32,
    pub keys_down: Vec<String>,
    pub keys_up: Vec<String>,
}

/// Everything one simulation run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub gizmo: GizmoConfig,
    pub collision: CollisionConfig,
    pub camera: CameraSettings,
    /// Starting location of the target
    pub target: Vec3,
    /// Corner list applied to the target's volume; empty keeps the default box
    pub corners: Vec<Vec3>,
    pub frames: Vec<ScriptedFrame>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gizmo: GizmoConfig::default(),
            collision: CollisionConfig::default(),
            camera: CameraSettings::default(),
            target: Vec3::ZERO,
            corners: Vec::new(),
            frames: default_script(),
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.gizmo.validate()?;
        config.collision.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded simulation config from {:?}", path);
        Ok(config)
    }

    pub fn print_summary(&self) {
        log::info!("Simulation:");
        log::info!(
            "  Camera: {:?} looking at {:?}",
            self.camera.location,
            self.camera.look_at
        );
        log::info!(
            "  Spaces: rotate={:?} move={:?}, debug={}",
            self.gizmo.rotate_space,
            self.gizmo.move_space,
            self.gizmo.debug_mode
        );
        log::info!("  Convention: {:?}", self.collision.convention);
        log::info!("  Frames: {}", self.frames.len());
    }
}

/// Roll with the Z ring, pitch with the X ring and the wheel up, try a blocked
/// frame, then slide along Y.
fn default_script() -> Vec<ScriptedFrame> {
    vec![
        ScriptedFrame {
            mode: Some(GizmoMode::Rotate),
            axis: SelectedAxis::Z,
            mouse: Vec2::new(10.0, 0.0),
            ..Default::default()
        },
        ScriptedFrame {
            axis: SelectedAxis::X,
            mouse: Vec2::new(0.0, 5.0),
            wheel: 1.0,
            ..Default::default()
        },
        ScriptedFrame {
            axis: SelectedAxis::X,
            mouse: Vec2::new(5.0, 5.0),
            keys_down: vec!["RightMouseButton".to_string()],
            ..Default::default()
        },
        ScriptedFrame {
            mode: Some(GizmoMode::Move),
            axis: SelectedAxis::Y,
            mouse: Vec2::new(4.0, 0.0),
            keys_up: vec!["RightMouseButton".to_string()],
            ..Default::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gizmo_collision::CornerConvention;
    use gizmo_interact::TransformSpace;

    #[test]
    fn test_default_script() {
        let config = SimConfig::default();
        assert_eq!(config.frames.len(), 4);
        assert_eq!(config.frames[0].mode, Some(GizmoMode::Rotate));
        assert!(config.corners.is_empty());
    }

    #[test]
    fn test_from_toml() {
        let config = SimConfig::from_toml_str(
            r#"
            target = [0.0, 100.0, 0.0]

            [gizmo]
            rotate_space = "world"

            [collision]
            convention = "generalized"

            [[frames]]
            mode = "Rotate"
            axis = "Z"
            mouse = [3.0, 0.0]

            [[frames]]
            axis = "X"
            wheel = -2.0
            "#,
        )
        .unwrap();

        assert_eq!(config.target, Vec3::new(0.0, 100.0, 0.0));
        assert_eq!(config.gizmo.rotate_space, TransformSpace::World);
        assert_eq!(config.collision.convention, CornerConvention::Generalized);
        assert_eq!(config.frames.len(), 2);
        assert_eq!(config.frames[1].mode, None);
        assert_eq!(config.frames[1].mouse, Vec2::ZERO);
        assert_eq!(config.camera, CameraSettings::default());
    }

    #[test]
    fn test_rejects_invalid_sections() {
        assert!(matches!(
            SimConfig::from_toml_str("[gizmo]\nsize_divisor = 0.0"),
            Err(SimError::Gizmo(_))
        ));
        assert!(matches!(
            SimConfig::from_toml_str("[collision]\ndefault_half_extents = [1.0, -1.0, 1.0]"),
            Err(SimError::Collision(_))
        ));
        assert!(matches!(
            SimConfig::load("/nonexistent/sim.toml"),
            Err(SimError::ConfigRead { .. })
        ));
    }
}
