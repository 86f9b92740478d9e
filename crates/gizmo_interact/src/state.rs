//! Gizmo state management.
//!
//! Owns the base and both interaction modules and routes each tick to the
//! module for the current mode.

use crate::axis::{AxisMultiplier, SelectedAxis};
use crate::base::GizmoBase;
use crate::camera::FrameInput;
use crate::config::GizmoConfig;
use crate::rotate::RotateGizmo;
use crate::scene::Scene;
use crate::translate::MoveGizmo;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Current gizmo operation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoMode {
    #[default]
    Move,
    Rotate,
}

/// Change applied to the target during one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformDelta {
    pub axis: SelectedAxis,
    /// World-space offset
    pub translation: Vec3,
    /// Rotation in the space the module is configured for
    pub rotation: Quat,
    /// Signed amount along/about the axis (units or degrees)
    pub amount: f32,
}

impl Default for TransformDelta {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TransformDelta {
    pub const ZERO: Self = Self {
        axis: SelectedAxis::None,
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        amount: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        self.amount == 0.0
    }
}

/// An interaction module driven once per tick.
pub trait GizmoModule {
    fn mode(&self) -> GizmoMode;

    fn selected_axis(&self) -> SelectedAxis;

    fn set_selected_axis(&mut self, axis: SelectedAxis);

    fn multiplier(&self) -> AxisMultiplier;

    /// Gate, compute and apply this tick's delta. Returns
    /// [`TransformDelta::ZERO`] when nothing was applied.
    fn tick(
        &mut self,
        base: &mut GizmoBase,
        scene: &mut dyn Scene,
        frame: &FrameInput,
    ) -> TransformDelta;
}

/// State for the gizmo system.
pub struct GizmoState {
    base: GizmoBase,
    mode: GizmoMode,
    scale: f32,
    move_gizmo: MoveGizmo,
    rotate_gizmo: RotateGizmo,
}

impl Default for GizmoState {
    fn default() -> Self {
        Self::new(GizmoConfig::default())
    }
}

impl GizmoState {
    pub fn new(config: GizmoConfig) -> Self {
        Self {
            base: GizmoBase::new(&config),
            mode: GizmoMode::Move,
            scale: 1.0,
            move_gizmo: MoveGizmo::new(
                AxisMultiplier::new(config.move_multiplier),
                config.move_space,
            ),
            rotate_gizmo: RotateGizmo::new(
                AxisMultiplier::new(config.rotate_multiplier),
                config.rotate_space,
            ),
        }
    }

    pub fn base(&self) -> &GizmoBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut GizmoBase {
        &mut self.base
    }

    pub fn mode(&self) -> GizmoMode {
        self.mode
    }

    /// Switch modes. Refused while an axis is held.
    pub fn set_mode(&mut self, mode: GizmoMode) -> bool {
        if self.current().selected_axis() != SelectedAxis::None {
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn select_axis(&mut self, axis: SelectedAxis) {
        self.current_mut().set_selected_axis(axis);
    }

    pub fn release_axis(&mut self) {
        self.current_mut().set_selected_axis(SelectedAxis::None);
    }

    pub fn selected_axis(&self) -> SelectedAxis {
        self.current().selected_axis()
    }

    /// World scale computed during the last tick.
    pub fn gizmo_scale(&self) -> f32 {
        self.scale
    }

    pub fn move_gizmo(&self) -> &MoveGizmo {
        &self.move_gizmo
    }

    pub fn rotate_gizmo(&self) -> &RotateGizmo {
        &self.rotate_gizmo
    }

    /// Run one frame of interaction.
    pub fn tick(&mut self, scene: &mut dyn Scene, frame: &FrameInput) -> TransformDelta {
        let module: &mut dyn GizmoModule = match self.mode {
            GizmoMode::Move => &mut self.move_gizmo,
            GizmoMode::Rotate => &mut self.rotate_gizmo,
        };
        let delta = module.tick(&mut self.base, scene, frame);

        self.base.track_target(scene);
        self.scale = self.base.gizmo_scale();
        delta
    }

    fn current(&self) -> &dyn GizmoModule {
        match self.mode {
            GizmoMode::Move => &self.move_gizmo,
            GizmoMode::Rotate => &self.rotate_gizmo,
        }
    }

    fn current_mut(&mut self) -> &mut dyn GizmoModule {
        match self.mode {
            GizmoMode::Move => &mut self.move_gizmo,
            GizmoMode::Rotate => &mut self.rotate_gizmo,
        }
    }
}
