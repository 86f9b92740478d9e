//! Axis selection and per-axis scroll multipliers

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Axis currently picked on the gizmo.
///
/// Set externally by whatever hit-test the host runs against the axis
/// handles. Only one axis is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectedAxis {
    #[default]
    None,
    X,
    Y,
    Z,
}

impl SelectedAxis {
    /// World unit vector of the axis, `Vec3::ZERO` for `None`.
    pub fn unit(self) -> Vec3 {
        match self {
            SelectedAxis::None => Vec3::ZERO,
            SelectedAxis::X => Vec3::X,
            SelectedAxis::Y => Vec3::Y,
            SelectedAxis::Z => Vec3::Z,
        }
    }

    pub fn is_none(self) -> bool {
        self == SelectedAxis::None
    }

    /// Resting orientation of the axis handle relative to the gizmo root.
    ///
    /// X is unrotated, Y is yawed 90° about Z, Z is pitched 90° so its
    /// forward points up.
    pub fn handle_rotation(self) -> Quat {
        match self {
            SelectedAxis::Y => Quat::from_rotation_z(90f32.to_radians()),
            SelectedAxis::Z => Quat::from_rotation_y(-90f32.to_radians()),
            SelectedAxis::X | SelectedAxis::None => Quat::IDENTITY,
        }
    }

    /// Right vector of the axis handle in world space.
    pub fn handle_right(self, gizmo_rotation: Quat) -> Vec3 {
        (gizmo_rotation * self.handle_rotation()) * Vec3::Y
    }

    /// Axis the target turns about when this ring is dragged: X pitches
    /// about Y, Y yaws about Z and Z rolls about X.
    pub fn rotation_axis(self) -> Vec3 {
        match self {
            SelectedAxis::None => Vec3::ZERO,
            SelectedAxis::X => Vec3::Y,
            SelectedAxis::Y => Vec3::Z,
            SelectedAxis::Z => Vec3::X,
        }
    }
}

/// Space a gizmo delta is applied in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformSpace {
    /// Along the target's own axes
    #[default]
    Local,
    /// Along the world axes
    World,
}

/// Multiplier accumulated from scroll-wheel input.
///
/// Never drops below [`AxisMultiplier::FLOOR`]; at zero or below the
/// interaction would stall.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisMultiplier(f32);

impl AxisMultiplier {
    pub const FLOOR: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        let mut multiplier = Self(Self::FLOOR);
        multiplier.set(value);
        multiplier
    }

    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    pub fn set(&mut self, value: f32) {
        self.0 = if value.is_finite() {
            value.max(Self::FLOOR)
        } else {
            Self::FLOOR
        };
    }

    /// Add one frame's wheel delta, clamping to the floor.
    pub fn accumulate(&mut self, wheel_delta: f32) -> f32 {
        if wheel_delta.is_finite() && wheel_delta != 0.0 {
            self.set(self.0 + wheel_delta);
        }
        self.0
    }
}

impl Default for AxisMultiplier {
    fn default() -> Self {
        Self(5.0)
    }
}
