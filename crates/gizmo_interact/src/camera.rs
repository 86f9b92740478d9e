//! Camera view and per-frame input snapshots.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Length below which a direction is treated as degenerate.
pub const NORMALIZE_TOLERANCE: f32 = 1e-4;

/// Player camera as seen by the gizmo.
///
/// Follows the host convention: X forward, Y right, Z up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub location: Vec3,
    pub rotation: Quat,
}

impl CameraView {
    pub fn new(location: Vec3, rotation: Quat) -> Self {
        Self { location, rotation }
    }

    /// Camera at `location` aimed at `target` with no roll.
    pub fn looking_at(location: Vec3, target: Vec3) -> Self {
        let dir = safe_normal(target - location);
        if dir == Vec3::ZERO {
            return Self::new(location, Quat::IDENTITY);
        }
        let yaw = dir.y.atan2(dir.x);
        let pitch = dir.z.clamp(-1.0, 1.0).asin();
        Self::new(
            location,
            Quat::from_rotation_z(yaw) * Quat::from_rotation_y(-pitch),
        )
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Unit direction from the camera to `point`, zero when they coincide.
    pub fn direction_to(&self, point: Vec3) -> Vec3 {
        safe_normal(point - self.location)
    }
}

/// Normalize, or zero when shorter than [`NORMALIZE_TOLERANCE`].
pub fn safe_normal(v: Vec3) -> Vec3 {
    let len = v.length();
    if len > NORMALIZE_TOLERANCE {
        v / len
    } else {
        Vec3::ZERO
    }
}

/// Input gathered for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Mouse movement since last tick, Y positive upwards
    pub mouse_delta: Vec2,
    /// Scroll wheel movement since last tick
    pub wheel_delta: f32,
}

impl FrameInput {
    pub fn mouse(dx: f32, dy: f32) -> Self {
        Self {
            mouse_delta: Vec2::new(dx, dy),
            wheel_delta: 0.0,
        }
    }

    pub fn with_wheel(mut self, wheel_delta: f32) -> Self {
        self.wheel_delta = wheel_delta;
        self
    }

    pub fn has_mouse_movement(&self) -> bool {
        self.mouse_delta.x != 0.0 || self.mouse_delta.y != 0.0
    }
}
