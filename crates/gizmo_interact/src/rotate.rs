//! Rotate module.
//!
//! Maps 2D mouse motion onto a rotation of the ring under the selected
//! handle: X pitches the target about Y, Y yaws it about Z and Z rolls it
//! about X. Which mouse direction drives the X and Y rings depends on how
//! the ring is oriented relative to the camera: rings seen edge-on respond
//! to vertical motion, rings seen face-on to horizontal motion, with a
//! blend in between.

use crate::axis::{AxisMultiplier, SelectedAxis, TransformSpace};
use crate::base::GizmoBase;
use crate::camera::{safe_normal, FrameInput};
use crate::gating;
use crate::scene::Scene;
use crate::state::{GizmoMode, GizmoModule, TransformDelta};
use glam::{Quat, Vec2, Vec3};

/// Degrees of rotation per unit of mouse delta, before the axis multiplier.
pub const MOUSE_SENSITIVITY: f32 = 5.0;

/// Above this |right.z| the handle is considered tilted towards vertical.
const STEEP_HANDLE_Z: f32 = 0.75;

/// Unit vector from `handle_location` towards the camera, flattened onto
/// the horizontal plane.
pub fn horizontal_normal(handle_location: Vec3, camera_location: Vec3) -> Vec3 {
    let diff = camera_location - handle_location;
    safe_normal(Vec3::new(diff.x, diff.y, 0.0))
}

/// Rotation in degrees (before the axis multiplier) for one frame of mouse
/// motion on the X or Y ring.
pub fn rotate_xy(
    axis: SelectedAxis,
    handle_right: Vec3,
    handle_location: Vec3,
    camera_location: Vec3,
    mouse: Vec2,
) -> f32 {
    let steep_multiplier = match axis {
        SelectedAxis::X if handle_right.z >= 0.0 => MOUSE_SENSITIVITY,
        SelectedAxis::X => -MOUSE_SENSITIVITY,
        SelectedAxis::Y if handle_right.z >= 0.0 => -MOUSE_SENSITIVITY,
        SelectedAxis::Y => MOUSE_SENSITIVITY,
        SelectedAxis::Z | SelectedAxis::None => return 0.0,
    };

    let normal = horizontal_normal(handle_location, camera_location);
    let dot = handle_right.dot(normal);
    let cross_z = handle_right.cross(normal).z;

    let mouse_x_multiplier = if cross_z > 0.0 {
        MOUSE_SENSITIVITY
    } else {
        -MOUSE_SENSITIVITY
    };
    let mouse_y_multiplier = if handle_right.z.abs() >= STEEP_HANDLE_Z {
        steep_multiplier
    } else if dot > 0.0 {
        -MOUSE_SENSITIVITY
    } else {
        MOUSE_SENSITIVITY
    };
    let alpha = cross_z.abs().clamp(0.0, 1.0);

    lerp(
        mouse_y_multiplier * mouse.y,
        mouse_x_multiplier * mouse.x,
        alpha,
    )
}

/// Rotation in degrees for the Z (roll) ring. Only horizontal motion turns
/// it; viewing the ring from behind its normal flips the direction.
pub fn rotate_z(ring_normal: Vec3, handle_location: Vec3, camera_location: Vec3, mouse: Vec2) -> f32 {
    let sign = if (camera_location - handle_location).dot(ring_normal) >= 0.0 {
        MOUSE_SENSITIVITY
    } else {
        -MOUSE_SENSITIVITY
    };
    sign * mouse.x
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Rotate gizmo module.
#[derive(Debug, Clone)]
pub struct RotateGizmo {
    axis: SelectedAxis,
    multiplier: AxisMultiplier,
    space: TransformSpace,
}

impl Default for RotateGizmo {
    fn default() -> Self {
        Self::new(AxisMultiplier::default(), TransformSpace::World)
    }
}

impl RotateGizmo {
    pub fn new(multiplier: AxisMultiplier, space: TransformSpace) -> Self {
        Self {
            axis: SelectedAxis::None,
            multiplier,
            space,
        }
    }

    pub fn space(&self) -> TransformSpace {
        self.space
    }

    pub fn set_space(&mut self, space: TransformSpace) {
        self.space = space;
    }
}

impl GizmoModule for RotateGizmo {
    fn mode(&self) -> GizmoMode {
        GizmoMode::Rotate
    }

    fn selected_axis(&self) -> SelectedAxis {
        self.axis
    }

    fn set_selected_axis(&mut self, axis: SelectedAxis) {
        self.axis = axis;
    }

    fn multiplier(&self) -> AxisMultiplier {
        self.multiplier
    }

    fn tick(
        &mut self,
        base: &mut GizmoBase,
        scene: &mut dyn Scene,
        frame: &FrameInput,
    ) -> TransformDelta {
        let Ok(mut transform) = gating::check("Rotate", base, scene, frame) else {
            return TransformDelta::ZERO;
        };
        let (Some(target), Some(camera)) = (base.target(), base.camera()) else {
            return TransformDelta::ZERO;
        };

        let multiplier = self.multiplier.accumulate(frame.wheel_delta);

        if self.axis.is_none() {
            return TransformDelta::ZERO;
        }

        let gizmo_rotation = match self.space {
            TransformSpace::Local => transform.rotation,
            TransformSpace::World => Quat::IDENTITY,
        };
        let degrees = match self.axis {
            SelectedAxis::Z => rotate_z(
                gizmo_rotation * self.axis.rotation_axis(),
                transform.translation,
                camera.location,
                frame.mouse_delta,
            ),
            _ => rotate_xy(
                self.axis,
                self.axis.handle_right(gizmo_rotation),
                transform.translation,
                camera.location,
                frame.mouse_delta,
            ),
        } * multiplier;

        if degrees == 0.0 || !degrees.is_finite() {
            return TransformDelta::ZERO;
        }

        let rotation = Quat::from_axis_angle(self.axis.rotation_axis(), degrees.to_radians());
        match self.space {
            TransformSpace::Local => transform.add_local_rotation(rotation),
            TransformSpace::World => transform.add_world_rotation(rotation),
        }
        scene.set_transform(target, transform);

        log::trace!("Gizmo Rotate: {:?} by {:.3}°", self.axis, degrees);

        TransformDelta {
            axis: self.axis,
            translation: Vec3::ZERO,
            rotation,
            amount: degrees,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraView;
    use crate::scene::{SceneGraph, Transform};
    use approx::assert_relative_eq;

    fn setup(axis: SelectedAxis, space: TransformSpace) -> (RotateGizmo, GizmoBase, SceneGraph) {
        let mut scene = SceneGraph::new();
        let target = scene.spawn(Transform::default());
        let mut base = GizmoBase::default();
        base.set_target(Some(target));
        base.set_camera(Some(CameraView::looking_at(
            Vec3::new(-400.0, -100.0, 300.0),
            Vec3::ZERO,
        )));
        let mut gizmo = RotateGizmo::new(AxisMultiplier::new(1.0), space);
        gizmo.set_selected_axis(axis);
        (gizmo, base, scene)
    }

    #[test]
    fn test_ring_orientation_picks_mouse_axis() {
        // Camera straight along -Y from the handle: the X handle's right (+Y)
        // points at the camera, so cross.z is 0 and only mouse Y counts.
        let handle_right = Vec3::Y;
        let camera = Vec3::new(0.0, 500.0, 0.0);
        let only_x = rotate_xy(SelectedAxis::X, handle_right, Vec3::ZERO, camera, Vec2::new(3.0, 0.0));
        let only_y = rotate_xy(SelectedAxis::X, handle_right, Vec3::ZERO, camera, Vec2::new(0.0, 3.0));
        assert_relative_eq!(only_x, 0.0);
        // dot > 0 → -5 per unit
        assert_relative_eq!(only_y, -15.0);

        // Camera along +X: right ⟂ normal, |cross.z| = 1, only mouse X counts.
        let camera = Vec3::new(500.0, 0.0, 0.0);
        let only_x = rotate_xy(SelectedAxis::X, handle_right, Vec3::ZERO, camera, Vec2::new(3.0, 0.0));
        let only_y = rotate_xy(SelectedAxis::X, handle_right, Vec3::ZERO, camera, Vec2::new(0.0, 3.0));
        // Y × X = -Z → cross.z < 0 → -5
        assert_relative_eq!(only_x, -15.0);
        assert_relative_eq!(only_y, 0.0);
    }

    #[test]
    fn test_blend_between_mouse_axes() {
        let handle_right = Vec3::Y;
        let camera = Vec3::new(500.0, 500.0, 0.0);
        let alpha = std::f32::consts::FRAC_1_SQRT_2;
        let value = rotate_xy(SelectedAxis::X, handle_right, Vec3::ZERO, camera, Vec2::new(2.0, 0.0));
        assert_relative_eq!(value, -10.0 * alpha, epsilon = 1e-4);

        let value = rotate_xy(SelectedAxis::X, handle_right, Vec3::ZERO, camera, Vec2::new(0.0, 2.0));
        assert_relative_eq!(value, -10.0 * (1.0 - alpha), epsilon = 1e-4);
    }

    #[test]
    fn test_steep_handle_uses_axis_specific_sign() {
        let camera = Vec3::new(0.0, 500.0, 0.0);
        let steep_up = Vec3::new(0.0, 0.5, 0.8).normalize();
        let x = rotate_xy(SelectedAxis::X, steep_up, Vec3::ZERO, camera, Vec2::new(0.0, 1.0));
        let y = rotate_xy(SelectedAxis::Y, steep_up, Vec3::ZERO, camera, Vec2::new(0.0, 1.0));
        assert!(x > 0.0);
        assert!(y < 0.0);

        let steep_down = Vec3::new(0.0, 0.5, -0.8).normalize();
        let x = rotate_xy(SelectedAxis::X, steep_down, Vec3::ZERO, camera, Vec2::new(0.0, 1.0));
        assert!(x < 0.0);
    }

    #[test]
    fn test_z_ring_flips_behind() {
        let front = rotate_z(Vec3::X, Vec3::ZERO, Vec3::new(10.0, 0.0, 3.0), Vec2::new(2.0, 7.0));
        let behind = rotate_z(Vec3::X, Vec3::ZERO, Vec3::new(-10.0, 0.0, 3.0), Vec2::new(2.0, 7.0));
        assert_relative_eq!(front, 10.0);
        assert_relative_eq!(behind, -10.0);
        assert_eq!(rotate_xy(SelectedAxis::Z, Vec3::Y, Vec3::ZERO, Vec3::X, Vec2::ONE), 0.0);
    }

    #[test]
    fn test_none_axis_is_zero() {
        let value = rotate_xy(SelectedAxis::None, Vec3::Y, Vec3::ZERO, Vec3::X, Vec2::ONE);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_tick_applies_single_axis_rotation() {
        let (mut gizmo, mut base, mut scene) = setup(SelectedAxis::Z, TransformSpace::World);
        let target = base.target().unwrap();

        // Camera sits on the -X side of the roll ring
        let delta = gizmo.tick(&mut base, &mut scene, &FrameInput::mouse(2.0, 0.0));
        assert_relative_eq!(delta.amount, -10.0);

        let rotation = scene.transform(target).unwrap().rotation;
        let expected = Quat::from_rotation_x((-10f32).to_radians());
        assert!(rotation.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_tick_zero_when_gated() {
        let (mut gizmo, mut base, mut scene) = setup(SelectedAxis::X, TransformSpace::Local);
        let target = base.target().unwrap();

        // No movement
        assert!(gizmo.tick(&mut base, &mut scene, &FrameInput::default()).is_zero());

        // Forbidden key
        base.key_pressed("RightMouseButton");
        assert!(gizmo
            .tick(&mut base, &mut scene, &FrameInput::mouse(5.0, 5.0))
            .is_zero());
        base.key_released("RightMouseButton");

        // Out of view
        let camera = *base.camera().unwrap();
        base.set_camera(Some(CameraView::new(camera.location, Quat::from_rotation_z(180f32.to_radians()) * camera.rotation)));
        assert!(gizmo
            .tick(&mut base, &mut scene, &FrameInput::mouse(5.0, 5.0))
            .is_zero());
        base.set_camera(Some(camera));

        // Invalid target
        scene.despawn(target);
        assert!(gizmo
            .tick(&mut base, &mut scene, &FrameInput::mouse(5.0, 5.0))
            .is_zero());
    }

    #[test]
    fn test_gated_tick_leaves_target_untouched() {
        let (mut gizmo, mut base, mut scene) = setup(SelectedAxis::X, TransformSpace::Local);
        let target = base.target().unwrap();
        base.key_pressed("RightMouseButton");
        gizmo.tick(&mut base, &mut scene, &FrameInput::mouse(5.0, 5.0).with_wheel(3.0));
        assert_eq!(scene.transform(target).unwrap(), Transform::default());
        // Wheel input is ignored while gated
        assert_eq!(gizmo.multiplier().value(), 1.0);
    }

    #[test]
    fn test_wheel_scales_rotation_and_floors() {
        let (mut gizmo, mut base, mut scene) = setup(SelectedAxis::Z, TransformSpace::World);

        let delta = gizmo.tick(&mut base, &mut scene, &FrameInput::mouse(1.0, 0.0).with_wheel(2.0));
        assert_relative_eq!(delta.amount, -15.0);

        for _ in 0..10 {
            gizmo.tick(&mut base, &mut scene, &FrameInput::mouse(1.0, 0.0).with_wheel(-1.0));
            assert!(gizmo.multiplier().value() >= 1.0);
        }
        let delta = gizmo.tick(&mut base, &mut scene, &FrameInput::mouse(1.0, 0.0));
        assert_relative_eq!(delta.amount, -5.0);
    }

    #[test]
    fn test_local_rotation_follows_target_axis() {
        let (mut gizmo, mut base, mut scene) = setup(SelectedAxis::X, TransformSpace::Local);
        let target = base.target().unwrap();
        let yawed = Transform::default().with_rotation(Quat::from_rotation_z(90f32.to_radians()));
        scene.set_transform(target, yawed);

        let delta = gizmo.tick(&mut base, &mut scene, &FrameInput::mouse(4.0, 4.0));
        assert!(!delta.is_zero());

        // Pitching about its own Y keeps the target's right (world -X) fixed
        let rotation = scene.transform(target).unwrap().rotation;
        assert!((rotation * Vec3::Y).abs_diff_eq(Vec3::NEG_X, 1e-4));
        assert!(!(rotation * Vec3::X).abs_diff_eq(Vec3::Y, 1e-2));
    }

    #[test]
    fn test_each_ring_turns_about_its_own_axis() {
        for (axis, expected) in [
            (SelectedAxis::X, Vec3::Y),
            (SelectedAxis::Y, Vec3::Z),
            (SelectedAxis::Z, Vec3::X),
        ] {
            let (mut gizmo, mut base, mut scene) = setup(axis, TransformSpace::World);
            let target = base.target().unwrap();

            let delta = gizmo.tick(&mut base, &mut scene, &FrameInput::mouse(4.0, 4.0));
            assert!(!delta.is_zero(), "{:?} did not rotate", axis);

            let (turned_about, _) = delta.rotation.to_axis_angle();
            assert!(
                turned_about.cross(expected).length() < 1e-4,
                "{:?} turned about {:?}",
                axis,
                turned_about
            );
            let rotation = scene.transform(target).unwrap().rotation;
            assert!((rotation * expected).abs_diff_eq(expected, 1e-4));
        }
    }

    #[test]
    fn test_default_applies_world_delta() {
        let mut scene = SceneGraph::new();
        let yaw = Quat::from_rotation_z(90f32.to_radians());
        let target = scene.spawn(Transform::default().with_rotation(yaw));
        let mut base = GizmoBase::default();
        base.set_target(Some(target));
        base.set_camera(Some(CameraView::looking_at(
            Vec3::new(-400.0, -100.0, 300.0),
            Vec3::ZERO,
        )));
        let mut gizmo = RotateGizmo::default();
        assert_eq!(gizmo.space(), TransformSpace::World);
        gizmo.set_selected_axis(SelectedAxis::X);

        let delta = gizmo.tick(&mut base, &mut scene, &FrameInput::mouse(2.0, 2.0));
        assert!(!delta.is_zero());

        let rotation = scene.transform(target).unwrap().rotation;
        assert!(rotation.abs_diff_eq((delta.rotation * yaw).normalize(), 1e-5));
        assert!(!rotation.abs_diff_eq((yaw * delta.rotation).normalize(), 1e-3));
    }
}
