//! Move module.
//!
//! Projects the selected axis onto the screen and moves the target by the
//! component of the mouse motion that runs along it.

use crate::axis::{AxisMultiplier, SelectedAxis, TransformSpace};
use crate::base::GizmoBase;
use crate::camera::{CameraView, FrameInput};
use crate::gating;
use crate::scene::Scene;
use crate::state::{GizmoMode, GizmoModule, TransformDelta};
use glam::{Quat, Vec2, Vec3};

/// Screen-space length below which an axis is pointing into the screen.
const MIN_SCREEN_AXIS: f32 = 1e-3;

/// Direction the world axis takes on screen (X right, Y up), or `None`
/// when the axis points straight at or away from the camera.
pub fn screen_axis(axis_world: Vec3, camera: &CameraView) -> Option<Vec2> {
    let projected = Vec2::new(axis_world.dot(camera.right()), axis_world.dot(camera.up()));
    let len = projected.length();
    (len > MIN_SCREEN_AXIS).then(|| projected / len)
}

/// Move gizmo module.
#[derive(Debug, Clone)]
pub struct MoveGizmo {
    axis: SelectedAxis,
    multiplier: AxisMultiplier,
    space: TransformSpace,
}

impl Default for MoveGizmo {
    fn default() -> Self {
        Self::new(AxisMultiplier::default(), TransformSpace::Local)
    }
}

impl MoveGizmo {
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

    /// World direction the selected axis points in for a target rotation.
    pub fn axis_direction(&self, target_rotation: Quat) -> Vec3 {
        match self.space {
            TransformSpace::Local => target_rotation * self.axis.unit(),
            TransformSpace::World => self.axis.unit(),
        }
    }
}

impl GizmoModule for MoveGizmo {
    fn mode(&self) -> GizmoMode {
        GizmoMode::Move
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
        let Ok(mut transform) = gating::check("Move", base, scene, frame) else {
            return TransformDelta::ZERO;
        };
        let (Some(target), Some(camera)) = (base.target(), base.camera().copied()) else {
            return TransformDelta::ZERO;
        };

        let multiplier = self.multiplier.accumulate(frame.wheel_delta);

        if self.axis.is_none() {
            return TransformDelta::ZERO;
        }

        let direction = self.axis_direction(transform.rotation);
        let Some(on_screen) = screen_axis(direction, &camera) else {
            log::trace!("Gizmo Move: {:?} axis faces the camera", self.axis);
            return TransformDelta::ZERO;
        };

        let distance = frame.mouse_delta.dot(on_screen) * multiplier;
        if distance == 0.0 || !distance.is_finite() {
            return TransformDelta::ZERO;
        }

        let offset = direction * distance;
        transform.add_world_offset(offset);
        scene.set_transform(target, transform);
        base.track_target(scene);

        log::trace!("Gizmo Move: {:?} by {:.3}", self.axis, distance);

        TransformDelta {
            axis: self.axis,
            translation: offset,
            rotation: Quat::IDENTITY,
            amount: distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneGraph, Transform};
    use approx::assert_relative_eq;

    /// Camera behind the origin on -X, looking along +X: world Y is screen
    /// right, world Z is screen up, world X points into the screen.
    fn front_camera() -> CameraView {
        CameraView::looking_at(Vec3::new(-500.0, 0.0, 0.0), Vec3::ZERO)
    }

    fn setup(axis: SelectedAxis, space: TransformSpace) -> (MoveGizmo, GizmoBase, SceneGraph) {
        let mut scene = SceneGraph::new();
        let target = scene.spawn(Transform::default());
        let mut base = GizmoBase::default();
        base.set_target(Some(target));
        base.set_camera(Some(front_camera()));
        let mut gizmo = MoveGizmo::new(AxisMultiplier::new(2.0), space);
        gizmo.set_selected_axis(axis);
        (gizmo, base, scene)
    }

    #[test]
    fn test_screen_axis() {
        let camera = front_camera();
        assert!(screen_axis(Vec3::Y, &camera).unwrap().abs_diff_eq(Vec2::X, 1e-5));
        assert!(screen_axis(Vec3::Z, &camera).unwrap().abs_diff_eq(Vec2::Y, 1e-5));
        assert!(screen_axis(Vec3::X, &camera).is_none());
    }

    #[test]
    fn test_moves_along_screen_aligned_axis() {
        let (mut gizmo, mut base, mut scene) = setup(SelectedAxis::Y, TransformSpace::World);
        let target = base.target().unwrap();

        // Vertical motion has no component along a horizontal axis
        assert!(gizmo
            .tick(&mut base, &mut scene, &FrameInput::mouse(0.0, 4.0))
            .is_zero());

        let delta = gizmo.tick(&mut base, &mut scene, &FrameInput::mouse(3.0, 4.0));
        assert_relative_eq!(delta.amount, 6.0, epsilon = 1e-4);
        let moved = scene.transform(target).unwrap().translation;
        assert!(moved.abs_diff_eq(Vec3::new(0.0, 6.0, 0.0), 1e-3));
        assert_eq!(base.location(), moved);
    }

    #[test]
    fn test_axis_into_screen_does_not_move() {
        let (mut gizmo, mut base, mut scene) = setup(SelectedAxis::X, TransformSpace::World);
        let delta = gizmo.tick(&mut base, &mut scene, &FrameInput::mouse(10.0, 10.0));
        assert!(delta.is_zero());
    }

    #[test]
    fn test_local_axis_follows_target_rotation() {
        let (mut gizmo, mut base, mut scene) = setup(SelectedAxis::X, TransformSpace::Local);
        let target = base.target().unwrap();
        // Yaw 90°: the target's X now points along world Y, which is screen right
        let yawed = Transform::default().with_rotation(Quat::from_rotation_z(90f32.to_radians()));
        scene.set_transform(target, yawed);

        let delta = gizmo.tick(&mut base, &mut scene, &FrameInput::mouse(-1.0, 0.0));
        assert!(delta.translation.abs_diff_eq(Vec3::new(0.0, -2.0, 0.0), 1e-4));
    }

    #[test]
    fn test_zero_when_gated() {
        let (mut gizmo, mut base, mut scene) = setup(SelectedAxis::Z, TransformSpace::World);
        let target = base.target().unwrap();
        base.key_pressed("RightMouseButton");

        let delta = gizmo.tick(&mut base, &mut scene, &FrameInput::mouse(0.0, 5.0));
        assert!(delta.is_zero());
        assert_eq!(scene.transform(target).unwrap().translation, Vec3::ZERO);
    }
}
