//! Gizmo base.
//!
//! Shared state every interaction module reads: the player camera, the
//! target, held keys, and where the gizmo sits. Also answers the
//! movement/view/forbidden-key queries the gating chain is built from.

use crate::camera::{CameraView, FrameInput};
use crate::config::GizmoConfig;
use crate::scene::{Scene, TargetId, Transform};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Named input key, e.g. `"LeftAlt"` or `"RightMouseButton"`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key(pub String);

impl Key {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// State shared by the move and rotate modules.
#[derive(Debug, Clone)]
pub struct GizmoBase {
    camera: Option<CameraView>,
    pawn_location: Option<Vec3>,
    target: Option<TargetId>,
    pressed_keys: HashSet<Key>,
    forbidden_keys: HashSet<Key>,
    location: Vec3,
    size_divisor: f32,
    view_cone_threshold: f32,
    debug_mode: bool,
}

impl Default for GizmoBase {
    fn default() -> Self {
        Self::new(&GizmoConfig::default())
    }
}

impl GizmoBase {
    pub fn new(config: &GizmoConfig) -> Self {
        Self {
            camera: None,
            pawn_location: None,
            target: None,
            pressed_keys: HashSet::new(),
            forbidden_keys: config.forbidden_keys.iter().map(Key::new).collect(),
            location: Vec3::ZERO,
            size_divisor: config.size_divisor,
            view_cone_threshold: config.view_cone_threshold,
            debug_mode: config.debug_mode,
        }
    }

    // ==================== Collaborators ====================

    /// Bind (or clear) the player camera.
    pub fn set_camera(&mut self, camera: Option<CameraView>) {
        if camera.is_none() && self.camera.is_some() {
            log::warn!("Gizmo camera cleared; interaction is disabled until a camera is set");
        }
        self.camera = camera;
    }

    pub fn camera(&self) -> Option<&CameraView> {
        self.camera.as_ref()
    }

    /// Location of the player pawn, used to keep the gizmo a constant screen size.
    pub fn set_pawn_location(&mut self, location: Option<Vec3>) {
        self.pawn_location = location;
    }

    pub fn set_target(&mut self, target: Option<TargetId>) {
        self.target = target;
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    /// The target's transform, if it is still valid.
    pub fn target_transform(&self, scene: &dyn Scene) -> Option<Transform> {
        self.target.and_then(|id| scene.transform(id))
    }

    pub fn location(&self) -> Vec3 {
        self.location
    }

    pub fn set_location(&mut self, location: Vec3) {
        self.location = location;
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn set_debug_mode(&mut self, debug_mode: bool) {
        self.debug_mode = debug_mode;
    }

    // ==================== Keys ====================

    pub fn key_pressed(&mut self, key: impl Into<Key>) {
        self.pressed_keys.insert(key.into());
    }

    pub fn key_released(&mut self, key: impl Into<Key>) {
        self.pressed_keys.remove(&key.into());
    }

    pub fn is_key_pressed(&self, key: &Key) -> bool {
        self.pressed_keys.contains(key)
    }

    pub fn add_forbidden_key(&mut self, key: impl Into<Key>) {
        self.forbidden_keys.insert(key.into());
    }

    pub fn remove_forbidden_key(&mut self, key: impl Into<Key>) {
        self.forbidden_keys.remove(&key.into());
    }

    /// True while any forbidden key is held.
    pub fn forbidden_key_pressed(&self) -> bool {
        self.pressed_keys
            .iter()
            .any(|key| self.forbidden_keys.contains(key))
    }

    // ==================== Queries ====================

    /// True when the mouse moved this frame.
    pub fn detect_movement(&self, frame: &FrameInput) -> bool {
        frame.has_mouse_movement()
    }

    /// Target lies inside the camera's view cone.
    pub fn is_gizmo_in_view(&self, scene: &dyn Scene) -> bool {
        let (Some(camera), Some(target)) = (self.camera.as_ref(), self.target_transform(scene))
        else {
            return false;
        };
        camera.forward().dot(camera.direction_to(target.translation)) > self.view_cone_threshold
    }

    /// World scale for the gizmo so it keeps a steady on-screen size.
    pub fn gizmo_scale(&self) -> f32 {
        match self.pawn_location {
            Some(pawn) => pawn.distance(self.location) / self.size_divisor,
            None => 1.0,
        }
    }

    /// Snap the gizmo to its target. Returns false if the target is invalid.
    pub fn track_target(&mut self, scene: &dyn Scene) -> bool {
        match self.target_transform(scene) {
            Some(transform) => {
                self.location = transform.translation;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneGraph;
    use glam::Quat;

    fn base_with_target() -> (GizmoBase, SceneGraph) {
        let mut scene = SceneGraph::new();
        let target = scene.spawn(Transform::from_translation(Vec3::new(100.0, 0.0, 0.0)));
        let mut base = GizmoBase::default();
        base.set_target(Some(target));
        base.set_camera(Some(CameraView::looking_at(Vec3::ZERO, Vec3::X)));
        (base, scene)
    }

    #[test]
    fn test_key_press_and_release() {
        let mut base = GizmoBase::default();
        base.add_forbidden_key("LeftAlt");

        base.key_pressed("W");
        assert!(!base.forbidden_key_pressed());

        base.key_pressed("LeftAlt");
        assert!(base.forbidden_key_pressed());

        base.key_released("LeftAlt");
        assert!(!base.forbidden_key_pressed());
        assert!(base.is_key_pressed(&Key::new("W")));
    }

    #[test]
    fn test_default_forbidden_keys_from_config() {
        let mut base = GizmoBase::default();
        base.key_pressed("RightMouseButton");
        assert!(base.forbidden_key_pressed());
    }

    #[test]
    fn test_in_view_cone() {
        let (mut base, scene) = base_with_target();
        assert!(base.is_gizmo_in_view(&scene));

        let yaw = Quat::from_rotation_z(61f32.to_radians());
        base.set_camera(Some(CameraView::new(Vec3::ZERO, yaw)));
        assert!(!base.is_gizmo_in_view(&scene));

        base.set_camera(Some(CameraView::new(Vec3::ZERO, Quat::from_rotation_z(45f32.to_radians()))));
        assert!(base.is_gizmo_in_view(&scene));
    }

    #[test]
    fn test_not_in_view_without_camera_or_target() {
        let (base, mut scene) = base_with_target();
        scene.despawn(base.target().unwrap());
        assert!(!base.is_gizmo_in_view(&scene));

        let (mut base, scene) = base_with_target();
        base.set_camera(None);
        assert!(!base.is_gizmo_in_view(&scene));
    }

    #[test]
    fn test_camera_on_target_is_not_in_view() {
        let (mut base, scene) = base_with_target();
        base.set_camera(Some(CameraView::new(Vec3::new(100.0, 0.0, 0.0), Quat::IDENTITY)));
        assert!(!base.is_gizmo_in_view(&scene));
    }

    #[test]
    fn test_gizmo_scale_and_tracking() {
        let (mut base, scene) = base_with_target();
        assert_eq!(base.gizmo_scale(), 1.0);

        assert!(base.track_target(&scene));
        assert_eq!(base.location(), Vec3::new(100.0, 0.0, 0.0));

        base.set_pawn_location(Some(Vec3::new(100.0, 0.0, 1000.0)));
        approx::assert_relative_eq!(base.gizmo_scale(), 2.0);
    }
}
