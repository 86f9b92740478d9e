//! Host scene access.
//!
//! The gizmo never owns what it manipulates. It keeps a [`TargetId`] and
//! asks the host [`Scene`] for the current transform each tick; a lookup
//! that fails means the target is no longer valid.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Non-owning reference to a scene object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", self.0)
    }
}

/// World transform of a scene object
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Rotate about a world-space axis.
    pub fn add_world_rotation(&mut self, delta: Quat) {
        self.rotation = (delta * self.rotation).normalize();
    }

    /// Rotate about an axis expressed in the object's own frame.
    pub fn add_local_rotation(&mut self, delta: Quat) {
        self.rotation = (self.rotation * delta).normalize();
    }

    pub fn add_world_offset(&mut self, offset: Vec3) {
        self.translation += offset;
    }
}

/// Scene objects the host exposes to the gizmo
pub trait Scene {
    /// Current transform, `None` if the target is invalid
    fn transform(&self, id: TargetId) -> Option<Transform>;

    /// Overwrite the transform, returns false if the target is invalid
    fn set_transform(&mut self, id: TargetId, transform: Transform) -> bool;

    fn is_valid(&self, id: TargetId) -> bool {
        self.transform(id).is_some()
    }
}

/// Flat in-memory scene
#[derive(Debug, Default)]
pub struct SceneGraph {
    objects: HashMap<TargetId, Transform>,
    next_id: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, transform: Transform) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, transform);
        id
    }

    pub fn despawn(&mut self, id: TargetId) -> Option<Transform> {
        self.objects.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Scene for SceneGraph {
    fn transform(&self, id: TargetId) -> Option<Transform> {
        self.objects.get(&id).copied()
    }

    fn set_transform(&mut self, id: TargetId, transform: Transform) -> bool {
        match self.objects.get_mut(&id) {
            Some(slot) => {
                *slot = transform;
                true
            }
            None => false,
        }
    }
}
