//! Collision world - the Rapier state collision volumes register into

use crate::bounds::Aabb;
use crate::error::{CollisionError, Result};
use glam::{Quat, Vec3};
use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Handle to a collider in the collision world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub(crate) rapier::ColliderHandle);

impl ColliderHandle {
    /// Get the raw Rapier handle
    pub fn raw(&self) -> rapier::ColliderHandle {
        self.0
    }
}

/// Which parts of the simulation a collider takes part in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionEnabled {
    /// Ignored by queries and contacts
    NoCollision,
    /// Hit by queries, generates no contact response
    QueryOnly,
    /// Hit by queries and collides
    #[default]
    QueryAndPhysics,
}

/// Result of a ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub collider: ColliderHandle,
    pub point: Vec3,
    pub distance: f32,
    pub user_data: u128,
}

/// Minimal Rapier world for collision volumes
pub struct CollisionWorld {
    bodies: rapier::RigidBodySet,
    colliders: rapier::ColliderSet,
    islands: rapier::IslandManager,
    query_pipeline: rapier::QueryPipeline,
    /// Query pipeline is behind the collider set
    query_dirty: bool,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self {
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            islands: rapier::IslandManager::new(),
            query_pipeline: rapier::QueryPipeline::new(),
            query_dirty: false,
        }
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.colliders.contains(handle.0)
    }

    /// Insert a free-standing collider
    pub fn insert(
        &mut self,
        shape: rapier::SharedShape,
        translation: Vec3,
        rotation: Quat,
        enabled: CollisionEnabled,
        user_data: u128,
    ) -> ColliderHandle {
        let builder = rapier::ColliderBuilder::new(shape)
            .position(to_isometry(translation, rotation))
            .user_data(user_data);
        let mut collider: rapier::Collider = builder.build();
        apply_enabled(&mut collider, enabled);

        let handle = self.colliders.insert(collider);
        self.query_dirty = true;
        log::debug!("Inserted collider {:?}", handle);
        ColliderHandle(handle)
    }

    /// Remove a collider, returns false if it was already gone
    pub fn remove(&mut self, handle: ColliderHandle) -> bool {
        let removed = self
            .colliders
            .remove(handle.0, &mut self.islands, &mut self.bodies, true)
            .is_some();
        self.query_dirty |= removed;
        removed
    }

    /// Swap the shape of an existing collider in place
    pub fn replace_shape(&mut self, handle: ColliderHandle, shape: rapier::SharedShape) -> Result<()> {
        let collider = self.collider_mut(handle)?;
        collider.set_shape(shape);
        self.query_dirty = true;
        Ok(())
    }

    pub fn set_collision_enabled(&mut self, handle: ColliderHandle, enabled: CollisionEnabled) -> Result<()> {
        let collider = self.collider_mut(handle)?;
        apply_enabled(collider, enabled);
        self.query_dirty = true;
        Ok(())
    }

    pub fn collision_enabled(&self, handle: ColliderHandle) -> Option<CollisionEnabled> {
        self.colliders.get(handle.0).map(|c| {
            if !c.is_enabled() {
                CollisionEnabled::NoCollision
            } else if c.is_sensor() {
                CollisionEnabled::QueryOnly
            } else {
                CollisionEnabled::QueryAndPhysics
            }
        })
    }

    pub fn set_pose(&mut self, handle: ColliderHandle, translation: Vec3, rotation: Quat) -> Result<()> {
        let collider = self.collider_mut(handle)?;
        collider.set_position(to_isometry(translation, rotation));
        self.query_dirty = true;
        Ok(())
    }

    /// World-space box of a collider
    pub fn aabb(&self, handle: ColliderHandle) -> Option<Aabb> {
        self.colliders.get(handle.0).map(|c| {
            let aabb = c.compute_aabb();
            Aabb::new(
                Vec3::new(aabb.mins.x, aabb.mins.y, aabb.mins.z),
                Vec3::new(aabb.maxs.x, aabb.maxs.y, aabb.maxs.z),
            )
        })
    }

    /// Cast a ray and return the closest hit
    pub fn cast_ray(&mut self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self.sync_query_pipeline();

        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        let ray = rapier::Ray::new(
            rapier::Point::new(origin.x, origin.y, origin.z),
            rapier::Vector::new(direction.x, direction.y, direction.z),
        );

        let enabled_only = |_: rapier::ColliderHandle, collider: &rapier::Collider| collider.is_enabled();
        let filter = rapier::QueryFilter::new().predicate(&enabled_only);

        self.query_pipeline
            .cast_ray(&self.bodies, &self.colliders, &ray, max_distance, true, filter)
            .and_then(|(handle, toi)| {
                let collider = self.colliders.get(handle)?;
                let point = ray.point_at(toi);
                Some(RayHit {
                    collider: ColliderHandle(handle),
                    point: Vec3::new(point.x, point.y, point.z),
                    distance: toi,
                    user_data: collider.user_data,
                })
            })
    }

    fn sync_query_pipeline(&mut self) {
        if self.query_dirty {
            self.query_pipeline.update(&self.colliders);
            self.query_dirty = false;
        }
    }

    fn collider_mut(&mut self, handle: ColliderHandle) -> Result<&mut rapier::Collider> {
        self.colliders
            .get_mut(handle.0)
            .ok_or(CollisionError::ColliderNotFound(handle))
    }
}

fn apply_enabled(collider: &mut rapier::Collider, enabled: CollisionEnabled) {
    collider.set_enabled(enabled != CollisionEnabled::NoCollision);
    collider.set_sensor(enabled == CollisionEnabled::QueryOnly);
}

fn to_isometry(translation: Vec3, rotation: Quat) -> rapier::Isometry<rapier::Real> {
    rapier::Isometry::from_parts(
        rapier::Translation::new(translation.x, translation.y, translation.z),
        UnitQuaternion::from_quaternion(Quaternion::new(rotation.w, rotation.x, rotation.y, rotation.z)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cube() -> rapier::SharedShape {
        rapier::SharedShape::cuboid(1.0, 1.0, 1.0)
    }

    #[test]
    fn test_insert_and_remove() {
        let mut world = CollisionWorld::new();
        let handle = world.insert(cube(), Vec3::ZERO, Quat::IDENTITY, CollisionEnabled::QueryAndPhysics, 7);
        assert_eq!(world.collider_count(), 1);
        assert!(world.contains(handle));

        assert!(world.remove(handle));
        assert!(!world.remove(handle));
        assert_eq!(world.collider_count(), 0);
        assert!(matches!(
            world.replace_shape(handle, cube()),
            Err(CollisionError::ColliderNotFound(_))
        ));
    }

    #[test]
    fn test_ray_hits_and_respects_enabled() {
        let mut world = CollisionWorld::new();
        let handle = world.insert(
            cube(),
            Vec3::new(10.0, 0.0, 0.0),
            Quat::IDENTITY,
            CollisionEnabled::QueryAndPhysics,
            42,
        );

        let hit = world.cast_ray(Vec3::ZERO, Vec3::X, 100.0).unwrap();
        assert_eq!(hit.collider, handle);
        assert_eq!(hit.user_data, 42);
        assert_relative_eq!(hit.distance, 9.0, epsilon = 1e-4);
        assert!(hit.point.abs_diff_eq(Vec3::new(9.0, 0.0, 0.0), 1e-4));

        world.set_collision_enabled(handle, CollisionEnabled::QueryOnly).unwrap();
        assert_eq!(world.collision_enabled(handle), Some(CollisionEnabled::QueryOnly));
        assert!(world.cast_ray(Vec3::ZERO, Vec3::X, 100.0).is_some());

        world.set_collision_enabled(handle, CollisionEnabled::NoCollision).unwrap();
        assert!(world.cast_ray(Vec3::ZERO, Vec3::X, 100.0).is_none());
    }

    #[test]
    fn test_replace_shape_updates_queries() {
        let mut world = CollisionWorld::new();
        let handle = world.insert(
            cube(),
            Vec3::new(10.0, 0.0, 0.0),
            Quat::IDENTITY,
            CollisionEnabled::QueryAndPhysics,
            0,
        );
        world.replace_shape(handle, rapier::SharedShape::cuboid(5.0, 1.0, 1.0)).unwrap();

        let hit = world.cast_ray(Vec3::ZERO, Vec3::X, 100.0).unwrap();
        assert_relative_eq!(hit.distance, 5.0, epsilon = 1e-4);
        let aabb = world.aabb(handle).unwrap();
        assert_relative_eq!(aabb.max.x, 15.0, epsilon = 1e-4);
    }

    #[test]
    fn test_set_pose() {
        let mut world = CollisionWorld::new();
        let handle = world.insert(cube(), Vec3::ZERO, Quat::IDENTITY, CollisionEnabled::QueryAndPhysics, 0);
        world.set_pose(handle, Vec3::new(0.0, 0.0, 20.0), Quat::IDENTITY).unwrap();
        assert!(world.cast_ray(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, 100.0).is_none());
        assert!(world.cast_ray(Vec3::new(-5.0, 0.0, 20.0), Vec3::X, 100.0).is_some());
    }
}
