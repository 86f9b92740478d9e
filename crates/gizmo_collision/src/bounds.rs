//! Bounding volumes for corner lists

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box around `points`, `None` when empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(*first, *first), |aabb, p| {
            Self::new(aabb.min.min(*p), aabb.max.max(*p))
        }))
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
        ]
    }

    /// Box around this box after transformation.
    pub fn transformed(&self, transform: &Affine3A) -> Self {
        let corners = self.corners().map(|c| transform.transform_point3(c));
        // Eight points: never empty
        Self::from_points(&corners).unwrap_or(*self)
    }
}

/// Box and sphere bounds of a component in world space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub origin: Vec3,
    pub box_extent: Vec3,
    pub sphere_radius: f32,
}

impl Bounds {
    pub const ZERO: Self = Self {
        origin: Vec3::ZERO,
        box_extent: Vec3::ZERO,
        sphere_radius: 0.0,
    };

    pub fn from_aabb(aabb: &Aabb) -> Self {
        let box_extent = aabb.half_extents();
        Self {
            origin: aabb.center(),
            box_extent,
            sphere_radius: box_extent.length(),
        }
    }

    /// World bounds of local-space `points`, zero-sized at the transform's
    /// origin when there are no points.
    pub fn from_local_points(points: &[Vec3], local_to_world: &Affine3A) -> Self {
        match Aabb::from_points(points) {
            Some(local) => Self::from_aabb(&local.transformed(local_to_world)),
            None => Self {
                origin: local_to_world.translation.into(),
                ..Self::ZERO
            },
        }
    }
}
