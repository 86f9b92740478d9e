//! Corner lists.
//!
//! A collision volume is described by its corner points. Box volumes use a
//! fixed winding:
//!
//! ```text
//!        7 ─────── 6          0: (-X, -Y, -Z)   4: (-X, -Y, +Z)
//!       ╱│        ╱│          1: (+X, -Y, -Z)   5: (+X, -Y, +Z)
//!      4 ─────── 5 │          2: (+X, +Y, -Z)   6: (+X, +Y, +Z)
//!      │ 3 ──────│─ 2         3: (-X, +Y, -Z)   7: (-X, +Y, +Z)
//!      │╱        │╱
//!      0 ─────── 1
//! ```

use crate::error::{CollisionError, Result};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// The 12 edges of a box in [`box_corners`] order: bottom ring, top ring,
/// then the verticals.
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Default half extents for new volumes (a 100-unit cube).
pub const DEFAULT_HALF_EXTENTS: Vec3 = Vec3::new(50.0, 50.0, 50.0);

/// Eight box corners from half extents.
pub fn box_corners(half_extents: Vec3) -> [Vec3; 8] {
    let Vec3 { x, y, z } = half_extents;
    [
        Vec3::new(-x, -y, -z),
        Vec3::new(x, -y, -z),
        Vec3::new(x, y, -z),
        Vec3::new(-x, y, -z),
        Vec3::new(-x, -y, z),
        Vec3::new(x, -y, z),
        Vec3::new(x, y, z),
        Vec3::new(-x, y, z),
    ]
}

/// Four base corners on the Z=0 plane plus an apex at `height`.
pub fn pyramid_corners(height: f32, base_size: Vec2) -> Result<Vec<Vec3>> {
    if !(height > 0.0 && base_size.x > 0.0 && base_size.y > 0.0) {
        return Err(CollisionError::InvalidDimensions(format!(
            "pyramid height {} and base {:?} must be positive",
            height, base_size
        )));
    }

    let half = base_size * 0.5;
    Ok(vec![
        Vec3::new(-half.x, -half.y, 0.0),
        Vec3::new(half.x, -half.y, 0.0),
        Vec3::new(half.x, half.y, 0.0),
        Vec3::new(-half.x, half.y, 0.0),
        Vec3::new(0.0, 0.0, height),
    ])
}

/// How a corner list is interpreted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerConvention {
    /// Two parallel faces with matching vertex counts (prisms, boxes)
    #[default]
    ParallelFaces,
    /// Any convex point cloud (pyramids, wedges)
    Generalized,
}

impl CornerConvention {
    pub fn min_count(self) -> usize {
        match self {
            CornerConvention::ParallelFaces => 6,
            CornerConvention::Generalized => 4,
        }
    }

    /// Check count, parity, finiteness and that the points enclose a volume.
    pub fn validate(self, corners: &[Vec3]) -> Result<()> {
        let count = corners.len();
        let min = self.min_count();
        if count < min {
            return Err(CollisionError::TooFewCorners { count, min });
        }
        if self == CornerConvention::ParallelFaces && count % 2 != 0 {
            return Err(CollisionError::OddCornerCount(count));
        }
        if let Some(index) = corners.iter().position(|c| !c.is_finite()) {
            return Err(CollisionError::NonFiniteCorner(index));
        }
        if !spans_volume(corners) {
            return Err(CollisionError::Degenerate);
        }
        Ok(())
    }
}

/// True if the points are not all on one plane.
pub fn spans_volume(points: &[Vec3]) -> bool {
    let Some(&origin) = points.first() else {
        return false;
    };

    let Some(far) = max_by(points, |p| (*p - origin).length_squared()) else {
        return false;
    };
    let edge = far - origin;
    let scale = edge.length();
    if scale <= f32::EPSILON {
        return false;
    }
    let eps = scale * 1e-5;

    let Some(side) = max_by(points, |p| (*p - origin).cross(edge).length_squared()) else {
        return false;
    };
    let normal = (side - origin).cross(edge);
    if normal.length() <= eps * scale {
        return false;
    }
    let normal = normal.normalize();

    points
        .iter()
        .any(|p| (*p - origin).dot(normal).abs() > eps)
}

fn max_by(points: &[Vec3], key: impl Fn(&Vec3) -> f32) -> Option<Vec3> {
    points
        .iter()
        .copied()
        .max_by(|a, b| key(a).total_cmp(&key(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_winding() {
        let extents = [
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::splat(50.0),
            Vec3::new(0.001, 0.002, 0.003),
            Vec3::new(1e5, 2e4, 3e3),
            Vec3::new(0.5, 100.0, 7.0),
        ];
        for half in extents {
            let corners = box_corners(half);

            // Bottom face on -Z, top face on +Z, same XY order on both
            for i in 0..4 {
                assert_eq!(corners[i].z, -half.z);
                assert_eq!(corners[i + 4].z, half.z);
                assert_eq!(corners[i].truncate(), corners[i + 4].truncate());
            }
            for corner in corners {
                assert_eq!(corner.abs(), half);
            }

            // Each ring walks counter-clockwise seen from +Z
            for ring in [&corners[0..4], &corners[4..8]] {
                let mut signed_area = 0.0;
                for i in 0..4 {
                    let a = ring[i];
                    let b = ring[(i + 1) % 4];
                    signed_area += a.x * b.y - b.x * a.y;
                }
                assert!(signed_area > 0.0, "clockwise ring for {:?}", half);
            }
        }
    }

    #[test]
    fn test_box_edges_are_axis_aligned_and_closed() {
        let half = Vec3::new(4.0, 5.0, 6.0);
        let corners = box_corners(half);
        let mut degree = [0; 8];
        for (a, b) in BOX_EDGES {
            let d = (corners[b] - corners[a]).abs();
            let nonzero = [d.x, d.y, d.z].iter().filter(|v| **v > 0.0).count();
            assert_eq!(nonzero, 1, "edge {}-{} is not axis aligned", a, b);
            degree[a] += 1;
            degree[b] += 1;
        }
        // Every corner of a closed box meets exactly three edges
        assert!(degree.iter().all(|d| *d == 3));
    }

    #[test]
    fn test_pyramid() {
        let corners = pyramid_corners(10.0, Vec2::new(4.0, 2.0)).unwrap();
        assert_eq!(corners.len(), 5);
        assert_eq!(corners[0], Vec3::new(-2.0, -1.0, 0.0));
        assert_eq!(corners[4], Vec3::new(0.0, 0.0, 10.0));
        assert!(CornerConvention::Generalized.validate(&corners).is_ok());

        assert!(pyramid_corners(0.0, Vec2::ONE).is_err());
        assert!(pyramid_corners(1.0, Vec2::new(-1.0, 1.0)).is_err());
        assert!(pyramid_corners(f32::NAN, Vec2::ONE).is_err());
    }

    #[test]
    fn test_parallel_faces_rules() {
        let convention = CornerConvention::ParallelFaces;
        let cube = box_corners(Vec3::ONE);
        assert!(convention.validate(&cube).is_ok());

        assert!(matches!(
            convention.validate(&cube[..7]),
            Err(CollisionError::OddCornerCount(7))
        ));
        assert!(matches!(
            convention.validate(&cube[..4]),
            Err(CollisionError::TooFewCorners { count: 4, min: 6 })
        ));

        let pyramid = pyramid_corners(1.0, Vec2::ONE).unwrap();
        assert!(convention.validate(&pyramid).is_err());
    }

    #[test]
    fn test_triangular_prism_is_valid() {
        let prism = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        ];
        assert!(CornerConvention::ParallelFaces.validate(&prism).is_ok());
    }

    #[test]
    fn test_rejects_non_finite_and_flat() {
        let mut cube = box_corners(Vec3::ONE).to_vec();
        cube[3].y = f32::INFINITY;
        assert!(matches!(
            CornerConvention::ParallelFaces.validate(&cube),
            Err(CollisionError::NonFiniteCorner(3))
        ));

        let flat = box_corners(Vec3::new(1.0, 1.0, 0.0));
        assert!(matches!(
            CornerConvention::ParallelFaces.validate(&flat),
            Err(CollisionError::Degenerate)
        ));
    }

    #[test]
    fn test_spans_volume() {
        assert!(!spans_volume(&[]));
        assert!(!spans_volume(&[Vec3::ONE; 6]));
        let line: Vec<_> = (0..6).map(|i| Vec3::X * i as f32).collect();
        assert!(!spans_volume(&line));
        assert!(spans_volume(&box_corners(Vec3::splat(0.01))));
    }
}
