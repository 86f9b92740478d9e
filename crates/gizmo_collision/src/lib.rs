//! Gizmo Collision - convex collision volumes from corner lists
//!
//! A volume is an ordered list of corner points. The list is validated,
//! cooked into a Rapier convex hull and registered with a
//! [`CollisionWorld`](world::CollisionWorld), where it can be hit by ray
//! queries. A [`WireframeProxy`](proxy::WireframeProxy) draws the corners as
//! debug lines.
//!
//! # Example
//!
//! ```ignore
//! use gizmo_collision::prelude::*;
//!
//! let mut world = CollisionWorld::new();
//! let mut volume = CustomCollision::new();
//! volume.on_register(&mut world)?;
//!
//! let wedge = vec![/* six corners: two parallel triangles */];
//! if !volume.set_extents(wedge, &mut world) {
//!     // previous geometry is still in place
//! }
//!
//! let hit = world.cast_ray(Vec3::new(-500.0, 0.0, 0.0), Vec3::X, 1000.0);
//! ```

pub mod body_setup;
pub mod bounds;
pub mod component;
pub mod config;
pub mod corners;
pub mod error;
pub mod proxy;
pub mod world;

pub mod prelude {
    //! Common imports for collision volumes
    pub use crate::body_setup::{BodySetup, ConvexElem};
    pub use crate::bounds::{Aabb, Bounds};
    pub use crate::component::{CollisionProperty, CollisionSnapshot, CustomBoxCollision, CustomCollision};
    pub use crate::config::CollisionConfig;
    pub use crate::corners::{box_corners, pyramid_corners, CornerConvention, BOX_EDGES};
    pub use crate::error::{CollisionError, Result};
    pub use crate::proxy::{Color, DebugLine, EdgeStyle, LineSink, WireframeProxy};
    pub use crate::world::{ColliderHandle, CollisionEnabled, CollisionWorld, RayHit};
    pub use glam::{Affine3A, Quat, Vec2, Vec3};
}

pub use prelude::*;
