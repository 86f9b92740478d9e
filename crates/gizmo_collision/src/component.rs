//! Collision volume components
//!
//! A [`CustomCollision`] owns a corner list and the physics body cooked from
//! it. The body is created lazily: registering with a [`CollisionWorld`] or
//! asking for [`CustomCollision::body_setup`] cooks it on first use.
//!
//! Every geometry change goes through one rebuild path. The replacement body
//! is cooked off to the side and only swapped in once it is valid, so a
//! rejected edit leaves the previous corners, body and collider untouched.

use crate::body_setup::{BodySetup, ConvexElem};
use crate::bounds::{Aabb, Bounds};
use crate::config::CollisionConfig;
use crate::corners::{box_corners, CornerConvention};
use crate::error::{CollisionError, Result};
use crate::proxy::{Color, EdgeStyle, WireframeProxy};
use crate::world::{ColliderHandle, CollisionEnabled, CollisionWorld};
use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Editable property of a collision volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionProperty {
    Corners,
    HalfExtents,
    LineThickness,
    ShapeColor,
    EdgeStyle,
}

/// Serializable state of a collision volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionSnapshot {
    pub corners: Vec<Vec3>,
    pub convention: CornerConvention,
    pub line_thickness: f32,
    pub shape_color: Color,
    pub edge_style: EdgeStyle,
    pub collision_enabled: CollisionEnabled,
}

/// Convex collision volume defined by a corner list
#[derive(Debug, Clone)]
pub struct CustomCollision {
    corners: Vec<Vec3>,
    convention: CornerConvention,
    line_thickness: f32,
    shape_color: Color,
    edge_style: EdgeStyle,
    collision_enabled: CollisionEnabled,
    body_setup: Option<BodySetup>,
    collider: Option<ColliderHandle>,
    translation: Vec3,
    rotation: Quat,
    user_data: u128,
    render_state_dirty: bool,
}

impl Default for CustomCollision {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomCollision {
    /// Box volume with the default half extents
    pub fn new() -> Self {
        Self::with_config(&CollisionConfig::default())
    }

    pub fn with_config(config: &CollisionConfig) -> Self {
        Self {
            corners: box_corners(config.default_half_extents).to_vec(),
            convention: config.convention,
            line_thickness: config.line_thickness,
            shape_color: config.shape_color,
            edge_style: EdgeStyle::AllPairs,
            collision_enabled: CollisionEnabled::QueryAndPhysics,
            body_setup: None,
            collider: None,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            user_data: 0,
            render_state_dirty: true,
        }
    }

    /// Restore a volume from a snapshot. The corners must satisfy the
    /// snapshot's convention.
    pub fn from_snapshot(snapshot: CollisionSnapshot) -> Result<Self> {
        snapshot.convention.validate(&snapshot.corners)?;
        Ok(Self {
            corners: snapshot.corners,
            convention: snapshot.convention,
            line_thickness: snapshot.line_thickness,
            shape_color: snapshot.shape_color,
            edge_style: snapshot.edge_style,
            collision_enabled: snapshot.collision_enabled,
            ..Self::new()
        })
    }

    pub fn snapshot(&self) -> CollisionSnapshot {
        CollisionSnapshot {
            corners: self.corners.clone(),
            convention: self.convention,
            line_thickness: self.line_thickness,
            shape_color: self.shape_color,
            edge_style: self.edge_style,
            collision_enabled: self.collision_enabled,
        }
    }

    /// Tag carried by the collider, returned in ray hits
    pub fn with_user_data(mut self, user_data: u128) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn corners(&self) -> &[Vec3] {
        &self.corners
    }

    /// Direct access for editors. Follow with
    /// [`on_property_changed`](Self::on_property_changed) and
    /// [`CollisionProperty::Corners`] to rebuild.
    pub fn corners_mut(&mut self) -> &mut Vec<Vec3> {
        &mut self.corners
    }

    pub fn convention(&self) -> CornerConvention {
        self.convention
    }

    /// Takes effect on the next rebuild
    pub fn set_convention(&mut self, convention: CornerConvention) {
        self.convention = convention;
    }

    pub fn line_thickness(&self) -> f32 {
        self.line_thickness
    }

    pub fn set_line_thickness(&mut self, thickness: f32) {
        self.line_thickness = thickness;
        self.render_state_dirty = true;
    }

    pub fn shape_color(&self) -> Color {
        self.shape_color
    }

    pub fn set_shape_color(&mut self, color: Color) {
        self.shape_color = color;
        self.render_state_dirty = true;
    }

    pub fn edge_style(&self) -> EdgeStyle {
        self.edge_style
    }

    pub fn set_edge_style(&mut self, style: EdgeStyle) {
        self.edge_style = style;
        self.render_state_dirty = true;
    }

    pub fn collision_enabled(&self) -> CollisionEnabled {
        self.collision_enabled
    }

    pub fn set_collision_enabled(&mut self, enabled: CollisionEnabled, world: &mut CollisionWorld) -> Result<()> {
        self.collision_enabled = enabled;
        match self.collider {
            Some(handle) => world.set_collision_enabled(handle, enabled),
            None => Ok(()),
        }
    }

    pub fn collider(&self) -> Option<ColliderHandle> {
        self.collider
    }

    pub fn is_registered(&self) -> bool {
        self.collider.is_some()
    }

    /// Attach to a world, cooking the body first if needed
    pub fn on_register(&mut self, world: &mut CollisionWorld) -> Result<ColliderHandle> {
        if let Some(handle) = self.collider.filter(|h| world.contains(*h)) {
            return Ok(handle);
        }

        let shape = self
            .body_setup()?
            .shape()
            .cloned()
            .ok_or_else(|| CollisionError::ShapeCreationFailed("body setup is not cooked".to_string()))?;
        let handle = world.insert(
            shape,
            self.translation,
            self.rotation,
            self.collision_enabled,
            self.user_data,
        );
        self.collider = Some(handle);
        self.render_state_dirty = true;
        log::debug!("Registered collision volume with {} corners", self.corners.len());
        Ok(handle)
    }

    /// Detach from the world, keeping the cooked body for the next registration
    pub fn on_unregister(&mut self, world: &mut CollisionWorld) {
        if let Some(handle) = self.collider.take() {
            world.remove(handle);
        }
    }

    /// The body setup, created from the current corners on first use
    pub fn body_setup(&mut self) -> Result<&BodySetup> {
        let setup = match self.body_setup.take() {
            Some(setup) => setup,
            None => self.cook(&self.corners)?,
        };
        Ok(self.body_setup.insert(setup))
    }

    /// The body setup if it has been created
    pub fn cached_body_setup(&self) -> Option<&BodySetup> {
        self.body_setup.as_ref()
    }

    /// Rebuild the collision body from the current corners.
    ///
    /// On success collision is forced to [`CollisionEnabled::QueryAndPhysics`]
    /// and a registered collider picks up the new shape. On failure nothing
    /// changes.
    pub fn update_collision(&mut self, world: &mut CollisionWorld) -> Result<()> {
        let setup = self.cook(&self.corners)?;
        self.commit(setup, world);
        Ok(())
    }

    /// Replace the corner list and rebuild, leaving everything as it was if
    /// the corners are rejected.
    pub fn try_set_corners(&mut self, corners: Vec<Vec3>, world: &mut CollisionWorld) -> Result<()> {
        let setup = self.cook(&corners)?;
        self.corners = corners;
        self.commit(setup, world);
        Ok(())
    }

    /// Replace the corner list. Returns false, with a warning, when the list
    /// does not fit the convention.
    pub fn set_extents(&mut self, corners: Vec<Vec3>, world: &mut CollisionWorld) -> bool {
        let count = corners.len();
        match self.try_set_corners(corners, world) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Rejected {} corners: {}", count, err);
                false
            }
        }
    }

    /// Editor hook after a property was changed in place
    pub fn on_property_changed(&mut self, property: CollisionProperty, world: &mut CollisionWorld) {
        match property {
            CollisionProperty::Corners | CollisionProperty::HalfExtents => {
                if let Err(err) = self.update_collision(world) {
                    log::warn!("Collision rebuild after {:?} edit failed: {}", property, err);
                }
            }
            CollisionProperty::LineThickness | CollisionProperty::ShapeColor | CollisionProperty::EdgeStyle => {
                self.render_state_dirty = true;
            }
        }
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn set_world_pose(&mut self, translation: Vec3, rotation: Quat, world: &mut CollisionWorld) -> Result<()> {
        self.translation = translation;
        self.rotation = rotation;
        match self.collider {
            Some(handle) => world.set_pose(handle, translation, rotation),
            None => Ok(()),
        }
    }

    pub fn local_to_world(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.rotation, self.translation)
    }

    pub fn calc_bounds(&self, local_to_world: &Affine3A) -> Bounds {
        Bounds::from_local_points(&self.corners, local_to_world)
    }

    pub fn create_scene_proxy(&self) -> WireframeProxy {
        WireframeProxy::new(
            self.corners.clone(),
            self.line_thickness,
            self.shape_color,
            self.edge_style,
        )
    }

    pub fn is_render_state_dirty(&self) -> bool {
        self.render_state_dirty
    }

    pub fn mark_render_state_dirty(&mut self) {
        self.render_state_dirty = true;
    }

    /// Clear the dirty flag, returning whether a new proxy is needed
    pub fn take_render_state_dirty(&mut self) -> bool {
        std::mem::take(&mut self.render_state_dirty)
    }

    /// Cook a replacement body for `corners` without touching `self`
    fn cook(&self, corners: &[Vec3]) -> Result<BodySetup> {
        self.convention.validate(corners)?;

        let mut setup = self.body_setup.clone().unwrap_or_default();
        setup.clear_convex_elems();
        setup.add_convex_elem(ConvexElem::new(corners.to_vec()));
        setup.invalidate_physics_data();
        setup.create_physics_meshes()?;
        Ok(setup)
    }

    fn commit(&mut self, setup: BodySetup, world: &mut CollisionWorld) {
        let shape = setup.shape().cloned();
        self.body_setup = Some(setup);
        self.collision_enabled = CollisionEnabled::QueryAndPhysics;
        self.render_state_dirty = true;

        let (Some(handle), Some(shape)) = (self.collider, shape) else {
            return;
        };
        let refreshed = world
            .replace_shape(handle, shape.clone())
            .and_then(|()| world.set_collision_enabled(handle, self.collision_enabled));
        if let Err(err) = refreshed {
            log::warn!("Recreating physics state: {}", err);
            self.collider = Some(world.insert(
                shape,
                self.translation,
                self.rotation,
                self.collision_enabled,
                self.user_data,
            ));
        }
    }
}

/// Box volume driven by half extents
#[derive(Debug, Clone)]
pub struct CustomBoxCollision {
    collision: CustomCollision,
    half_extents: Vec3,
}

impl Default for CustomBoxCollision {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomBoxCollision {
    pub fn new() -> Self {
        Self::with_config(&CollisionConfig::default())
    }

    pub fn with_config(config: &CollisionConfig) -> Self {
        let mut collision = CustomCollision::with_config(config);
        collision.set_edge_style(EdgeStyle::Box);
        Self {
            collision,
            half_extents: config.default_half_extents,
        }
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Direct access for editors. Follow with
    /// [`CollisionProperty::HalfExtents`].
    pub fn half_extents_mut(&mut self) -> &mut Vec3 {
        &mut self.half_extents
    }

    /// Regenerate the eight box corners and rebuild
    pub fn set_box_half_extents(&mut self, half_extents: Vec3, world: &mut CollisionWorld) -> Result<()> {
        if !(half_extents.is_finite() && half_extents.cmpgt(Vec3::ZERO).all()) {
            return Err(CollisionError::InvalidDimensions(format!(
                "box half extents must be positive, got {:?}",
                half_extents
            )));
        }
        self.collision
            .try_set_corners(box_corners(half_extents).to_vec(), world)?;
        self.half_extents = half_extents;
        Ok(())
    }

    pub fn on_property_changed(&mut self, property: CollisionProperty, world: &mut CollisionWorld) {
        if property != CollisionProperty::HalfExtents {
            self.collision.on_property_changed(property, world);
            return;
        }

        if let Err(err) = self.set_box_half_extents(self.half_extents, world) {
            log::warn!("Box half extents edit rejected: {}", err);
            if let Some(current) = Aabb::from_points(self.collision.corners()) {
                self.half_extents = current.half_extents();
            }
        }
    }

    pub fn collision(&self) -> &CustomCollision {
        &self.collision
    }

    pub fn collision_mut(&mut self) -> &mut CustomCollision {
        &mut self.collision
    }
}
