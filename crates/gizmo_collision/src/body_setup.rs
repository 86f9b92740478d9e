//! Body setup: convex elements and the physics shape cooked from them

use crate::bounds::Aabb;
use crate::error::{CollisionError, Result};
use glam::Vec3;
use rapier3d::prelude as rapier;
use std::fmt;

/// Convex collision element defined by a point hull
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexElem {
    vertices: Vec<Vec3>,
    elem_box: Option<Aabb>,
}

impl ConvexElem {
    pub fn new(vertices: Vec<Vec3>) -> Self {
        let mut elem = Self {
            vertices,
            elem_box: None,
        };
        elem.update_elem_box();
        elem
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Bounding box of the vertices, `None` for an empty element.
    pub fn elem_box(&self) -> Option<Aabb> {
        self.elem_box
    }

    pub fn update_elem_box(&mut self) {
        self.elem_box = Aabb::from_points(&self.vertices);
    }

    /// Build a Rapier convex hull from the vertices
    pub(crate) fn to_rapier(&self) -> Result<rapier::SharedShape> {
        let points: Vec<_> = self
            .vertices
            .iter()
            .map(|v| rapier::Point::new(v.x, v.y, v.z))
            .collect();
        rapier::SharedShape::convex_hull(&points).ok_or_else(|| {
            CollisionError::ShapeCreationFailed(format!(
                "convex hull of {} vertices",
                self.vertices.len()
            ))
        })
    }
}

/// Collision geometry of one component.
///
/// The cooked shape is a cache over the convex elements: any change to the
/// elements must be followed by [`BodySetup::invalidate_physics_data`] and
/// [`BodySetup::create_physics_meshes`].
#[derive(Clone, Default)]
pub struct BodySetup {
    convex_elems: Vec<ConvexElem>,
    shape: Option<rapier::SharedShape>,
}

impl fmt::Debug for BodySetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodySetup")
            .field("convex_elems", &self.convex_elems)
            .field("cooked", &self.shape.is_some())
            .finish()
    }
}

impl BodySetup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Setup holding one convex element, already cooked.
    pub fn from_corners(corners: &[Vec3]) -> Result<Self> {
        let mut setup = Self::new();
        setup.add_convex_elem(ConvexElem::new(corners.to_vec()));
        setup.create_physics_meshes()?;
        Ok(setup)
    }

    pub fn convex_elems(&self) -> &[ConvexElem] {
        &self.convex_elems
    }

    pub fn clear_convex_elems(&mut self) {
        self.convex_elems.clear();
    }

    pub fn add_convex_elem(&mut self, elem: ConvexElem) {
        self.convex_elems.push(elem);
    }

    /// Drop the cooked shape
    pub fn invalidate_physics_data(&mut self) {
        self.shape = None;
    }

    /// Cook the convex elements into a Rapier shape. One element becomes a
    /// convex hull, several become a compound.
    pub fn create_physics_meshes(&mut self) -> Result<()> {
        let shape = match self.convex_elems.as_slice() {
            [] => {
                return Err(CollisionError::ShapeCreationFailed(
                    "body setup has no convex elements".to_string(),
                ))
            }
            [single] => single.to_rapier()?,
            elems => {
                let parts = elems
                    .iter()
                    .map(|elem| Ok((rapier::Isometry::identity(), elem.to_rapier()?)))
                    .collect::<Result<Vec<_>>>()?;
                rapier::SharedShape::compound(parts)
            }
        };
        self.shape = Some(shape);
        Ok(())
    }

    pub fn has_physics_data(&self) -> bool {
        self.shape.is_some()
    }

    /// The cooked shape, if current
    pub fn shape(&self) -> Option<&rapier::SharedShape> {
        self.shape.as_ref()
    }

    /// Box around every element
    pub fn aggregate_box(&self) -> Option<Aabb> {
        let corners: Vec<Vec3> = self
            .convex_elems
            .iter()
            .filter_map(ConvexElem::elem_box)
            .flat_map(|b| [b.min, b.max])
            .collect();
        Aabb::from_points(&corners)
    }
}
