//! Wireframe scene proxy for collision volumes
//!
//! The proxy is a snapshot of the component's draw state. The host takes a
//! fresh one whenever the component's render state is dirty and asks it to
//! draw into one [`LineSink`] per view.

use crate::corners::BOX_EDGES;
use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};
use std::mem;

/// RGBA colour, components in `0..=1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const GREEN: Self = Self([0.0, 1.0, 0.0, 1.0]);
    pub const RED: Self = Self([1.0, 0.0, 0.0, 1.0]);
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GREEN
    }
}

/// Which vertex pairs become lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    /// The 12 edges of an eight-corner box
    Box,
    /// A line between every pair of vertices
    #[default]
    AllPairs,
}

/// Per-view line collector
pub trait LineSink {
    fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, thickness: f32);
}

/// One recorded line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
    pub thickness: f32,
}

impl LineSink for Vec<DebugLine> {
    fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color, thickness: f32) {
        self.push(DebugLine {
            start,
            end,
            color,
            thickness,
        });
    }
}

/// Render snapshot of a collision volume
#[derive(Debug, Clone, PartialEq)]
pub struct WireframeProxy {
    vertices: Vec<Vec3>,
    line_thickness: f32,
    color: Color,
    edge_style: EdgeStyle,
}

impl WireframeProxy {
    /// Fewest vertices that describe a closed volume
    pub const MIN_VERTICES: usize = 4;

    pub fn new(vertices: Vec<Vec3>, line_thickness: f32, color: Color, edge_style: EdgeStyle) -> Self {
        Self {
            vertices,
            line_thickness,
            color,
            edge_style,
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn line_thickness(&self) -> f32 {
        self.line_thickness
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Vertex index pairs to connect. A box style over anything but eight
    /// vertices has no edges.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let count = self.vertices.len();
        match self.edge_style {
            EdgeStyle::Box if count == 8 => BOX_EDGES.to_vec(),
            EdgeStyle::Box => Vec::new(),
            EdgeStyle::AllPairs => (0..count)
                .flat_map(|a| (a + 1..count).map(move |b| (a, b)))
                .collect(),
        }
    }

    pub fn can_draw(&self) -> bool {
        self.vertices.len() >= Self::MIN_VERTICES && self.line_thickness > 0.0
    }

    /// Draw into every view whose bit is set in `visibility_map`. Returns
    /// the number of lines emitted across all views.
    pub fn draw<S: LineSink>(&self, local_to_world: &Affine3A, visibility_map: u32, views: &mut [S]) -> usize {
        if self.vertices.len() < Self::MIN_VERTICES {
            log::warn!(
                "Collision wireframe has {} vertices, need at least {}",
                self.vertices.len(),
                Self::MIN_VERTICES
            );
            return 0;
        }
        if self.line_thickness <= 0.0 {
            log::warn!("Collision wireframe line thickness {} is not positive", self.line_thickness);
            return 0;
        }

        let world: Vec<Vec3> = self
            .vertices
            .iter()
            .map(|v| local_to_world.transform_point3(*v))
            .collect();
        let edges = self.edges();

        let mut drawn = 0;
        for (index, view) in views.iter_mut().enumerate().take(u32::BITS as usize) {
            if visibility_map & (1 << index) == 0 {
                continue;
            }
            for &(a, b) in &edges {
                view.draw_line(world[a], world[b], self.color, self.line_thickness);
            }
            drawn += edges.len();
        }
        drawn
    }

    /// Bytes owned by the proxy, heap included
    pub fn memory_footprint(&self) -> usize {
        mem::size_of::<Self>() + self.vertices.capacity() * mem::size_of::<Vec3>()
    }
}
