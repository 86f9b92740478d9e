//! Gizmo Interact - axis interaction for translate/rotate gizmos
//!
//! Turns per-frame camera state and mouse input into a translation or
//! rotation of a scene object along the currently selected gizmo axis.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                   GizmoState                   │
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────┐ │
//! │  │ GizmoBase │  │ MoveGizmo │  │ RotateGizmo │ │
//! │  └───────────┘  └───────────┘  └─────────────┘ │
//! └────────────────────────────────────────────────┘
//!          │ gating::check            │
//!          ▼                          ▼
//!     ┌─────────┐               ┌──────────┐
//!     │ Camera  │               │  Scene   │ (host)
//!     └─────────┘               └──────────┘
//! ```
//!
//! The world uses Z up, X forward and Y right.
//!
//! # Example
//!
//! ```ignore
//! use gizmo_interact::prelude::*;
//!
//! let mut scene = SceneGraph::new();
//! let target = scene.spawn(Transform::default());
//!
//! let mut gizmo = GizmoState::new(GizmoConfig::default());
//! gizmo.base_mut().set_target(Some(target));
//! gizmo.base_mut().set_camera(Some(CameraView::looking_at(camera_pos, Vec3::ZERO)));
//! gizmo.set_mode(GizmoMode::Rotate);
//! gizmo.select_axis(SelectedAxis::X);
//!
//! let delta = gizmo.tick(&mut scene, &FrameInput::mouse(4.0, 0.0));
//! ```

pub mod axis;
pub mod base;
pub mod camera;
pub mod config;
pub mod error;
pub mod gating;
pub mod rotate;
pub mod scene;
pub mod state;
pub mod translate;

pub mod prelude {
    //! Common imports for gizmo interaction
    pub use crate::axis::{AxisMultiplier, SelectedAxis, TransformSpace};
    pub use crate::base::{GizmoBase, Key};
    pub use crate::camera::{CameraView, FrameInput};
    pub use crate::config::GizmoConfig;
    pub use crate::error::{GizmoError, Result};
    pub use crate::gating::GateRejection;
    pub use crate::rotate::RotateGizmo;
    pub use crate::scene::{Scene, SceneGraph, TargetId, Transform};
    pub use crate::state::{GizmoMode, GizmoModule, GizmoState, TransformDelta};
    pub use crate::translate::MoveGizmo;
    pub use glam::{Quat, Vec2, Vec3};
}

pub use prelude::*;
