//! Interaction gating.
//!
//! A tick only produces a delta when every guard passes. Guards run in a
//! fixed order and the first failure wins.

use crate::base::GizmoBase;
use crate::camera::FrameInput;
use crate::scene::{Scene, Transform};
use thiserror::Error;

/// Why an interaction tick was skipped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GateRejection {
    #[error("no player camera is bound")]
    NoCamera,

    #[error("gizmo target is not valid")]
    InvalidTarget,

    #[error("there is no movement")]
    NoMovement,

    #[error("gizmo is not in the view")]
    OutOfView,

    #[error("forbidden key pressed")]
    ForbiddenKey,
}

/// Run the guard chain for `module` and hand back the target transform.
pub fn check(
    module: &str,
    base: &GizmoBase,
    scene: &dyn Scene,
    frame: &FrameInput,
) -> Result<Transform, GateRejection> {
    let result = run_guards(base, scene, frame);
    if let Err(rejection) = &result {
        if base.debug_mode() {
            log::warn!("Gizmo {}: {}", module, rejection);
        } else {
            log::trace!("Gizmo {}: {}", module, rejection);
        }
    }
    result
}

fn run_guards(
    base: &GizmoBase,
    scene: &dyn Scene,
    frame: &FrameInput,
) -> Result<Transform, GateRejection> {
    if base.camera().is_none() {
        return Err(GateRejection::NoCamera);
    }
    let target = base
        .target_transform(scene)
        .ok_or(GateRejection::InvalidTarget)?;
    if !base.detect_movement(frame) {
        return Err(GateRejection::NoMovement);
    }
    if !base.is_gizmo_in_view(scene) {
        return Err(GateRejection::OutOfView);
    }
    if base.forbidden_key_pressed() {
        return Err(GateRejection::ForbiddenKey);
    }
    Ok(target)
}
