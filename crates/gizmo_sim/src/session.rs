//! Scripted interaction session
//!
//! Spawns a target with a collision volume, replays the scripted frames
//! through the gizmo and keeps the volume's collider on the target.

use crate::config::{Result, ScriptedFrame, SimConfig};
use gizmo_collision::{CollisionWorld, CustomCollision, RayHit};
use gizmo_interact::{CameraView, FrameInput, GizmoState, Scene, SceneGraph, TargetId, Transform, TransformDelta};

/// Outcome of a session
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub deltas: Vec<TransformDelta>,
    pub corners_accepted: bool,
    pub final_transform: Transform,
    /// Camera ray toward the target after the last frame
    pub hit: Option<RayHit>,
}

impl SessionReport {
    pub fn applied(&self) -> usize {
        self.deltas.iter().filter(|d| !d.is_zero()).count()
    }

    pub fn print_summary(&self) {
        log::info!("Session finished:");
        log::info!("  Frames: {} applied, {} rejected", self.applied(), self.deltas.len() - self.applied());
        log::info!("  Custom corners accepted: {}", self.corners_accepted);
        log::info!(
            "  Target: location {:?}, rotation {:?}",
            self.final_transform.translation,
            self.final_transform.rotation
        );
        match &self.hit {
            Some(hit) => log::info!("  Camera ray hit collider {:?} at {:?}", hit.collider, hit.point),
            None => log::info!("  Camera ray missed"),
        }
    }
}

/// Scene, gizmo and collision world for one run
pub struct Session {
    scene: SceneGraph,
    gizmo: GizmoState,
    world: CollisionWorld,
    volume: CustomCollision,
    target: TargetId,
    camera: CameraView,
}

impl Session {
    pub fn new(config: &SimConfig) -> Result<Self> {
        let mut scene = SceneGraph::new();
        let target = scene.spawn(Transform::from_translation(config.target));

        let camera = CameraView::looking_at(config.camera.location, config.camera.look_at);
        let mut gizmo = GizmoState::new(config.gizmo.clone());
        let base = gizmo.base_mut();
        base.set_target(Some(target));
        base.set_camera(Some(camera));
        base.set_pawn_location(Some(camera.location));
        base.track_target(&scene);

        let mut world = CollisionWorld::new();
        let mut volume = CustomCollision::with_config(&config.collision).with_user_data(u128::from(target.0));
        volume.set_world_pose(config.target, glam::Quat::IDENTITY, &mut world)?;
        volume.on_register(&mut world)?;

        Ok(Self {
            scene,
            gizmo,
            world,
            volume,
            target,
            camera,
        })
    }

    /// Apply a corner list to the target's volume
    pub fn set_corners(&mut self, corners: Vec<glam::Vec3>) -> bool {
        self.volume.set_extents(corners, &mut self.world)
    }

    pub fn step(&mut self, frame: &ScriptedFrame) -> Result<TransformDelta> {
        let base = self.gizmo.base_mut();
        for key in &frame.keys_down {
            base.key_pressed(key.as_str());
        }
        for key in &frame.keys_up {
            base.key_released(key.as_str());
        }

        if let Some(mode) = frame.mode {
            self.gizmo.release_axis();
            self.gizmo.set_mode(mode);
        }
        self.gizmo.select_axis(frame.axis);

        let input = FrameInput::mouse(frame.mouse.x, frame.mouse.y).with_wheel(frame.wheel);
        let delta = self.gizmo.tick(&mut self.scene, &input);

        if !delta.is_zero() {
            if let Some(transform) = self.scene.transform(self.target) {
                self.volume
                    .set_world_pose(transform.translation, transform.rotation, &mut self.world)?;
            }
        }
        Ok(delta)
    }

    pub fn transform(&self) -> Transform {
        self.scene.transform(self.target).unwrap_or_default()
    }

    pub fn cast_camera_ray(&mut self) -> Option<RayHit> {
        let origin = self.camera.location;
        let direction = self.transform().translation - origin;
        self.world.cast_ray(origin, direction, direction.length() * 2.0)
    }
}

/// Run a whole configuration
pub fn run(config: &SimConfig) -> Result<SessionReport> {
    let mut session = Session::new(config)?;

    let corners_accepted = if config.corners.is_empty() {
        false
    } else {
        session.set_corners(config.corners.clone())
    };

    let mut deltas = Vec::with_capacity(config.frames.len());
    for (index, frame) in config.frames.iter().enumerate() {
        let delta = session.step(frame)?;
        log::debug!("Frame {}: {:?} amount {:.3}", index, delta.axis, delta.amount);
        deltas.push(delta);
    }

    Ok(SessionReport {
        deltas,
        corners_accepted,
        final_transform: session.transform(),
        hit: session.cast_camera_ray(),
    })
}
