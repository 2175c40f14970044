use std::any::Any;

use glam::Vec3;

use crate::camera::Camera;
use crate::math::{degrees_to_radians, Orientation};
use crate::traits::{BehaviorStage, CameraBehavior};

/// Keeps the camera aimed at a point
#[derive(Debug, Clone, PartialEq)]
pub struct TargetTracker {
    target: Vec3,
    target_up: Vec3,
}

impl TargetTracker {
    pub fn new(target: Vec3, target_up: Vec3) -> Self {
        Self { target, target_up }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn target_up(&self) -> Vec3 {
        self.target_up
    }

    /// Retargets; takes effect on the next step
    pub fn set_target(&mut self, target: Vec3, target_up: Vec3) {
        self.target = target;
        self.target_up = target_up;
    }

    pub fn aim(&self, camera: &mut Camera) {
        camera.look_at(self.target, self.target_up);
    }
}

impl Default for TargetTracker {
    fn default() -> Self {
        Self::new(Vec3::NEG_Z, Vec3::Y)
    }
}

impl CameraBehavior for TargetTracker {
    fn advance(&mut self, camera: &mut Camera, _dt: f32) {
        self.aim(camera);
    }

    fn stage(&self) -> BehaviorStage {
        BehaviorStage::Tracking
    }

    fn name(&self) -> &'static str {
        "target-tracker"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Follows a target at a fixed distance and angular offset, always looking at it.
///
/// `offset` rotates the target's forward direction onto the direction the
/// camera should look from; `distance` is kept along that line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChaseOffset {
    tracker: TargetTracker,
    target_forward: Vec3,
    offset: Orientation,
    distance: f32,
}

impl ChaseOffset {
    pub fn new(
        tracker: TargetTracker,
        target_forward: Vec3,
        offset: Orientation,
        distance: f32,
    ) -> Self {
        Self {
            tracker,
            target_forward,
            offset,
            distance,
        }
    }

    pub fn tracker(&self) -> &TargetTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut TargetTracker {
        &mut self.tracker
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
    }
}

impl Default for ChaseOffset {
    /// Looks down on the target from 45° above, along +z
    fn default() -> Self {
        Self::new(
            TargetTracker::default(),
            Vec3::Z,
            Orientation::from_axis_angle(Vec3::X, degrees_to_radians(45.0)),
            0.0,
        )
    }
}

impl CameraBehavior for ChaseOffset {
    fn advance(&mut self, camera: &mut Camera, dt: f32) {
        camera.look_at(camera.position() + self.target_forward, self.tracker.target_up());
        camera.pan(self.offset);
        // Uses the offset heading, not the final look direction
        let error = (camera.position() - self.tracker.target()).length() - self.distance;
        camera.surge(error);
        self.tracker.advance(camera, dt);
    }

    fn stage(&self) -> BehaviorStage {
        BehaviorStage::Tracking
    }

    fn name(&self) -> &'static str {
        "chase-offset"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
