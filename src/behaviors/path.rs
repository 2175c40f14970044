use std::any::Any;
use std::collections::VecDeque;

use glam::Vec3;

use crate::camera::Camera;
use crate::traits::{BehaviorStage, CameraBehavior};

/// Control points a spline segment needs
pub const MIN_WAYPOINTS: usize = 4;

/// Uniform cubic B-spline blending function for `i` in `{-2, -1, 0, 1}`
pub fn basis(i: i32, t: f32) -> f32 {
    match i {
        -2 => (((-t + 3.0) * t - 3.0) * t + 1.0) / 6.0,
        -1 => (((3.0 * t - 6.0) * t) * t + 4.0) / 6.0,
        0 => (((-3.0 * t + 3.0) * t + 3.0) * t + 1.0) / 6.0,
        1 => (t * t * t) / 6.0,
        _ => 0.0,
    }
}

/// Moves the camera smoothly along a B-spline through queued waypoints.
///
/// The curve only reaches a new waypoint once the older ones have been consumed,
/// one per segment traversed, which gives the trailing "elastic" feel.
#[derive(Debug, Clone)]
pub struct ElasticPath {
    waypoints: VecDeque<Vec3>,
    t: f32,
    speed: f32,
}

impl ElasticPath {
    /// Path resting at `position`; `speed` is segments per second
    pub fn new(position: Vec3, speed: f32) -> Self {
        let mut path = Self {
            waypoints: std::iter::repeat(position).take(MIN_WAYPOINTS + 1).collect(),
            t: 0.0,
            speed: 1.0,
        };
        path.set_speed(speed);
        path
    }

    pub fn waypoints(&self) -> impl Iterator<Item = &Vec3> {
        self.waypoints.iter()
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Sets segments per second. Negative values are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if speed >= 0.0 {
            self.speed = speed;
        }
    }

    /// Scales the speed. Negative factors are ignored.
    pub fn adjust_speed(&mut self, factor: f32) {
        if factor >= 0.0 {
            self.speed *= factor;
        }
    }

    /// Queues a control point at the back of the curve
    pub fn push_waypoint(&mut self, point: Vec3) {
        self.waypoints.push_back(point);
    }

    /// Collapses the curve onto `position`
    pub fn set_position(&mut self, position: Vec3) {
        self.waypoints.clear();
        self.waypoints.extend(std::iter::repeat(position).take(MIN_WAYPOINTS));
    }

    /// Steps along the curve; returns true when a waypoint was consumed
    pub fn step(&mut self, dt: f32) -> bool {
        self.t += dt * self.speed;
        if self.t < 1.0 {
            return false;
        }

        // A long step still consumes a single waypoint
        self.t = self.t.fract();
        self.waypoints.pop_front();
        if let Some(&newest) = self.waypoints.back() {
            while self.waypoints.len() < MIN_WAYPOINTS {
                self.waypoints.push_back(newest);
            }
        }
        true
    }

    /// Point on the current segment at `t`
    pub fn position(&self) -> Vec3 {
        self.waypoints
            .iter()
            .zip(-2..=1)
            .map(|(point, i)| *point * basis(i, self.t))
            .sum()
    }
}

impl CameraBehavior for ElasticPath {
    fn advance(&mut self, camera: &mut Camera, dt: f32) {
        self.step(dt);
        camera.move_to(self.position());
    }

    fn stage(&self) -> BehaviorStage {
        BehaviorStage::Path
    }

    fn name(&self) -> &'static str {
        "elastic-path"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
