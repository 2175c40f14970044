use glam::Vec3;

use crate::core::FixedHz;
use crate::rig::CameraRig;

/// Seconds spent at each observation point
pub const ORBIT_HZ: f32 = 1.0;

/// Cycles the camera through recorded observation points
#[derive(Debug, Clone)]
pub struct Orbit {
    points: Vec<Vec3>,
    index: usize,
    target: Vec3,
    timer: FixedHz,
}

impl Orbit {
    pub fn new(points: Vec<Vec3>, target: Vec3) -> Self {
        Self {
            points,
            index: 0,
            target,
            timer: FixedHz::new(ORBIT_HZ),
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Index of the point last moved to
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<Vec3> {
        self.points.get(self.index).copied()
    }

    /// Point the camera looks at while orbiting
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn record_point(&mut self, point: Vec3) {
        self.points.push(point);
    }

    /// Accumulates `dt`; once a whole second has passed, moves on to the next
    /// point. Advances at most one point per call. Returns true if it moved.
    pub fn step(&mut self, rig: &mut CameraRig, dt: f32) -> bool {
        if self.timer.tick(dt) == 0 || self.points.is_empty() {
            return false;
        }
        self.index = (self.index + 1) % self.points.len();
        rig.move_to(self.points[self.index]);
        log::trace!("orbit moving to point {}", self.index);
        true
    }
}
