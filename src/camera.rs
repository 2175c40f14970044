use glam::{Mat4, Vec3};

use crate::math::{Orientation, OrthonormalFrame, VectorExt};

/// Free camera: a position plus an orthonormal viewing frame.
///
/// Rotations go through `pan` and its roll/pitch/yaw helpers, movement through
/// `dolly` and its surge/sway/heave helpers.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    frame: OrthonormalFrame,
    view: Mat4,
}

impl Camera {
    /// Camera at `position` looking along `forward` with `up` as the up hint
    pub fn new(position: Vec3, forward: Vec3, up: Vec3) -> Self {
        let mut camera = Self {
            position,
            frame: OrthonormalFrame::from_forward_up(forward, up),
            view: Mat4::IDENTITY,
        };
        camera.recalculate();
        camera
    }

    /// Looking down -z with +y up
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::NEG_Z, Vec3::Y)
    }

    fn recalculate(&mut self) {
        self.frame = OrthonormalFrame::from_forward_up(self.frame.forward, self.frame.up);
        self.view = self.frame.view_rotation() * Mat4::from_translation(-self.position);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.frame.forward
    }

    pub fn right(&self) -> Vec3 {
        self.frame.right
    }

    pub fn up(&self) -> Vec3 {
        self.frame.up
    }

    pub fn frame(&self) -> &OrthonormalFrame {
        &self.frame
    }

    /// World-to-view transform
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Rotates the view in place
    pub fn pan(&mut self, rotation: Orientation) {
        self.frame = self.frame.rotated_up(rotation);
        self.recalculate();
    }

    pub fn roll(&mut self, angle: f32) {
        self.pan(Orientation::from_axis_angle(self.forward(), angle));
    }

    pub fn pitch(&mut self, angle: f32) {
        self.pan(Orientation::from_axis_angle(self.right(), angle));
    }

    pub fn yaw(&mut self, angle: f32) {
        self.pan(Orientation::from_axis_angle(self.up(), angle));
    }

    /// Aims at `target` from the current position
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalised();
        if forward == Vec3::ZERO {
            // Standing on the target: keep the current heading
            return;
        }
        self.frame.forward = forward;
        self.frame.up = up.normalised();
        self.recalculate();
    }

    /// Moves by `direction`; its length is the distance
    pub fn dolly(&mut self, direction: Vec3) {
        self.position += direction;
        self.recalculate();
    }

    pub fn heave(&mut self, distance: f32) {
        self.dolly(self.up() * distance);
    }

    pub fn surge(&mut self, distance: f32) {
        self.dolly(self.forward() * distance);
    }

    pub fn sway(&mut self, distance: f32) {
        self.dolly(self.right() * distance);
    }

    pub fn move_to(&mut self, position: Vec3) {
        self.position = position;
        self.recalculate();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}
