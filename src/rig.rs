use glam::{Mat4, Vec3};

use crate::behaviors::ElasticPath;
use crate::camera::Camera;
use crate::traits::CameraBehavior;

/// Composite camera - a camera plus the behaviors that drive it.
///
/// Behaviors are kept sorted by [`BehaviorStage`](crate::traits::BehaviorStage) so that path following runs
/// before jitter, and tracking always aims from the final position of the frame.
/// Behaviors sharing a stage keep the order they were added in.
pub struct CameraRig {
    camera: Camera,
    behaviors: Vec<Box<dyn CameraBehavior>>,
}

impl CameraRig {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            behaviors: Vec::new(),
        }
    }

    /// Add behavior and return the rig
    pub fn with_behavior(mut self, behavior: Box<dyn CameraBehavior>) -> Self {
        self.add(behavior);
        self
    }

    pub fn add(&mut self, behavior: Box<dyn CameraBehavior>) {
        log::debug!("attaching camera behavior {}", behavior.name());
        self.behaviors.push(behavior);
        self.behaviors.sort_by_key(|b| b.stage());
    }

    pub fn behavior_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.behaviors.iter().map(|b| b.name())
    }

    /// First attached behavior of type `T`
    pub fn behavior<T: CameraBehavior>(&self) -> Option<&T> {
        self.behaviors
            .iter()
            .find_map(|b| b.as_any().downcast_ref::<T>())
    }

    pub fn behavior_mut<T: CameraBehavior>(&mut self) -> Option<&mut T> {
        self.behaviors
            .iter_mut()
            .find_map(|b| b.as_any_mut().downcast_mut::<T>())
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Direct access for manual control; attached behaviors may override it next frame
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Runs every behavior once, in stage order
    pub fn advance(&mut self, dt: f32) {
        for behavior in self.behaviors.iter_mut() {
            behavior.advance(&mut self.camera, dt);
        }
    }

    /// Heads for `position`: queued on the path if one is attached, otherwise immediate
    pub fn move_to(&mut self, position: Vec3) {
        match self.behavior_mut::<ElasticPath>() {
            Some(path) => path.push_waypoint(position),
            None => self.camera.move_to(position),
        }
    }

    /// Places the camera at `position` and collapses any path onto it
    pub fn set_position(&mut self, position: Vec3) {
        if let Some(path) = self.behavior_mut::<ElasticPath>() {
            path.set_position(position);
        }
        self.camera.move_to(position);
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }
}

impl std::fmt::Debug for CameraRig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraRig")
            .field("camera", &self.camera)
            .field("behaviors", &self.behavior_names().collect::<Vec<_>>())
            .finish()
    }
}
