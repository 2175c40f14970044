use std::any::Any;

use crate::camera::Camera;

/// Order in which a composite camera runs its behaviors each frame
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BehaviorStage {
    Path,
    Jitter,
    /// Runs last so it aims from the camera's final position for the frame
    Tracking,
}

/// Independently steppable camera mutator
pub trait CameraBehavior: Any {
    /// Advance by `dt` seconds, touching only the camera state this behavior owns
    fn advance(&mut self, camera: &mut Camera, dt: f32);

    /// Slot in the per-frame order
    fn stage(&self) -> BehaviorStage;

    /// Name for logging
    fn name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
