use crate::chain::{CubeStyle, LocalTransform};

/// Receives the draw traversal of a pipe.
///
/// Calls arrive strictly nested: every `push_transform` is matched by a later
/// `pop_transform`, and cubes are drawn under everything pushed so far.
pub trait RenderSink {
    /// Multiply a local transform onto the current one and save the previous
    fn push_transform(&mut self, transform: &LocalTransform);

    /// Submit the 24-vertex cube batch under the current transform
    fn submit_cube(&mut self, style: CubeStyle);

    /// Restore the transform saved by the matching push
    fn pop_transform(&mut self);
}
