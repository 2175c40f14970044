use glam::{Mat4, Vec3};

use crate::math::{Orientation, OrthonormalFrame};

/// Generational handle into a [`ChainArena`](super::ChainArena).
///
/// A handle to a removed node never resolves again, even if its slot is reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(super) index: u32,
    pub(super) generation: u32,
}

/// Root transform of one pipe: absolute position plus orientation basis
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChainHead {
    position: Vec3,
    frame: OrthonormalFrame,
    matrix: Mat4,
}

impl ChainHead {
    pub fn new(position: Vec3) -> Self {
        Self::with_frame(position, OrthonormalFrame::world_aligned())
    }

    pub fn with_frame(position: Vec3, frame: OrthonormalFrame) -> Self {
        let frame = OrthonormalFrame::from_forward_right(frame.forward, frame.right);
        Self {
            position,
            frame,
            matrix: frame.rotation_matrix(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn frame(&self) -> &OrthonormalFrame {
        &self.frame
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

    /// Basis rotation, recomputed whenever the frame changes
    pub fn rotation_matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Moves the head by `direction` (its length is the distance)
    pub fn dolly(&mut self, direction: Vec3) {
        self.position += direction;
    }

    pub fn pan(&mut self, rotation: Orientation) {
        self.frame = self.frame.rotated_right(rotation);
        self.matrix = self.frame.rotation_matrix();
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
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NodeKind {
    Segment,
    Head(ChainHead),
}

/// One cube of a pipe.
///
/// `axis` is both the rotation axis and the offset from the previous cube;
/// cubes are unit sized so the two coincide.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainNode {
    pub(super) angle: f32,
    pub(super) axis: Vec3,
    pub(super) next: Option<NodeId>,
    pub(super) prev: Option<NodeId>,
    pub(super) active: bool,
    pub(super) kind: NodeKind,
}

impl ChainNode {
    pub fn segment(angle: f32, axis: Vec3) -> Self {
        Self {
            angle,
            axis,
            next: None,
            prev: None,
            active: false,
            kind: NodeKind::Segment,
        }
    }

    pub fn head(position: Vec3) -> Self {
        Self {
            angle: 0.0,
            axis: Vec3::ZERO,
            next: None,
            prev: None,
            active: false,
            kind: NodeKind::Head(ChainHead::new(position)),
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_head(&self) -> bool {
        matches!(self.kind, NodeKind::Head(_))
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn as_head(&self) -> Option<&ChainHead> {
        match &self.kind {
            NodeKind::Head(head) => Some(head),
            NodeKind::Segment => None,
        }
    }

    pub fn as_head_mut(&mut self) -> Option<&mut ChainHead> {
        match &mut self.kind {
            NodeKind::Head(head) => Some(head),
            NodeKind::Segment => None,
        }
    }

    /// Own rotation about `axis`
    pub fn local_rotation(&self) -> Orientation {
        Orientation::from_axis_angle(self.axis, self.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::VectorExt;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_head_defaults() {
        let node = ChainNode::head(Vec3::new(1.0, 2.0, 3.0));
        let head = node.as_head().unwrap();
        assert_eq!(head.position(), Vec3::new(1.0, 2.0, 3.0));
        assert!(head.forward().approx_eq(&Vec3::Z));
        assert!(head.right().approx_eq(&Vec3::X));
        assert!(head.up().approx_eq(&Vec3::Y));
        assert_eq!(node.axis(), Vec3::ZERO);
    }

    #[test]
    fn test_head_yaw_recomputes_matrix() {
        let mut head = ChainHead::new(Vec3::ZERO);
        head.yaw(FRAC_PI_2);
        assert!(head.forward().approx_eq(&Vec3::X));
        assert!(head.frame().is_orthonormal(1e-5));
        let m = head.rotation_matrix();
        assert!(m.transform_vector3(Vec3::Z).approx_eq(&Vec3::X));
    }

    #[test]
    fn test_head_dolly() {
        let mut head = ChainHead::new(Vec3::ZERO);
        head.dolly(Vec3::new(0.0, 0.1, 0.0));
        head.dolly(Vec3::new(0.0, 0.1, 0.0));
        assert!(head.position().approx_eq(&Vec3::new(0.0, 0.2, 0.0)));
    }

    #[test]
    fn test_segment_is_not_head() {
        let node = ChainNode::segment(0.0, Vec3::Y);
        assert!(!node.is_head());
        assert!(node.as_head().is_none());
        assert!(!node.is_active());
    }
}
