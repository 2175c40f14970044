use glam::{Mat4, Vec3};

use super::arena::ChainArena;
use super::node::{NodeId, NodeKind};
use crate::math::Orientation;
use crate::traits::RenderSink;

/// How a cube batch is rasterised
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CubeStyle {
    Solid,
    /// Used for the selected cube
    Wireframe,
}

/// Transform pushed for one node
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LocalTransform {
    /// Segment: translate by `translation`, then rotate `angle` radians about `axis`
    AxisAngle {
        translation: Vec3,
        axis: Vec3,
        angle: f32,
    },
    /// Head: translate to `translation`, then apply the basis rotation
    Basis { translation: Vec3, rotation: Mat4 },
}

impl LocalTransform {
    pub fn matrix(&self) -> Mat4 {
        match *self {
            LocalTransform::AxisAngle {
                translation,
                axis,
                angle,
            } => {
                Mat4::from_translation(translation)
                    * Orientation::from_axis_angle(axis, angle).to_mat4()
            }
            LocalTransform::Basis {
                translation,
                rotation,
            } => Mat4::from_translation(translation) * rotation,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RenderCommand {
    PushTransform(LocalTransform),
    SubmitCube(CubeStyle),
    PopTransform,
}

/// Recording sink
impl RenderSink for Vec<RenderCommand> {
    fn push_transform(&mut self, transform: &LocalTransform) {
        self.push(RenderCommand::PushTransform(*transform));
    }

    fn submit_cube(&mut self, style: CubeStyle) {
        self.push(RenderCommand::SubmitCube(style));
    }

    fn pop_transform(&mut self) {
        self.push(RenderCommand::PopTransform);
    }
}

/// Sink that resolves every submitted cube to its world matrix
#[derive(Debug, Clone)]
pub struct WorldTransforms {
    stack: Vec<Mat4>,
    pub cubes: Vec<(Mat4, CubeStyle)>,
}

impl WorldTransforms {
    pub fn new() -> Self {
        Self {
            stack: vec![Mat4::IDENTITY],
            cubes: Vec::new(),
        }
    }

    fn current(&self) -> Mat4 {
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// World-space centre of each submitted cube, in draw order
    pub fn centres(&self) -> Vec<Vec3> {
        self.cubes
            .iter()
            .map(|(matrix, _)| matrix.transform_point3(Vec3::ZERO))
            .collect()
    }

    /// Depth of the transform stack; 0 once every push has been popped
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }
}

impl Default for WorldTransforms {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for WorldTransforms {
    fn push_transform(&mut self, transform: &LocalTransform) {
        let world = self.current() * transform.matrix();
        self.stack.push(world);
    }

    fn submit_cube(&mut self, style: CubeStyle) {
        self.cubes.push((self.current(), style));
    }

    fn pop_transform(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }
}

fn local_transform(kind: &NodeKind, axis: Vec3, angle: f32) -> LocalTransform {
    match kind {
        NodeKind::Head(head) => LocalTransform::Basis {
            translation: head.position(),
            rotation: head.rotation_matrix(),
        },
        NodeKind::Segment => LocalTransform::AxisAngle {
            translation: axis,
            axis,
            angle,
        },
    }
}

/// Draws the chain starting at `start`.
///
/// Each node's transform stays pushed while everything after it is drawn, so a
/// twist on one node bends the rest of the chain. Returns the cube count.
pub fn draw_chain(arena: &ChainArena, start: NodeId, sink: &mut dyn RenderSink) -> usize {
    let mut pushed: Vec<NodeId> = Vec::new();

    for id in arena.iter_from(start) {
        let Some(node) = arena.get(id) else {
            break;
        };
        sink.push_transform(&local_transform(&node.kind, node.axis, node.angle));
        sink.submit_cube(if node.active {
            CubeStyle::Wireframe
        } else {
            CubeStyle::Solid
        });
        pushed.push(id);
    }

    let drawn = pushed.len();
    while pushed.pop().is_some() {
        sink.pop_transform();
    }
    drawn
}
