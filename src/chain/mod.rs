mod arena;
mod node;
mod render;

pub use arena::{ChainArena, ChainIter, Removal, RemovalPolicy};
pub use node::{ChainHead, ChainNode, NodeId, NodeKind};
pub use render::{draw_chain, CubeStyle, LocalTransform, RenderCommand, WorldTransforms};
