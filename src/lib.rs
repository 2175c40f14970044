pub mod behaviors;
pub mod camera;
pub mod chain;
pub mod cli;
pub mod config;
pub mod core;
pub mod math;
pub mod orbit;
pub mod rig;
pub mod scene;
pub mod script;
pub mod traits;
pub mod types;

pub use config::SceneConfig;
pub use scene::{Action, Scene, SegmentDirection};
