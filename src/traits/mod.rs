pub mod camera;
pub mod controller;
pub mod random;
pub mod renderer;

pub use camera::*;
pub use controller::*;
pub use random::*;
pub use renderer::*;
