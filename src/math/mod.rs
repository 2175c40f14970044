mod frame;
mod orientation;
mod vector;

pub use frame::OrthonormalFrame;
pub use orientation::{degrees_to_radians, radians_to_degrees, Orientation};
pub use vector::{Vector3, VectorExt, VECTOR_TOLERANCE};
