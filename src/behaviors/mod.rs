pub mod jitter;
pub mod path;
pub mod tracking;

pub use jitter::Jitter;
pub use path::{basis, ElasticPath, MIN_WAYPOINTS};
pub use tracking::{ChaseOffset, TargetTracker};
