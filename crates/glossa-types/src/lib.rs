pub mod geometry;
pub mod types;

pub use geometry::{CaptureRegion, Point, Quad, ScreenPoint};
pub use types::*;
