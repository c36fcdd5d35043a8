pub mod scene;
pub mod time;

pub use scene::{FrameOutput, Scene};
pub use time::FrameClock;
